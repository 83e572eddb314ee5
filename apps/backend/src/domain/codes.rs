//! Random access codes for sessions and participants.
//!
//! Crockford base32 alphabet: no I, L, O or U, so codes survive being read
//! aloud or copied by hand.

use std::collections::HashSet;

use rand::Rng;

const CROCKFORD: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

pub const CODE_LEN: usize = 8;

pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..CODE_LEN)
        .map(|_| CROCKFORD[rng.random_range(0..CROCKFORD.len())] as char)
        .collect()
}

/// Draws allowed per requested code before giving up.
const DRAWS_PER_CODE: usize = 16;

/// `count` codes, distinct from each other and from `taken`. `None` when
/// the draw budget runs out, which only a broken RNG or an exhausted code
/// space can cause.
pub fn draw_distinct_codes<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    taken: &HashSet<String>,
) -> Option<Vec<String>> {
    let mut seen = HashSet::with_capacity(count);
    let mut codes = Vec::with_capacity(count);
    for _ in 0..count.max(1) * DRAWS_PER_CODE {
        if codes.len() == count {
            break;
        }
        let code = generate_code(rng);
        if !taken.contains(&code) && seen.insert(code.clone()) {
            codes.push(code);
        }
    }
    (codes.len() == count).then_some(codes)
}
