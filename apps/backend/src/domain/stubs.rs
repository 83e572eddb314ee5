//! Random prompt values for decision stubs.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::constants::{NUM_DECISIONS_PER_ROUND, STUB_VALUE_RANGE};
use crate::domain::seed_derivation::derive_stub_seed;

/// Draw `n` values uniformly from the stub value range.
pub fn draw_stub_values<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<i32> {
    (0..n).map(|_| rng.random_range(STUB_VALUE_RANGE)).collect()
}

/// The per-round batch for one participant, reproducible from the session seed.
pub fn stub_values_for(session_seed: i64, round_number: i32, id_in_session: i32) -> Vec<i32> {
    let mut rng = ChaCha8Rng::seed_from_u64(derive_stub_seed(
        session_seed,
        round_number,
        id_in_session,
    ));
    draw_stub_values(&mut rng, NUM_DECISIONS_PER_ROUND)
}
