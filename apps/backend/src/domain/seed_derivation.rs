//! Deterministic seed derivation for decision stubs.
//!
//! A session stores one root seed; every (round, participant) pair gets its
//! own stream so stub values do not depend on creation order.

/// Seed for one participant's stubs in one round.
pub fn derive_stub_seed(session_seed: i64, round_number: i32, id_in_session: i32) -> u64 {
    // Sign is irrelevant for a seed.
    let base = session_seed as u64;

    base.wrapping_add((round_number as u64).wrapping_mul(1_000_003))
        .wrapping_add((id_in_session as u64).wrapping_mul(1_009))
        .wrapping_add(1)
}
