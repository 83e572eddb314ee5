//! Fixed parameters of the example decisions experiment.

use std::ops::RangeInclusive;

/// Decision stubs each player answers per round.
pub const NUM_DECISIONS_PER_ROUND: usize = 5;

/// Rounds (subsessions) created for every session.
pub const NUM_ROUNDS: i32 = 3;

/// Inclusive range for a stub's prompt value.
pub const STUB_VALUE_RANGE: RangeInclusive<i32> = 1..=10;

/// Upper bound on participants per session.
pub const MAX_PARTICIPANTS: i32 = 1000;
