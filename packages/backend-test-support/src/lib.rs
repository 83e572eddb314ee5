//! Helpers shared by the backend integration tests: logging setup,
//! Problem Details assertions and unique test identities.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
