//! Domain layer: experiment constants and pure decision logic.

pub mod answers;
pub mod codes;
pub mod constants;
pub mod reason;
pub mod seed_derivation;
pub mod stubs;
