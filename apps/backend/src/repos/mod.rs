//! Repository functions for the domain layer (generic over `ConnectionTrait`).

pub mod decisions;
pub mod rounds;
pub mod sessions;
pub mod users;
