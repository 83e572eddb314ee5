//! Business rules. Services take a connection (usually a transaction) and
//! return `AppError`; handlers decide the transaction boundary.

pub mod decisions;
pub mod export;
pub mod rounds;
pub mod sessions;
pub mod users;
