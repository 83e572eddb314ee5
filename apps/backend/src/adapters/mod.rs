//! SeaORM adapters. Functions here return `DbErr`; repos map to `DomainError`.

pub mod decisions_sea;
pub mod rounds_sea;
pub mod sessions_sea;
pub mod users_sea;
