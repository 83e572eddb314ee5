//! DTOs for users_sea adapter.

/// DTO for creating an experimenter account.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub sub: String,
    pub email: String,
    pub username: Option<String>,
}
