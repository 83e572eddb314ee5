//! Claims the JWT middleware places in request extensions.

use serde::{Deserialize, Serialize};

/// Verified experimenter identity for the current request.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BackendClaims {
    /// users.sub
    pub sub: String,
    pub email: String,
    pub exp: i64,
}
