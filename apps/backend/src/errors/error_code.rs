//! Error codes for the decisions backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the decisions backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required
    Unauthorized,
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Invalid JWT token
    UnauthorizedInvalidJwt,
    /// JWT token has expired
    UnauthorizedExpiredJwt,
    /// Access denied
    Forbidden,
    /// User not found in database
    ForbiddenUserNotFound,
    /// Email is not on the experimenter allowlist
    EmailNotAllowed,

    // Request Validation
    /// Invalid email address
    InvalidEmail,
    /// Invalid Google sub provided
    InvalidGoogleSub,
    /// Invalid round number in path
    InvalidRound,
    /// Malformed or incomplete decision submission
    InvalidDecisionForm,
    /// Reason code outside the allowed set
    InvalidReason,
    /// Invalid session parameters
    InvalidSession,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Participant code does not exist
    ParticipantNotFound,
    /// No player for the participant in that round
    PlayerNotFound,
    /// Decision id does not belong to the player
    DecisionNotFound,
    /// Session not found
    SessionNotFound,
    /// User not found
    UserNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Google sub mismatch for existing email
    GoogleSubMismatch,
    /// Unique email constraint
    UniqueEmail,
    /// Random code collided with an existing one
    CodeConflict,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout (gateway timeout)
    DbTimeout,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
    /// Stored data violates an invariant
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::Forbidden => "FORBIDDEN",
            Self::ForbiddenUserNotFound => "FORBIDDEN_USER_NOT_FOUND",
            Self::EmailNotAllowed => "EMAIL_NOT_ALLOWED",

            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidGoogleSub => "INVALID_GOOGLE_SUB",
            Self::InvalidRound => "INVALID_ROUND",
            Self::InvalidDecisionForm => "INVALID_DECISION_FORM",
            Self::InvalidReason => "INVALID_REASON",
            Self::InvalidSession => "INVALID_SESSION",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::ParticipantNotFound => "PARTICIPANT_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::DecisionNotFound => "DECISION_NOT_FOUND",
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::GoogleSubMismatch => "GOOGLE_SUB_MISMATCH",
            Self::UniqueEmail => "UNIQUE_EMAIL",
            Self::CodeConflict => "CODE_CONFLICT",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
