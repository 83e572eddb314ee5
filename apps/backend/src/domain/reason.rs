//! The fixed set of reasons a player can give for a decision.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    DontKnow,
    ExampleReason,
    AnotherExampleReason,
}

impl Reason {
    /// Display order for choice lists.
    pub const ALL: [Reason; 3] = [
        Reason::DontKnow,
        Reason::ExampleReason,
        Reason::AnotherExampleReason,
    ];

    /// Stored and submitted code.
    pub const fn code(self) -> &'static str {
        match self {
            Reason::DontKnow => "dont_know",
            Reason::ExampleReason => "example_reason",
            Reason::AnotherExampleReason => "another_example_reason",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Reason::DontKnow => "Don't know",
            Reason::ExampleReason => "Example reason",
            Reason::AnotherExampleReason => "Another example reason",
        }
    }

    /// Blank input means "no reason given".
    pub fn parse_optional(raw: &str) -> Result<Option<Reason>, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }
}

impl FromStr for Reason {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Reason::ALL
            .into_iter()
            .find(|r| r.code() == s)
            .ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::InvalidReason,
                    format!("Unknown reason '{s}'"),
                )
            })
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One entry of the choice list shown next to each decision.
#[derive(Debug, Clone, Serialize)]
pub struct ReasonChoice {
    pub code: &'static str,
    pub label: &'static str,
}

pub fn reason_choices() -> Vec<ReasonChoice> {
    Reason::ALL
        .into_iter()
        .map(|r| ReasonChoice {
            code: r.code(),
            label: r.label(),
        })
        .collect()
}
