//! Turning a submitted decision page into validated per-decision answers.
//!
//! Both wire encodings (positional `form-<i>-*` fields and the JSON list)
//! reduce to a list of [`SubmittedAnswer`]. [`check_shape`] enforces count
//! and uniqueness, [`interpret`] the per-field value rules.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::domain::constants::NUM_DECISIONS_PER_ROUND;
use crate::domain::reason::Reason;
use crate::errors::domain::{DomainError, ValidationKind};

/// One answer as it arrived, before interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedAnswer {
    pub id: i64,
    pub player_decision: String,
    pub reason: String,
}

/// One answer ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionAnswer {
    pub id: i64,
    pub player_decision: Option<bool>,
    pub reason: Option<Reason>,
}

/// `"True"` is true, blank is unanswered, anything else is false.
///
/// Values other than `"True"`/`"False"` are accepted as false but logged,
/// since they only arrive from hand-built requests.
pub fn parse_player_decision(raw: &str) -> Option<bool> {
    match raw {
        "" => None,
        "True" => Some(true),
        "False" => Some(false),
        other => {
            warn!(value = other, "Unexpected player_decision value treated as false");
            Some(false)
        }
    }
}

fn invalid_form(detail: impl Into<String>) -> DomainError {
    DomainError::validation(ValidationKind::InvalidDecisionForm, detail)
}

/// Read `form-<i>-id`, `form-<i>-player_decision` and `form-<i>-reason`
/// for every stub index. Unrelated fields are ignored.
pub fn parse_legacy_form(
    fields: &HashMap<String, String>,
) -> Result<Vec<SubmittedAnswer>, DomainError> {
    let field = |i: usize, name: &str| -> Result<String, DomainError> {
        let key = format!("form-{i}-{name}");
        fields
            .get(&key)
            .cloned()
            .ok_or_else(|| invalid_form(format!("Missing field {key}")))
    };

    (0..NUM_DECISIONS_PER_ROUND)
        .map(|i| {
            let raw_id = field(i, "id")?;
            let id = raw_id
                .trim()
                .parse::<i64>()
                .map_err(|_| invalid_form(format!("form-{i}-id is not an integer: '{raw_id}'")))?;
            Ok(SubmittedAnswer {
                id,
                player_decision: field(i, "player_decision")?,
                reason: field(i, "reason")?,
            })
        })
        .collect()
}

/// Exactly one answer per stub, no id twice.
pub fn check_shape(submitted: &[SubmittedAnswer]) -> Result<(), DomainError> {
    if submitted.len() != NUM_DECISIONS_PER_ROUND {
        return Err(invalid_form(format!(
            "Expected {NUM_DECISIONS_PER_ROUND} answers, got {}",
            submitted.len()
        )));
    }

    let mut seen = HashSet::with_capacity(submitted.len());
    for answer in submitted {
        if !seen.insert(answer.id) {
            return Err(invalid_form(format!(
                "Decision {} submitted more than once",
                answer.id
            )));
        }
    }
    Ok(())
}

/// Decision and reason values of each answer.
pub fn interpret(submitted: Vec<SubmittedAnswer>) -> Result<Vec<DecisionAnswer>, DomainError> {
    submitted
        .into_iter()
        .map(|a| {
            Ok(DecisionAnswer {
                id: a.id,
                player_decision: parse_player_decision(&a.player_decision),
                reason: Reason::parse_optional(&a.reason)?,
            })
        })
        .collect()
}
