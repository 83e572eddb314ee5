//! DTOs for decisions_sea adapter.

/// DTO for recording a player's answer to one decision.
#[derive(Debug, Clone)]
pub struct DecisionAnswerUpdate {
    pub id: i64,
    pub player_id: i64,
    pub player_decision: Option<bool>,
    pub reason: Option<String>,
}
