//! DTOs for sessions_sea adapter.

/// DTO for creating a session row.
#[derive(Debug, Clone)]
pub struct SessionCreate {
    pub code: String,
    pub label: String,
    pub experimenter_name: Option<String>,
    pub comment: Option<String>,
    pub is_demo: bool,
    pub num_participants: i32,
    pub rng_seed: i64,
}

/// DTO for creating one participant of a session.
#[derive(Debug, Clone)]
pub struct ParticipantCreate {
    pub session_id: i64,
    pub id_in_session: i32,
    pub code: String,
}
