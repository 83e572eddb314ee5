//! DTOs for rounds_sea adapter.

/// DTO for creating a player row in a round.
#[derive(Debug, Clone)]
pub struct PlayerCreate {
    pub subsession_id: i64,
    pub group_id: i64,
    pub participant_id: i64,
    pub id_in_group: i32,
}
