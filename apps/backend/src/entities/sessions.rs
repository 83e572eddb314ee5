use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub code: String,
    pub label: String,
    #[sea_orm(column_name = "experimenter_name")]
    pub experimenter_name: Option<String>,
    pub comment: Option<String>,
    #[sea_orm(column_name = "is_demo")]
    pub is_demo: bool,
    #[sea_orm(column_name = "num_participants")]
    pub num_participants: i32,
    /// Root seed for decision stub values in this session.
    #[sea_orm(column_name = "rng_seed")]
    pub rng_seed: i64,
    #[sea_orm(column_name = "time_started")]
    pub time_started: Option<OffsetDateTime>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::participants::Entity")]
    Participants,
    #[sea_orm(has_many = "super::subsessions::Entity")]
    Subsessions,
}

impl Related<super::participants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participants.def()
    }
}

impl Related<super::subsessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subsessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
