use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One participant's row for one round.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "players")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "subsession_id")]
    pub subsession_id: i64,
    #[sea_orm(column_name = "group_id")]
    pub group_id: i64,
    #[sea_orm(column_name = "participant_id")]
    pub participant_id: i64,
    #[sea_orm(column_name = "id_in_group")]
    pub id_in_group: i32,
    pub payoff: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subsessions::Entity",
        from = "Column::SubsessionId",
        to = "super::subsessions::Column::Id"
    )]
    Subsession,
    #[sea_orm(
        belongs_to = "super::groups::Entity",
        from = "Column::GroupId",
        to = "super::groups::Column::Id"
    )]
    Group,
    #[sea_orm(
        belongs_to = "super::participants::Entity",
        from = "Column::ParticipantId",
        to = "super::participants::Column::Id"
    )]
    Participant,
    #[sea_orm(has_many = "super::decisions::Entity")]
    Decisions,
}

impl Related<super::subsessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subsession.def()
    }
}

impl Related<super::groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl Related<super::participants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participant.def()
    }
}

impl Related<super::decisions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Decisions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
