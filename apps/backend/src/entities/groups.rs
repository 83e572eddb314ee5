use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "groups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "subsession_id")]
    pub subsession_id: i64,
    #[sea_orm(column_name = "id_in_subsession")]
    pub id_in_subsession: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subsessions::Entity",
        from = "Column::SubsessionId",
        to = "super::subsessions::Column::Id"
    )]
    Subsession,
    #[sea_orm(has_many = "super::players::Entity")]
    Players,
}

impl Related<super::subsessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subsession.def()
    }
}

impl Related<super::players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Players.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
