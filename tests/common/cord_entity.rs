use querycrate::{FieldDef, FieldKind, Filterable, JoinDef};
use sea_orm::entity::prelude::*;

use super::player_entity::GENERAL_STATUSES;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cord")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::challenge_entity::Entity")]
    Challenges,
}

impl Related<super::challenge_entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Challenges.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Filterable for Entity {
    const RESOURCE_NAME: &'static str = "cords";

    fn field_schema() -> Vec<FieldDef<Column>> {
        vec![
            FieldDef::column("id", FieldKind::Integer, Column::Id),
            FieldDef::column("name", FieldKind::Text, Column::Name),
            FieldDef::column("address", FieldKind::Text, Column::Address),
            FieldDef::column("status", FieldKind::Enum(GENERAL_STATUSES), Column::Status),
            FieldDef::relation(
                "challengeId",
                FieldKind::Integer,
                JoinDef::new("challenge", || Relation::Challenges.def(), "id"),
            ),
        ]
    }

    fn default_sort_column() -> Column {
        Column::Id
    }
}
