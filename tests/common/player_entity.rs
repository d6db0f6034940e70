use querycrate::{FieldDef, FieldKind, Filterable};
use sea_orm::entity::prelude::*;

pub const GENERAL_STATUSES: &[&str] = &["ACTIVE", "PASSIVE", "DELETED"];
pub const LEVELS: &[&str] = &["BEGINNER", "INTERMEDIATE", "ADVANCED", "PROFICIENT"];
pub const GENDERS: &[&str] = &["MAN", "WOMEN"];

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "player")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "Text")]
    pub full_name: String,
    pub level: Option<String>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Filterable for Entity {
    const RESOURCE_NAME: &'static str = "players";

    fn field_schema() -> Vec<FieldDef<Column>> {
        vec![
            FieldDef::column("id", FieldKind::Integer, Column::Id),
            FieldDef::column("fullName", FieldKind::Text, Column::FullName),
            FieldDef::column("level", FieldKind::Enum(LEVELS), Column::Level),
            FieldDef::column("gender", FieldKind::Enum(GENDERS), Column::Gender),
            FieldDef::column("phone", FieldKind::Text, Column::Phone),
            FieldDef::column("status", FieldKind::Enum(GENERAL_STATUSES), Column::Status),
        ]
    }

    fn default_sort_column() -> Column {
        Column::Id
    }
}
