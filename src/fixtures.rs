//! Entities shared by the unit tests.

use crate::core::{FieldDef, FieldKind, Filterable, JoinDef};

pub const GENERAL_STATUSES: &[&str] = &["ACTIVE", "PASSIVE", "DELETED"];
pub const LEVELS: &[&str] = &["BEGINNER", "INTERMEDIATE", "ADVANCED", "PROFICIENT"];

pub mod player {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "player")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub full_name: String,
        pub level: Option<String>,
        pub phone: Option<String>,
        pub status: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod challenge {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "challenge")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub match_time: Option<DateTimeUtc>,
        pub status: String,
        pub proposer_id: Option<i64>,
        pub acceptor_id: Option<i64>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::player::Entity",
            from = "Column::ProposerId",
            to = "super::player::Column::Id"
        )]
        Proposer,
        #[sea_orm(
            belongs_to = "super::player::Entity",
            from = "Column::AcceptorId",
            to = "super::player::Column::Id"
        )]
        Acceptor,
    }

    impl ActiveModelBehavior for ActiveModel {}
}

impl Filterable for player::Entity {
    const RESOURCE_NAME: &'static str = "players";

    fn field_schema() -> Vec<FieldDef<player::Column>> {
        vec![
            FieldDef::column("id", FieldKind::Integer, player::Column::Id),
            FieldDef::column("fullName", FieldKind::Text, player::Column::FullName),
            FieldDef::column("level", FieldKind::Enum(LEVELS), player::Column::Level),
            FieldDef::column("phone", FieldKind::Text, player::Column::Phone),
            FieldDef::column("status", FieldKind::Enum(GENERAL_STATUSES), player::Column::Status),
        ]
    }

    fn default_sort_column() -> player::Column {
        player::Column::Id
    }
}

impl Filterable for challenge::Entity {
    const RESOURCE_NAME: &'static str = "challenges";

    fn field_schema() -> Vec<FieldDef<challenge::Column>> {
        use sea_orm::RelationTrait;

        vec![
            FieldDef::relation(
                "proposerId",
                FieldKind::Integer,
                JoinDef::new("proposer", || challenge::Relation::Proposer.def(), "id"),
            ),
            FieldDef::column("id", FieldKind::Integer, challenge::Column::Id),
            FieldDef::column("matchTime", FieldKind::Timestamp, challenge::Column::MatchTime),
            FieldDef::column("status", FieldKind::Enum(GENERAL_STATUSES), challenge::Column::Status),
            FieldDef::relation(
                "acceptorId",
                FieldKind::Integer,
                JoinDef::new("acceptor", || challenge::Relation::Acceptor.def(), "id"),
            ),
        ]
    }

    fn default_sort_column() -> challenge::Column {
        challenge::Column::Id
    }
}
