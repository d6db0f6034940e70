use querycrate::{FieldDef, FieldKind, Filterable, JoinDef};
use sea_orm::entity::prelude::*;

pub const CHALLENGE_STATUSES: &[&str] = &["REQUESTED", "ACCEPTED", "REJECTED"];

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "challenge")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub match_time: Option<DateTimeUtc>,
    pub status: String,
    pub proposer_id: Option<i64>,
    pub acceptor_id: Option<i64>,
    pub cord_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::player_entity::Entity",
        from = "Column::ProposerId",
        to = "super::player_entity::Column::Id"
    )]
    Proposer,
    #[sea_orm(
        belongs_to = "super::player_entity::Entity",
        from = "Column::AcceptorId",
        to = "super::player_entity::Column::Id"
    )]
    Acceptor,
    #[sea_orm(
        belongs_to = "super::cord_entity::Entity",
        from = "Column::CordId",
        to = "super::cord_entity::Column::Id"
    )]
    Cord,
}

impl Related<super::cord_entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Filterable for Entity {
    const RESOURCE_NAME: &'static str = "challenges";

    fn field_schema() -> Vec<FieldDef<Column>> {
        vec![
            FieldDef::column("id", FieldKind::Integer, Column::Id),
            FieldDef::column("matchTime", FieldKind::Timestamp, Column::MatchTime),
            FieldDef::column("status", FieldKind::Enum(CHALLENGE_STATUSES), Column::Status),
            FieldDef::relation(
                "cordId",
                FieldKind::Integer,
                JoinDef::new("cord", || Relation::Cord.def(), "id"),
            ),
            FieldDef::relation(
                "proposerId",
                FieldKind::Integer,
                JoinDef::new("proposer", || Relation::Proposer.def(), "id"),
            ),
            FieldDef::relation(
                "acceptorId",
                FieldKind::Integer,
                JoinDef::new("acceptor", || Relation::Acceptor.def(), "id"),
            ),
        ]
    }

    fn default_sort_column() -> Column {
        Column::Id
    }
}
