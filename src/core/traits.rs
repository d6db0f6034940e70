use sea_orm::EntityTrait;

use super::schema::FieldDef;

/// An entity whose records can be queried with a [`Criteria`](crate::Criteria).
///
/// Implemented once per entity, next to its Sea-ORM definition:
///
/// ```rust,ignore
/// impl Filterable for Entity {
///     const RESOURCE_NAME: &'static str = "challenges";
///
///     fn field_schema() -> Vec<FieldDef<Column>> {
///         vec![
///             FieldDef::column("id", FieldKind::Integer, Column::Id),
///             FieldDef::column("matchTime", FieldKind::Timestamp, Column::MatchTime),
///             FieldDef::relation(
///                 "proposerId",
///                 FieldKind::Integer,
///                 JoinDef::new("proposer", || Relation::Proposer.def(), "id"),
///             ),
///         ]
///     }
///
///     fn default_sort_column() -> Column {
///         Column::Id
///     }
/// }
/// ```
pub trait Filterable: EntityTrait {
    /// Plural resource name, used in pagination headers and log records
    const RESOURCE_NAME: &'static str;

    fn field_schema() -> Vec<FieldDef<Self::Column>>;

    /// Column used when a page request carries no (valid) sort order.
    fn default_sort_column() -> Self::Column;

    #[must_use]
    fn field(name: &str) -> Option<FieldDef<Self::Column>> {
        Self::field_schema().into_iter().find(|def| def.name == name)
    }
}
