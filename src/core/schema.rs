//! Declarative field schema.
//!
//! Each filterable entity publishes one [`FieldDef`] per query field: the name used in request
//! parameters, the semantic [`FieldKind`] that decides which operators are legal, and where the
//! value lives ([`FieldSource`]): a column on the entity itself, or the identifier of a related
//! record reached through a LEFT JOIN.

use sea_orm::{
    RelationDef,
    sea_query::{Alias, ColumnRef, IntoColumnRef},
    ColumnTrait,
};
use std::fmt;

use crate::filtering::{FilterOperator, FilterValue};

/// Semantic type of a filterable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Float,
    Text,
    Boolean,
    Timestamp,
    Uuid,
    /// String-backed enumeration, with the accepted database values
    Enum(&'static [&'static str]),
}

impl FieldKind {
    /// Whether values of this kind are totally ordered (range operators apply).
    #[must_use]
    pub const fn is_ordinal(&self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::Timestamp)
    }

    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }

    #[must_use]
    pub fn supports(&self, operator: FilterOperator) -> bool {
        if operator.is_range() {
            self.is_ordinal()
        } else if operator.is_text() {
            self.is_text()
        } else {
            true
        }
    }

    /// Whether `value` is a legal operand for a field of this kind.
    #[must_use]
    pub fn accepts(&self, value: &FilterValue) -> bool {
        match (self, value) {
            (Self::Integer, FilterValue::Integer(_))
            | (Self::Float, FilterValue::Float(_) | FilterValue::Integer(_))
            | (Self::Text, FilterValue::Text(_))
            | (Self::Boolean, FilterValue::Boolean(_))
            | (Self::Timestamp, FilterValue::Timestamp(_))
            | (Self::Uuid, FilterValue::Uuid(_)) => true,
            (Self::Enum(variants), FilterValue::Text(text)) => variants.contains(&text.as_str()),
            _ => false,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
            Self::Boolean => "boolean",
            Self::Timestamp => "timestamp",
            Self::Uuid => "uuid",
            Self::Enum(_) => "enum",
        }
    }
}

/// Join from the filtered entity to a related record type.
///
/// The relation is produced lazily by `relation` so the schema stays `Copy`-cheap; the store
/// joins it under `alias` and the compiled condition targets `alias.column`.
#[derive(Clone, Copy)]
pub struct JoinDef {
    pub alias: &'static str,
    pub relation: fn() -> RelationDef,
    pub column: &'static str,
}

impl JoinDef {
    #[must_use]
    pub const fn new(alias: &'static str, relation: fn() -> RelationDef, column: &'static str) -> Self {
        Self {
            alias,
            relation,
            column,
        }
    }

    /// Fully qualified reference to the joined identifier column.
    #[must_use]
    pub fn column_ref(&self) -> ColumnRef {
        (Alias::new(self.alias), Alias::new(self.column)).into_column_ref()
    }
}

impl fmt::Debug for JoinDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoinDef")
            .field("alias", &self.alias)
            .field("column", &self.column)
            .finish_non_exhaustive()
    }
}

impl PartialEq for JoinDef {
    fn eq(&self, other: &Self) -> bool {
        self.alias == other.alias && self.column == other.column
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldSource<C> {
    Column(C),
    Relation(JoinDef),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDef<C> {
    pub name: &'static str,
    pub kind: FieldKind,
    pub source: FieldSource<C>,
}

impl<C: ColumnTrait> FieldDef<C> {
    #[must_use]
    pub const fn column(name: &'static str, kind: FieldKind, column: C) -> Self {
        Self {
            name,
            kind,
            source: FieldSource::Column(column),
        }
    }

    #[must_use]
    pub const fn relation(name: &'static str, kind: FieldKind, join: JoinDef) -> Self {
        Self {
            name,
            kind,
            source: FieldSource::Relation(join),
        }
    }

    #[must_use]
    pub const fn is_relation(&self) -> bool {
        matches!(self.source, FieldSource::Relation(_))
    }

    /// The column the condition is written against, qualified with its table or join alias.
    #[must_use]
    pub fn column_ref(&self) -> ColumnRef {
        match &self.source {
            FieldSource::Column(column) => column.as_column_ref().into_column_ref(),
            FieldSource::Relation(join) => join.column_ref(),
        }
    }
}
