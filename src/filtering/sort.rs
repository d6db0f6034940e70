use sea_orm::Order;
use serde::{Deserialize, Serialize};

use crate::core::{FieldSource, Filterable};
use crate::errors::QueryError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "ASC")]
    Asc,
    #[serde(alias = "DESC")]
    Desc,
}

impl SortDirection {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

/// One `sort=<property>[,asc|desc]` entry. Properties are schema field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortOrder {
    pub property: String,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Parse one `sort` parameter value, e.g. `matchTime,desc` or `id`.
///
/// # Errors
///
/// Returns `QueryError::InvalidParameter` for an empty property or an unknown direction.
pub fn parse_sort(raw: &str, default_direction: SortDirection) -> Result<SortOrder, QueryError> {
    let (property, direction) = match raw.split_once(',') {
        Some((property, direction)) => {
            let direction = SortDirection::parse(direction).ok_or_else(|| {
                QueryError::invalid_parameter("sort", format!("unknown sort direction '{direction}'"))
            })?;
            (property.trim(), direction)
        }
        None => (raw.trim(), default_direction),
    };
    if property.is_empty() {
        return Err(QueryError::invalid_parameter("sort", "missing sort property"));
    }
    Ok(SortOrder {
        property: property.to_string(),
        direction,
    })
}

/// Map sort orders onto columns of `E`.
///
/// Only direct schema fields are sortable. Unknown or relation properties are skipped; when
/// nothing usable remains, the entity's default sort column is used ascending.
pub fn resolve_sort<E: Filterable>(orders: &[SortOrder]) -> Vec<(E::Column, Order)> {
    let schema = E::field_schema();
    let mut resolved = Vec::with_capacity(orders.len());

    for order in orders {
        let column = schema.iter().find_map(|def| match def.source {
            FieldSource::Column(column) if def.name == order.property => Some(column),
            _ => None,
        });
        match column {
            Some(column) => resolved.push((column, order.direction.into())),
            None => tracing::warn!(
                property = %order.property,
                resource = E::RESOURCE_NAME,
                "ignoring unsortable property"
            ),
        }
    }

    if resolved.is_empty() {
        resolved.push((E::default_sort_column(), Order::Asc));
    }
    resolved
}
