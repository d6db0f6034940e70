//! Binding of raw request parameters to a [`Criteria`].
//!
//! Every schema field accepts the dotted parameter family `<field>.<operator>`:
//!
//! ```text
//! GET /challenges?status.equals=ACTIVE
//! GET /challenges?id.in=1,2,3&id.notEquals=2
//! GET /challenges?matchTime.greaterThan=2024-05-01T00:00:00Z&matchTime.lessThan=2024-06-01T00:00:00Z
//! GET /players?fullName.contains=Ali&phone.specified=false
//! GET /challenges?proposerId.equals=7&distinct=true
//! ```
//!
//! Parameters that do not name a schema field (`page`, `size`, `sort`, ...) are ignored.
//! Everything else is validated here, before compilation, so malformed input surfaces as a
//! client error rather than as a schema error.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::criteria::Criteria;
use super::field_filter::{FilterOperator, FilterValue, Operand};
use crate::core::{FieldDef, FieldKind, Filterable};
use crate::errors::QueryError;

/// Reserved parameter carrying the criteria-level distinct flag
pub const DISTINCT_PARAM: &str = "distinct";

// Basic safety limits
const MAX_PARAM_VALUE_LENGTH: usize = 10_000;
const MAX_SET_SIZE: usize = 1_000;

/// Build a `Criteria` for entity `E` from `(name, value)` request parameters.
///
/// `in`/`notIn` values are comma-separated and repeated parameters accumulate; for every other
/// operator the last occurrence wins.
///
/// # Errors
///
/// Returns `QueryError::InvalidParameter` when an operand cannot be parsed for the field type,
/// when the operator does not exist or does not apply to the field, or when `specified` is
/// combined with another operator on the same field.
pub fn parse_criteria<E, I, K, V>(params: I) -> Result<Criteria, QueryError>
where
    E: Filterable,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut criteria = Criteria::new();

    for (key, value) in params {
        let (key, value) = (key.as_ref(), value.as_ref());

        if value.len() > MAX_PARAM_VALUE_LENGTH {
            return Err(QueryError::invalid_parameter(key, "value is too long"));
        }

        if key == DISTINCT_PARAM {
            criteria.set_distinct(Some(parse_bool(key, value)?));
            continue;
        }

        let Some((field_name, operator_name)) = key.split_once('.') else {
            tracing::trace!(parameter = %key, "ignoring non-filter parameter");
            continue;
        };
        let Some(def) = E::field(field_name) else {
            tracing::trace!(
                parameter = %key,
                resource = E::RESOURCE_NAME,
                "ignoring parameter for unknown field"
            );
            continue;
        };

        let operator = FilterOperator::from_param_name(operator_name).ok_or_else(|| {
            QueryError::invalid_parameter(key, format!("unknown operator '{operator_name}'"))
        })?;
        if !def.kind.supports(operator) {
            return Err(QueryError::invalid_parameter(
                key,
                format!(
                    "operator '{operator}' is not available on {} field '{}'",
                    def.kind.name(),
                    def.name
                ),
            ));
        }

        let operand = parse_operand(key, &def, operator, value)?;
        let filter = criteria.filter_mut(def.name);
        let operand = match (operator, operand) {
            (FilterOperator::In, Operand::Values(values)) => {
                Operand::Values(accumulate(filter.in_values.take(), values))
            }
            (FilterOperator::NotIn, Operand::Values(values)) => {
                Operand::Values(accumulate(filter.not_in.take(), values))
            }
            (_, operand) => operand,
        };
        if let Operand::Values(values) = &operand
            && values.len() > MAX_SET_SIZE
        {
            return Err(QueryError::invalid_parameter(key, "too many values"));
        }
        filter
            .set(operator, operand)
            .map_err(|err| QueryError::invalid_parameter(key, err.to_string()))?;
    }

    for (field, filter) in criteria.fields() {
        if let Err(err) = filter.validate(field) {
            let message = match err {
                QueryError::InvalidFilter { message, .. } => message,
                other => other.to_string(),
            };
            return Err(QueryError::invalid_parameter(field, message));
        }
    }

    Ok(criteria)
}

impl Criteria {
    /// Shorthand for [`parse_criteria`].
    ///
    /// # Errors
    ///
    /// See [`parse_criteria`].
    pub fn from_query_params<E, I, K, V>(params: I) -> Result<Self, QueryError>
    where
        E: Filterable,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        parse_criteria::<E, I, K, V>(params)
    }
}

fn accumulate(existing: Option<Vec<FilterValue>>, values: Vec<FilterValue>) -> Vec<FilterValue> {
    let mut all = existing.unwrap_or_default();
    all.extend(values);
    all
}

fn parse_operand<C>(
    key: &str,
    def: &FieldDef<C>,
    operator: FilterOperator,
    raw: &str,
) -> Result<Operand, QueryError> {
    match operator {
        FilterOperator::Specified => parse_bool(key, raw).map(Operand::Flag),
        FilterOperator::Contains | FilterOperator::DoesNotContain => {
            Ok(Operand::Substring(raw.to_string()))
        }
        FilterOperator::In | FilterOperator::NotIn => raw
            .split(',')
            .map(|item| parse_value(key, def.kind, item))
            .collect::<Result<Vec<_>, _>>()
            .map(Operand::Values),
        _ => parse_value(key, def.kind, raw).map(Operand::Value),
    }
}

/// Parse one operand according to the field kind.
///
/// # Errors
///
/// Returns `QueryError::InvalidParameter` naming `key` when `raw` is not a valid value.
pub fn parse_value(key: &str, kind: FieldKind, raw: &str) -> Result<FilterValue, QueryError> {
    let trimmed = raw.trim();
    match kind {
        FieldKind::Integer => trimmed
            .parse::<i64>()
            .map(FilterValue::Integer)
            .map_err(|_| QueryError::invalid_parameter(key, format!("'{raw}' is not an integer"))),
        FieldKind::Float => match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(FilterValue::Float(value)),
            _ => Err(QueryError::invalid_parameter(key, format!("'{raw}' is not a number"))),
        },
        FieldKind::Text => Ok(FilterValue::Text(raw.to_string())),
        FieldKind::Boolean => parse_bool(key, trimmed).map(FilterValue::Boolean),
        FieldKind::Timestamp => DateTime::parse_from_rfc3339(trimmed)
            .map(|value| FilterValue::Timestamp(value.with_timezone(&Utc)))
            .map_err(|_| {
                QueryError::invalid_parameter(key, format!("'{raw}' is not an RFC 3339 timestamp"))
            }),
        FieldKind::Uuid => Uuid::parse_str(trimmed)
            .map(FilterValue::Uuid)
            .map_err(|_| QueryError::invalid_parameter(key, format!("'{raw}' is not a UUID"))),
        FieldKind::Enum(variants) => {
            if variants.contains(&trimmed) {
                Ok(FilterValue::Text(trimmed.to_string()))
            } else {
                Err(QueryError::invalid_parameter(
                    key,
                    format!("'{raw}' is not one of {}", variants.join(", ")),
                ))
            }
        }
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, QueryError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(QueryError::invalid_parameter(
            key,
            format!("'{raw}' is not a boolean"),
        )),
    }
}
