//! # Query Errors
//!
//! Every failure the query layer can produce, split in three families:
//!
//! - **Client input**: a request parameter could not be bound to a filter
//!   ([`QueryError::InvalidParameter`]). The caller should answer with a 4xx.
//! - **Schema mismatch**: a `Criteria` references a field or operator that the entity's field
//!   schema does not allow. These are programming errors and always fail fast, so a
//!   misconfigured filter never returns unfiltered rows.
//! - **Store failure**: the database error, passed through unchanged.
//!
//! ```rust,ignore
//! use querycrate::QueryError;
//!
//! match service.count(Some(&criteria)).await {
//!     Ok(total) => println!("{total} matching records"),
//!     Err(err) if err.is_client_error() => eprintln!("bad request: {err}"),
//!     Err(err) => return Err(err.into()),
//! }
//! ```

use sea_orm::DbErr;
use std::fmt;

use crate::filtering::FilterOperator;

#[derive(Debug)]
pub enum QueryError {
    /// A request parameter carried a malformed or disallowed value
    InvalidParameter {
        /// Full parameter name, e.g. `status.equals`
        parameter: String,
        /// User-facing reason
        message: String,
    },

    /// A criteria key that the entity schema does not declare
    UnknownField { field: String },

    /// The field kind does not support the operator (e.g. `contains` on an integer)
    UnsupportedOperator {
        field: String,
        operator: FilterOperator,
        kind: &'static str,
    },

    /// An operand whose type does not match the field kind
    OperandType {
        field: String,
        operator: FilterOperator,
    },

    /// A filter mixing operators that cannot be combined
    InvalidFilter { field: String, message: String },

    /// Error returned by the store, never retried or masked here
    Database(DbErr),
}

impl QueryError {
    pub fn invalid_parameter(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    pub fn invalid_filter(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidFilter {
            field: field.into(),
            message: message.into(),
        }
    }

    /// True when the error was caused by request input rather than configuration or storage.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }

    /// True for mismatches between a criteria and the entity field schema.
    #[must_use]
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownField { .. }
                | Self::UnsupportedOperator { .. }
                | Self::OperandType { .. }
                | Self::InvalidFilter { .. }
        )
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter { parameter, message } => {
                write!(f, "invalid value for parameter '{parameter}': {message}")
            }
            Self::UnknownField { field } => write!(f, "unknown filter field '{field}'"),
            Self::UnsupportedOperator {
                field,
                operator,
                kind,
            } => write!(
                f,
                "operator '{}' is not supported on {kind} field '{field}'",
                operator.param_name()
            ),
            Self::OperandType { field, operator } => write!(
                f,
                "operand for '{field}.{}' does not match the field type",
                operator.param_name()
            ),
            Self::InvalidFilter { field, message } => {
                write!(f, "invalid filter on '{field}': {message}")
            }
            Self::Database(err) => write!(f, "database error: {err}"),
        }
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Database(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbErr> for QueryError {
    fn from(err: DbErr) -> Self {
        Self::Database(err)
    }
}
