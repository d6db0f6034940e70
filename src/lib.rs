//! Per-field filter criteria for Sea-ORM entities.
//!
//! Callers describe *which* records they want as a [`Criteria`]: one [`FieldFilter`] per named
//! field, each combining operators such as `equals`, `in`, `specified` or `greaterThan`. A
//! [`PredicateCompiler`] validates the criteria against the entity's [`Filterable`] field
//! schema and compiles it into a [`Predicate`]; a [`Store`] executes it to list, page or count
//! records. [`QueryService`] wires the three together and applies actor [`Visibility`].
//!
//! ```rust,ignore
//! let criteria = Criteria::from_query_params::<challenge::Entity, _, _, _>(params.iter())?;
//! let request = service.page_request(params.iter())?;
//! let page = service.find_page(Some(&criteria), &request).await?;
//! let headers = pagination_headers(&page, "/api/challenges", challenge::Entity::RESOURCE_NAME);
//! ```

pub mod config;
pub mod core;
pub mod database;
pub mod errors;
pub mod filtering;
pub mod service;

#[cfg(test)]
mod fixtures;

pub use config::QueryConfig;
pub use crate::core::{FieldDef, FieldKind, FieldSource, Filterable, JoinDef};
pub use database::{SeaOrmStore, Store};
pub use errors::QueryError;
pub use filtering::{
    Criteria, FieldFilter, FilterOperator, FilterValue, Page, PageRequest, Predicate,
    PredicateCompiler, pagination_headers,
};
pub use service::{QueryService, Visibility};
