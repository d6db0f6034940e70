//! Criteria, their compilation into Sea-ORM conditions, and paging.
//!
//! A request flows through this module in three steps: [`parse_criteria`] binds the dotted
//! query parameters to a [`Criteria`], [`PredicateCompiler`] turns it into a [`Predicate`] for
//! one entity, and [`PageRequest`] describes the slice of results to return.

pub mod conditions;
pub mod criteria;
pub mod field_filter;
pub mod pagination;
pub mod query_parser;
pub mod sort;

pub use conditions::{Predicate, PredicateCompiler};
pub use criteria::Criteria;
pub use field_filter::{FieldFilter, FilterOperator, FilterValue, Operand};
pub use pagination::{Page, PageParams, PageRequest, pagination_headers};
pub use query_parser::{DISTINCT_PARAM, parse_criteria, parse_value};
pub use sort::{SortDirection, SortOrder, parse_sort, resolve_sort};
