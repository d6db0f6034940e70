use serde::Deserialize;

use crate::filtering::SortDirection;

const DEFAULT_PAGE_SIZE: u64 = 20;
const MAX_PAGE_SIZE: u64 = 2000;

/// Paging defaults shared by every query service.
///
/// Deserializable so it can sit inside an application's own configuration file:
///
/// ```toml
/// [query]
/// default_page_size = 50
/// max_page_size = 500
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Page size used when the request carries no `size` parameter
    pub default_page_size: u64,
    /// Larger requested sizes are clamped to this value
    pub max_page_size: u64,
    /// Direction applied to `sort=<property>` without an explicit direction
    pub default_sort_direction: SortDirection,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            default_sort_direction: SortDirection::Asc,
        }
    }
}

impl QueryConfig {
    /// Clamp a requested page size into `1..=max_page_size`.
    #[must_use]
    pub fn clamp_page_size(&self, requested: u64) -> u64 {
        requested.clamp(1, self.max_page_size.max(1))
    }
}
