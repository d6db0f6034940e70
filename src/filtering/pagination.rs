use axum::http::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use super::sort::{SortOrder, parse_sort};
use crate::config::QueryConfig;
use crate::errors::QueryError;

/// Paging query parameters, as documented in the generated OpenAPI description.
///
/// `sort` may be repeated (`sort=status,asc&sort=id,desc`); use
/// [`PageRequest::from_query_params`] when the raw parameter list is available.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Zero-based page index.
    ///
    /// Example: `0`
    #[param(example = 0)]
    pub page: Option<u64>,
    /// Page size, clamped to the configured maximum.
    ///
    /// Example: `20`
    #[param(example = 20)]
    pub size: Option<u64>,
    /// Sort order as `<property>[,asc|desc]`.
    ///
    /// Example: `matchTime,desc`
    #[param(example = "matchTime,desc")]
    pub sort: Option<String>,
}

/// Which slice of the matching records to return, and in which order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
    pub sort: Vec<SortOrder>,
}

impl PageRequest {
    #[must_use]
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page,
            size: size.max(1),
            sort: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_sort(mut self, order: SortOrder) -> Self {
        self.sort.push(order);
        self
    }

    #[must_use]
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }

    /// Build a page request from raw `(name, value)` parameters, ignoring everything but
    /// `page`, `size` and `sort`.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::InvalidParameter` for non-numeric `page`/`size`, `size=0`, or a
    /// malformed `sort` entry.
    pub fn from_query_params<I, K, V>(params: I, config: &QueryConfig) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut page = 0;
        let mut size = config.default_page_size;
        let mut sort = Vec::new();

        for (key, value) in params {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                "page" => page = parse_number(key, value)?,
                "size" => size = parse_number(key, value)?,
                "sort" => sort.push(parse_sort(value, config.default_sort_direction)?),
                _ => {}
            }
        }

        Self::checked(page, size, sort, config)
    }

    /// Build a page request from deserialized [`PageParams`].
    ///
    /// # Errors
    ///
    /// Same as [`PageRequest::from_query_params`].
    pub fn from_params(params: &PageParams, config: &QueryConfig) -> Result<Self, QueryError> {
        let sort = params
            .sort
            .as_deref()
            .map(|raw| parse_sort(raw, config.default_sort_direction))
            .transpose()?
            .into_iter()
            .collect();
        Self::checked(
            params.page.unwrap_or(0),
            params.size.unwrap_or(config.default_page_size),
            sort,
            config,
        )
    }

    fn checked(page: u64, size: u64, sort: Vec<SortOrder>, config: &QueryConfig) -> Result<Self, QueryError> {
        if size == 0 {
            return Err(QueryError::invalid_parameter("size", "page size must be positive"));
        }
        Ok(Self {
            page,
            size: config.clamp_page_size(size),
            sort,
        })
    }
}

fn parse_number(key: &str, raw: &str) -> Result<u64, QueryError> {
    raw.trim()
        .parse()
        .map_err(|_| QueryError::invalid_parameter(key, format!("'{raw}' is not a non-negative integer")))
}

/// One page of matching records plus the totals needed for pagination headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub page: u64,
    pub size: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            total_elements,
            page: request.page,
            size: request.size,
        }
    }

    /// A page with no content and a zero total.
    #[must_use]
    pub fn empty(request: &PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    #[must_use]
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            0
        } else {
            self.total_elements.div_ceil(self.size)
        }
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages()
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            page: self.page,
            size: self.size,
        }
    }
}

/// Sanitize header input by removing control characters
fn sanitize_header_text(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii() && !c.is_ascii_control()).collect()
}

/// Pagination headers for `page`, served from `base_path` as `resource`.
///
/// * `X-Total-Count`: total number of matching records
/// * `Link`: `next`, `prev`, `last` and `first` page links
/// * `Content-Range`: `<resource> <first>-<last>/<total>`
///
/// Any header whose value cannot be encoded is left out.
#[must_use]
pub fn pagination_headers<T>(page: &Page<T>, base_path: &str, resource: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let base_path = sanitize_header_text(base_path);
    let resource = sanitize_header_text(resource);

    insert(&mut headers, "x-total-count", page.total_elements.to_string());

    let separator = if base_path.contains('?') { '&' } else { '?' };
    let link = |index: u64, rel: &str| {
        format!(
            "<{base_path}{separator}page={index}&size={}>; rel=\"{rel}\"",
            page.size
        )
    };
    let last_page = page.total_pages().saturating_sub(1);
    let mut links = Vec::with_capacity(4);
    if page.has_next() {
        links.push(link(page.page.saturating_add(1), "next"));
    }
    if page.has_previous() {
        links.push(link(page.page - 1, "prev"));
    }
    links.push(link(last_page, "last"));
    links.push(link(0, "first"));
    insert(&mut headers, "link", links.join(","));

    // an empty page covers no range
    let range = if page.is_empty() {
        "*".to_string()
    } else {
        let start = page.page.saturating_mul(page.size);
        let end = start.saturating_add(page.content.len() as u64 - 1);
        format!("{start}-{end}")
    };
    insert(
        &mut headers,
        "content-range",
        format!("{resource} {range}/{}", page.total_elements),
    );

    headers
}

fn insert(headers: &mut HeaderMap, name: &'static str, value: String) {
    match HeaderValue::from_str(&value) {
        Ok(value) => {
            headers.insert(HeaderName::from_static(name), value);
        }
        Err(err) => tracing::warn!(header = name, error = %err, "skipping unencodable header"),
    }
}
