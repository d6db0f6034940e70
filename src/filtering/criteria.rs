use std::collections::BTreeMap;
use std::fmt;

use super::field_filter::FieldFilter;

/// All field filters of one query, plus the `distinct` flag.
///
/// Fields that are absent impose no constraint, so `Criteria::default()` matches every record.
/// Filters are keyed by the field names declared in the entity's field schema; keys are kept
/// sorted so compilation and logging are deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    filters: BTreeMap<String, FieldFilter>,
    distinct: Option<bool>,
}

impl Criteria {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, field: impl Into<String>, filter: FieldFilter) -> Self {
        self.insert(field, filter);
        self
    }

    #[must_use]
    pub fn with_distinct(mut self, distinct: bool) -> Self {
        self.distinct = Some(distinct);
        self
    }

    /// Replace the filter of `field`, returning the previous one.
    pub fn insert(&mut self, field: impl Into<String>, filter: FieldFilter) -> Option<FieldFilter> {
        self.filters.insert(field.into(), filter)
    }

    #[must_use]
    pub fn filter(&self, field: &str) -> Option<&FieldFilter> {
        self.filters.get(field)
    }

    /// Filter of `field`, created empty on first access.
    pub fn filter_mut(&mut self, field: &str) -> &mut FieldFilter {
        self.filters.entry(field.to_string()).or_default()
    }

    pub fn remove(&mut self, field: &str) -> Option<FieldFilter> {
        self.filters.remove(field)
    }

    /// Filters with at least one populated operator.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldFilter)> {
        self.filters
            .iter()
            .filter(|(_, filter)| !filter.is_empty())
            .map(|(name, filter)| (name.as_str(), filter))
    }

    #[must_use]
    pub fn distinct(&self) -> Option<bool> {
        self.distinct
    }

    pub fn set_distinct(&mut self, distinct: Option<bool>) {
        self.distinct = distinct;
    }

    /// True when compiling this criteria yields an unconstrained predicate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields().next().is_none()
    }
}

impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Criteria{{")?;
        let mut first = true;
        for (name, filter) in self.fields() {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{name}: [{filter}]")?;
        }
        if let Some(distinct) = self.distinct {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "distinct={distinct}")?;
        }
        write!(f, "}}")
    }
}
