//! Per-field filter descriptors.
//!
//! A [`FieldFilter`] holds the operands of every operator requested for one field. It is a
//! plain value: cloning yields an independent copy, so a base criteria can be forked into
//! variants without the variants leaking back into it.

use chrono::{DateTime, Utc};
use sea_orm::Value;
use std::fmt;
use uuid::Uuid;

use crate::errors::QueryError;

/// The closed operator vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterOperator {
    /// Equality (=)
    Equals,
    /// Not equal (<>)
    NotEquals,
    /// IN (set of values)
    In,
    /// NOT IN (set of values)
    NotIn,
    /// IS NOT NULL / IS NULL
    Specified,
    /// Greater than (>)
    GreaterThan,
    /// Greater than or equal (>=)
    GreaterThanOrEqual,
    /// Less than (<)
    LessThan,
    /// Less than or equal (<=)
    LessThanOrEqual,
    /// Case-sensitive substring match
    Contains,
    /// Negated substring match
    DoesNotContain,
}

impl FilterOperator {
    pub const ALL: [Self; 11] = [
        Self::Equals,
        Self::NotEquals,
        Self::In,
        Self::NotIn,
        Self::Specified,
        Self::GreaterThan,
        Self::GreaterThanOrEqual,
        Self::LessThan,
        Self::LessThanOrEqual,
        Self::Contains,
        Self::DoesNotContain,
    ];

    /// Parse the operator part of a `<field>.<operator>` request parameter
    #[must_use]
    pub fn from_param_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.param_name() == name)
    }

    #[must_use]
    pub const fn param_name(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "notEquals",
            Self::In => "in",
            Self::NotIn => "notIn",
            Self::Specified => "specified",
            Self::GreaterThan => "greaterThan",
            Self::GreaterThanOrEqual => "greaterThanOrEqual",
            Self::LessThan => "lessThan",
            Self::LessThanOrEqual => "lessThanOrEqual",
            Self::Contains => "contains",
            Self::DoesNotContain => "doesNotContain",
        }
    }

    #[must_use]
    pub const fn is_range(&self) -> bool {
        matches!(
            self,
            Self::GreaterThan | Self::GreaterThanOrEqual | Self::LessThan | Self::LessThanOrEqual
        )
    }

    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Contains | Self::DoesNotContain)
    }

    /// Operators whose operand is a set of values
    #[must_use]
    pub const fn is_set(&self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param_name())
    }
}

/// A typed operand.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
    Uuid(Uuid),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Timestamp(value) => f.write_str(&value.to_rfc3339()),
            Self::Uuid(value) => write!(f, "{value}"),
        }
    }
}

impl From<FilterValue> for Value {
    fn from(value: FilterValue) -> Self {
        match value {
            FilterValue::Integer(value) => value.into(),
            FilterValue::Float(value) => value.into(),
            FilterValue::Text(value) => value.into(),
            FilterValue::Boolean(value) => value.into(),
            FilterValue::Timestamp(value) => value.into(),
            FilterValue::Uuid(value) => value.into(),
        }
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl From<Uuid> for FilterValue {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

/// Operand for one operator, as handed to [`FieldFilter::set`].
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Value(FilterValue),
    Values(Vec<FilterValue>),
    Flag(bool),
    Substring(String),
}

/// Conditions on a single field. Every populated operator must hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldFilter {
    pub equals: Option<FilterValue>,
    pub not_equals: Option<FilterValue>,
    pub in_values: Option<Vec<FilterValue>>,
    pub not_in: Option<Vec<FilterValue>>,
    pub specified: Option<bool>,
    pub greater_than: Option<FilterValue>,
    pub greater_than_or_equal: Option<FilterValue>,
    pub less_than: Option<FilterValue>,
    pub less_than_or_equal: Option<FilterValue>,
    pub contains: Option<String>,
    pub does_not_contain: Option<String>,
}

impl FieldFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn equals(value: impl Into<FilterValue>) -> Self {
        Self {
            equals: Some(value.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn not_equals(value: impl Into<FilterValue>) -> Self {
        Self {
            not_equals: Some(value.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn in_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FilterValue>,
    {
        Self {
            in_values: Some(values.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn not_in<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FilterValue>,
    {
        Self {
            not_in: Some(values.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn specified(specified: bool) -> Self {
        Self {
            specified: Some(specified),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn greater_than(value: impl Into<FilterValue>) -> Self {
        Self::new().and_greater_than(value)
    }

    #[must_use]
    pub fn greater_than_or_equal(value: impl Into<FilterValue>) -> Self {
        Self::new().and_greater_than_or_equal(value)
    }

    #[must_use]
    pub fn less_than(value: impl Into<FilterValue>) -> Self {
        Self::new().and_less_than(value)
    }

    #[must_use]
    pub fn less_than_or_equal(value: impl Into<FilterValue>) -> Self {
        Self::new().and_less_than_or_equal(value)
    }

    #[must_use]
    pub fn contains(substring: impl Into<String>) -> Self {
        Self {
            contains: Some(substring.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn does_not_contain(substring: impl Into<String>) -> Self {
        Self {
            does_not_contain: Some(substring.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn and_greater_than(mut self, value: impl Into<FilterValue>) -> Self {
        self.greater_than = Some(value.into());
        self
    }

    #[must_use]
    pub fn and_greater_than_or_equal(mut self, value: impl Into<FilterValue>) -> Self {
        self.greater_than_or_equal = Some(value.into());
        self
    }

    #[must_use]
    pub fn and_less_than(mut self, value: impl Into<FilterValue>) -> Self {
        self.less_than = Some(value.into());
        self
    }

    #[must_use]
    pub fn and_less_than_or_equal(mut self, value: impl Into<FilterValue>) -> Self {
        self.less_than_or_equal = Some(value.into());
        self
    }

    #[must_use]
    pub fn and_not_equals(mut self, value: impl Into<FilterValue>) -> Self {
        self.not_equals = Some(value.into());
        self
    }

    /// Set the operand of `operator`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::InvalidFilter` when the operand shape does not fit the operator
    /// (a set for `in`, a flag for `specified`, a substring for `contains`, a value otherwise).
    pub fn set(&mut self, operator: FilterOperator, operand: Operand) -> Result<(), QueryError> {
        use FilterOperator as Op;

        match (operator, operand) {
            (Op::Equals, Operand::Value(v)) => self.equals = Some(v),
            (Op::NotEquals, Operand::Value(v)) => self.not_equals = Some(v),
            (Op::GreaterThan, Operand::Value(v)) => self.greater_than = Some(v),
            (Op::GreaterThanOrEqual, Operand::Value(v)) => self.greater_than_or_equal = Some(v),
            (Op::LessThan, Operand::Value(v)) => self.less_than = Some(v),
            (Op::LessThanOrEqual, Operand::Value(v)) => self.less_than_or_equal = Some(v),
            (Op::In, Operand::Values(vs)) => self.in_values = Some(vs),
            (Op::NotIn, Operand::Values(vs)) => self.not_in = Some(vs),
            (Op::Specified, Operand::Flag(flag)) => self.specified = Some(flag),
            (Op::Contains, Operand::Substring(s)) => self.contains = Some(s),
            (Op::DoesNotContain, Operand::Substring(s)) => self.does_not_contain = Some(s),
            (operator, operand) => {
                return Err(QueryError::invalid_filter(
                    operator.param_name(),
                    format!("operand {operand:?} does not fit operator '{operator}'"),
                ));
            }
        }
        Ok(())
    }

    /// Clear the operand of `operator`.
    pub fn clear(&mut self, operator: FilterOperator) {
        use FilterOperator as Op;

        match operator {
            Op::Equals => self.equals = None,
            Op::NotEquals => self.not_equals = None,
            Op::In => self.in_values = None,
            Op::NotIn => self.not_in = None,
            Op::Specified => self.specified = None,
            Op::GreaterThan => self.greater_than = None,
            Op::GreaterThanOrEqual => self.greater_than_or_equal = None,
            Op::LessThan => self.less_than = None,
            Op::LessThanOrEqual => self.less_than_or_equal = None,
            Op::Contains => self.contains = None,
            Op::DoesNotContain => self.does_not_contain = None,
        }
    }

    /// Populated operators, in declaration order.
    #[must_use]
    pub fn operators(&self) -> Vec<FilterOperator> {
        let populated = [
            self.equals.is_some(),
            self.not_equals.is_some(),
            self.in_values.is_some(),
            self.not_in.is_some(),
            self.specified.is_some(),
            self.greater_than.is_some(),
            self.greater_than_or_equal.is_some(),
            self.less_than.is_some(),
            self.less_than_or_equal.is_some(),
            self.contains.is_some(),
            self.does_not_contain.is_some(),
        ];
        FilterOperator::ALL
            .into_iter()
            .zip(populated)
            .filter_map(|(op, set)| set.then_some(op))
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operators().is_empty()
    }

    /// Every scalar or set operand, paired with its operator.
    pub(crate) fn values(&self) -> impl Iterator<Item = (FilterOperator, &FilterValue)> {
        use FilterOperator as Op;

        let scalars = [
            (Op::Equals, self.equals.as_ref()),
            (Op::NotEquals, self.not_equals.as_ref()),
            (Op::GreaterThan, self.greater_than.as_ref()),
            (Op::GreaterThanOrEqual, self.greater_than_or_equal.as_ref()),
            (Op::LessThan, self.less_than.as_ref()),
            (Op::LessThanOrEqual, self.less_than_or_equal.as_ref()),
        ]
        .into_iter()
        .filter_map(|(op, value)| value.map(|v| (op, v)));

        let sets = [
            (Op::In, self.in_values.as_deref()),
            (Op::NotIn, self.not_in.as_deref()),
        ]
        .into_iter()
        .flat_map(|(op, values)| values.unwrap_or_default().iter().map(move |v| (op, v)));

        scalars.chain(sets)
    }

    /// Check the operator combination rules.
    ///
    /// `specified` stands alone, and range operators never mix with substring operators.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::InvalidFilter` naming `field` when a rule is broken.
    pub fn validate(&self, field: &str) -> Result<(), QueryError> {
        let operators = self.operators();
        if self.specified.is_some() && operators.len() > 1 {
            return Err(QueryError::invalid_filter(
                field,
                "'specified' cannot be combined with other operators",
            ));
        }
        let has_range = operators.iter().any(FilterOperator::is_range);
        let has_text = operators.iter().any(FilterOperator::is_text);
        if has_range && has_text {
            return Err(QueryError::invalid_filter(
                field,
                "range and substring operators cannot be combined",
            ));
        }
        Ok(())
    }
}

impl fmt::Display for FieldFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(values: &[FilterValue]) -> String {
            values.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
        }

        let mut parts = Vec::new();
        for (op, value) in self.values().filter(|(op, _)| !op.is_set()) {
            parts.push(format!("{op}={value}"));
        }
        if let Some(values) = &self.in_values {
            parts.push(format!("in={}", join(values)));
        }
        if let Some(values) = &self.not_in {
            parts.push(format!("notIn={}", join(values)));
        }
        if let Some(specified) = self.specified {
            parts.push(format!("specified={specified}"));
        }
        if let Some(substring) = &self.contains {
            parts.push(format!("contains={substring}"));
        }
        if let Some(substring) = &self.does_not_contain {
            parts.push(format!("doesNotContain={substring}"));
        }
        write!(f, "{}", parts.join(", "))
    }
}
