use sea_orm::{
    Condition, DatabaseBackend, Value,
    sea_query::{Alias, ColumnRef, Expr, Func, LikeExpr, SimpleExpr},
};

use super::criteria::Criteria;
use super::field_filter::{FieldFilter, FilterValue};
use crate::core::{FieldDef, FieldKind, FieldSource, Filterable, JoinDef};
use crate::errors::QueryError;

/// A compiled criteria: the boolean condition, the joins it needs and the distinct hint.
///
/// The distinct hint travels beside the condition because it changes the shape of the result
/// set, not which records belong to it.
#[derive(Debug, Clone)]
pub struct Predicate {
    condition: Condition,
    joins: Vec<JoinDef>,
    distinct: Option<bool>,
}

impl Default for Predicate {
    fn default() -> Self {
        Self::all()
    }
}

impl Predicate {
    /// The always-true predicate.
    #[must_use]
    pub fn all() -> Self {
        Self {
            condition: Condition::all(),
            joins: Vec::new(),
            distinct: None,
        }
    }

    #[must_use]
    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    /// LEFT JOINs to apply before filtering, one per alias.
    #[must_use]
    pub fn joins(&self) -> &[JoinDef] {
        &self.joins
    }

    #[must_use]
    pub fn distinct(&self) -> Option<bool> {
        self.distinct
    }

    #[must_use]
    pub fn is_distinct(&self) -> bool {
        self.distinct == Some(true)
    }

    /// AND an extra condition onto this predicate.
    #[must_use]
    pub fn and(mut self, condition: Condition) -> Self {
        self.condition = self.condition.add(condition);
        self
    }

    fn add_join(&mut self, join: JoinDef) {
        if !self.joins.iter().any(|existing| existing.alias == join.alias) {
            self.joins.push(join);
        }
    }
}

/// Translates a [`Criteria`] into a [`Predicate`] for one entity.
///
/// Compilation is pure: no I/O, no shared state, and the same criteria always yields the same
/// predicate. The backend only decides how substring matching and enum comparison are spelled.
#[derive(Debug, Clone, Copy)]
pub struct PredicateCompiler {
    backend: DatabaseBackend,
}

impl PredicateCompiler {
    #[must_use]
    pub const fn new(backend: DatabaseBackend) -> Self {
        Self { backend }
    }

    #[must_use]
    pub const fn backend(&self) -> DatabaseBackend {
        self.backend
    }

    /// Compile `criteria` against the field schema of `E`.
    ///
    /// Filters on the entity's own columns are compiled first, then relation filters, each
    /// adding its LEFT JOIN. All conditions are ANDed. `None` or an empty criteria compiles to
    /// the always-true predicate.
    ///
    /// # Errors
    ///
    /// Fails fast with a schema error when a criteria key is not a schema field, when an
    /// operator is not supported by the field kind, or when an operand has the wrong type.
    pub fn compile<E: Filterable>(&self, criteria: Option<&Criteria>) -> Result<Predicate, QueryError> {
        let mut predicate = Predicate::all();
        let Some(criteria) = criteria else {
            return Ok(predicate);
        };

        // distinct is recorded before any field condition
        predicate.distinct = criteria.distinct();

        let schema = E::field_schema();
        if let Some((field, _)) = criteria
            .fields()
            .find(|(name, _)| E::field(name).is_none())
        {
            tracing::error!(field, resource = E::RESOURCE_NAME, "criteria references unknown field");
            return Err(QueryError::UnknownField {
                field: field.to_string(),
            });
        }

        let (direct, related): (Vec<&FieldDef<E::Column>>, Vec<_>) =
            schema.iter().partition(|def| !def.is_relation());

        for def in direct.into_iter().chain(related) {
            let Some(filter) = criteria.filter(def.name).filter(|filter| !filter.is_empty()) else {
                continue;
            };
            if let FieldSource::Relation(join) = def.source {
                predicate.add_join(join);
            }
            let condition = self.compile_field(def, filter).inspect_err(|err| {
                tracing::error!(error = %err, resource = E::RESOURCE_NAME, "cannot compile filter");
            })?;
            predicate.condition = predicate.condition.add(condition);
        }

        Ok(predicate)
    }

    fn compile_field<C: sea_orm::ColumnTrait>(
        &self,
        def: &FieldDef<C>,
        filter: &FieldFilter,
    ) -> Result<Condition, QueryError> {
        filter.validate(def.name)?;
        if let Some(operator) = filter.operators().into_iter().find(|op| !def.kind.supports(*op)) {
            return Err(QueryError::UnsupportedOperator {
                field: def.name.to_string(),
                operator,
                kind: def.kind.name(),
            });
        }
        if let Some((operator, _)) = filter.values().find(|(_, value)| !def.kind.accepts(value)) {
            return Err(QueryError::OperandType {
                field: def.name.to_string(),
                operator,
            });
        }

        let column = def.column_ref();
        let target = || self.target(def.kind, &column);
        let mut condition = Condition::all();

        if let Some(value) = &filter.equals {
            condition = condition.add(target().eq(to_value(value)));
        }
        if let Some(value) = &filter.not_equals {
            condition = condition.add(target().ne(to_value(value)));
        }
        if let Some(values) = &filter.in_values {
            condition = condition.add(target().is_in(values.iter().map(to_value)));
        }
        if let Some(values) = &filter.not_in {
            condition = condition.add(target().is_not_in(values.iter().map(to_value)));
        }
        if let Some(specified) = filter.specified {
            condition = condition.add(if specified {
                target().is_not_null()
            } else {
                target().is_null()
            });
        }
        if let Some(value) = &filter.greater_than {
            condition = condition.add(target().gt(to_value(value)));
        }
        if let Some(value) = &filter.greater_than_or_equal {
            condition = condition.add(target().gte(to_value(value)));
        }
        if let Some(value) = &filter.less_than {
            condition = condition.add(target().lt(to_value(value)));
        }
        if let Some(value) = &filter.less_than_or_equal {
            condition = condition.add(target().lte(to_value(value)));
        }
        if let Some(substring) = &filter.contains {
            condition = condition.add(self.substring_match(&column, substring, false));
        }
        if let Some(substring) = &filter.does_not_contain {
            condition = condition.add(self.substring_match(&column, substring, true));
        }

        Ok(condition)
    }

    /// Column expression the operator is applied to. Postgres enum columns compare as text.
    fn target(&self, kind: FieldKind, column: &ColumnRef) -> Expr {
        let expr = Expr::col(column.clone());
        match (kind, self.backend) {
            (FieldKind::Enum(_), DatabaseBackend::Postgres) => {
                Expr::expr(expr.cast_as(Alias::new("TEXT")))
            }
            _ => expr,
        }
    }

    /// Case-sensitive substring test, spelled per backend since SQLite's LIKE ignores case.
    fn substring_match(&self, column: &ColumnRef, substring: &str, negate: bool) -> SimpleExpr {
        match self.backend {
            DatabaseBackend::Postgres => {
                let pattern = LikeExpr::new(format!("%{}%", escape_like_wildcards(substring)))
                    .escape('\\');
                if negate {
                    Expr::col(column.clone()).not_like(pattern)
                } else {
                    Expr::col(column.clone()).like(pattern)
                }
            }
            DatabaseBackend::MySql => {
                let haystack = Expr::col(column.clone()).cast_as(Alias::new("BINARY"));
                position_test(
                    Func::cust(Alias::new("INSTR")).arg(haystack).arg(substring),
                    negate,
                )
            }
            _ => position_test(
                Func::cust(Alias::new("INSTR"))
                    .arg(Expr::col(column.clone()))
                    .arg(substring),
                negate,
            ),
        }
    }
}

fn to_value(value: &FilterValue) -> Value {
    value.clone().into()
}

/// `INSTR(..) > 0`, or `= 0` when negated. A NULL column matches neither.
fn position_test(position: impl Into<SimpleExpr>, negate: bool) -> SimpleExpr {
    let position = Expr::expr(position);
    if negate { position.eq(0) } else { position.gt(0) }
}

/// Escape LIKE wildcards so user input only ever matches literally
fn escape_like_wildcards(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
