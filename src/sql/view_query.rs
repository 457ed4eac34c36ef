//! `SELECT * FROM <view> WHERE ...` with bound parameters.

use super::dialect::SqlDialect;
use super::SqlError;
use crate::catalog::is_identifier;
use crate::filters::{FilterMap, FilterValue};

/// A read of one reporting view, narrowed by equality predicates.
///
/// The view and every column are checked to be plain identifiers; values
/// only ever travel as bound parameters.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "builders have no effect until used"]
pub struct ViewQuery {
    view: String,
    predicates: Vec<(String, FilterValue)>,
}

impl ViewQuery {
    pub fn new(view: &str) -> Result<Self, SqlError> {
        if !is_identifier(view) {
            return Err(SqlError::InvalidIdentifier(view.to_string()));
        }
        Ok(Self {
            view: view.to_string(),
            predicates: Vec::new(),
        })
    }

    /// Add `column = value`. Blank values are skipped and `*_id` columns
    /// take only numeric values; anything else is dropped rather than
    /// turned into a predicate that can never match.
    pub fn filter(mut self, column: &str, value: &FilterValue) -> Result<Self, SqlError> {
        if !is_identifier(column) {
            return Err(SqlError::InvalidIdentifier(column.to_string()));
        }
        if let Some(value) = value.normalize_for(column) {
            self.predicates.push((column.to_string(), value));
        }
        Ok(self)
    }

    /// One predicate per entry of an already whitelisted filter map.
    pub fn with_filters(view: &str, filters: &FilterMap) -> Result<Self, SqlError> {
        filters
            .iter()
            .try_fold(Self::new(view)?, |query, (key, value)| {
                query.filter(key, value)
            })
    }

    pub fn view(&self) -> &str {
        &self.view
    }

    /// Bound parameter values, in placeholder order.
    pub fn params(&self) -> impl Iterator<Item = &FilterValue> {
        self.predicates.iter().map(|(_, v)| v)
    }

    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }

    pub fn to_sql(&self, dialect: &dyn SqlDialect) -> String {
        let mut sql = format!("SELECT * FROM {}", dialect.quote_identifier(&self.view));
        if self.predicates.is_empty() {
            return sql;
        }
        let clauses: Vec<String> = self
            .predicates
            .iter()
            .enumerate()
            .map(|(i, (column, _))| {
                format!(
                    "{} = {}",
                    dialect.quote_identifier(column),
                    dialect.placeholder(i + 1)
                )
            })
            .collect();
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
        sql
    }
}
