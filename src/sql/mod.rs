//! SQL generation for reporting views.
//!
//! - [`view_query`] - `SELECT * FROM <view>` with equality filters
//! - [`dialect`] - SQL dialect implementations

pub mod dialect;
pub mod view_query;

#[cfg(test)]
pub mod test_utils;

pub use dialect::{MySql, SqlDialect};
pub use view_query::ViewQuery;

/// Errors raised while building SQL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SqlError {
    #[error("{0:?} is not a valid SQL identifier")]
    InvalidIdentifier(String),
}
