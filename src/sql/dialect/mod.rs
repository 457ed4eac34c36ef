//! SQL dialect definitions.
//!
//! Each dialect implements `SqlDialect` to handle the syntax a view query
//! needs:
//!
//! - Identifier quoting: `` ` `` (MySQL)
//! - Parameter placeholders: positional `?`

pub mod helpers;
mod mysql;

pub use mysql::MySql;

/// SQL dialect trait - defines how view query pieces are rendered.
pub trait SqlDialect: std::fmt::Debug + Send + Sync {
    /// Quote an identifier (view, column).
    fn quote_identifier(&self, ident: &str) -> String;

    /// Placeholder for the `index`-th bound parameter (1-based).
    ///
    /// Defaults to the positional `?` form.
    fn placeholder(&self, index: usize) -> String {
        helpers::placeholder_question(index)
    }
}
