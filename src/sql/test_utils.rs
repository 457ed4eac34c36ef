//! Test utilities for SQL emission validation.
//!
//! Parses emitted SQL with sqlparser-rs so that a rendering bug shows up as
//! a parse failure rather than at query time.

use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;

/// Validates that a SQL string is syntactically valid MySQL.
pub fn validate_mysql(sql: &str) -> Result<(), String> {
    Parser::parse_sql(&MySqlDialect {}, sql)
        .map(|_| ())
        .map_err(|e| format!("Invalid SQL for MySQL: {}\nSQL: {}", e, sql))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_valid_sql() {
        validate_mysql("SELECT * FROM `vw_x` WHERE `a` = ?").unwrap();
    }

    #[test]
    fn test_validate_invalid_sql() {
        assert!(validate_mysql("SELEC * FORM users").is_err());
    }
}
