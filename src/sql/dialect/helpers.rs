//! Shared helper functions for SQL dialect implementations.

// =============================================================================
// Identifier Quoting
// =============================================================================

/// Quote identifier with backticks.
/// Used by: MySQL
pub fn quote_backtick(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

// =============================================================================
// Parameter Placeholders
// =============================================================================

/// Positional `?` placeholder.
/// Used by: MySQL
pub fn placeholder_question(_index: usize) -> String {
    "?".to_string()
}
