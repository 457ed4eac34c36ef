//! Reporting domain types shared across the catalog, service and web layers.

pub mod role;

pub use role::{Role, UnknownRole};

/// One result row: column name to scalar value, in the view's column order.
///
/// Views are open-ended, so rows carry no fixed schema.
pub type Record = serde_json::Map<String, serde_json::Value>;
