//! # Condo Reports
//!
//! Role-gated reporting over pre-built condo-management SQL views.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │            HTTP API  (/api/reports/...)                  │
//! │      bearer token -> caller role -> handler              │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [service]
//! ┌─────────────────────────────────────────────────────────┐
//! │                  ReportingService                        │
//! │   catalog lookup -> role check -> filter whitelist       │
//! │   -> provider view                                       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [repository]
//! ┌─────────────────────────────────────────────────────────┐
//! │     ReportRepository (MySQL views | document stub)       │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod catalog;
pub mod client;
pub mod config;
pub mod filters;
pub mod model;
pub mod repository;
pub mod service;
pub mod sql;

#[cfg(feature = "server")]
pub mod web;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::catalog::{ReportCatalog, ReportDefinition, ReportSummary};
    pub use crate::config::{Provider, Settings};
    pub use crate::filters::{FilterMap, FilterValue};
    pub use crate::model::{Record, Role};
    pub use crate::repository::{ReportRepository, RepositoryError, RepositoryResult};
    pub use crate::service::{ReportError, ReportResult, ReportingService};
}

pub use catalog::ReportCatalog;
pub use model::Role;
pub use service::ReportingService;
