//! Reporting service errors.

use thiserror::Error;

use crate::config::Provider;
use crate::model::Role;
use crate::repository::RepositoryError;

/// Per-request reporting failures. None is retried.
#[derive(Error, Debug)]
pub enum ReportError {
    /// No report with this id in the catalog.
    #[error("Unknown report")]
    NotFound(String),

    /// The caller's role may not run this report.
    #[error("Forbidden")]
    Forbidden { report: String, role: Role },

    /// The active provider cannot serve this report.
    #[error("{0}")]
    NotImplemented(String),

    /// The backing store failed; no partial rows are returned.
    #[error("report query failed: {0}")]
    Execution(#[source] RepositoryError),
}

impl ReportError {
    pub(crate) fn no_view(provider: Provider) -> Self {
        Self::NotImplemented(format!("Report not available for provider: {}", provider))
    }

    /// Message safe to show to API callers. Store errors stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::Execution(_) => "Failed to run report".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<RepositoryError> for ReportError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotImplemented(msg) => Self::NotImplemented(msg),
            other => Self::Execution(other),
        }
    }
}
