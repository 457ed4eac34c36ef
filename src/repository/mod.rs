//! Reporting repositories.
//!
//! A repository reads report rows from one backing store. The active one is
//! chosen once at startup by [`from_settings`] and shared behind an `Arc`.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   ReportRepository                       │
//! │  query_view(view, filters)   list_properties()           │
//! │  list_board_members()        ping()                      │
//! └──────────────────────────────────────────────────────────┘
//!          │                                   │
//!          ▼                                   ▼
//! ┌────────────────────────┐       ┌────────────────────────┐
//! │ MySqlReportRepository  │       │ MongoReportRepository  │
//! │ (pooled, bound params) │       │ (lookups empty, views  │
//! │                        │       │  not implemented)      │
//! └────────────────────────┘       └────────────────────────┘
//! ```

mod mongo;
mod mysql;
mod row_decode;

use async_trait::async_trait;
use std::sync::Arc;

pub use mongo::MongoReportRepository;
pub use mysql::MySqlReportRepository;
pub use row_decode::decode_row;

use crate::config::{Provider, Settings, SettingsError};
use crate::filters::FilterMap;
use crate::model::Record;
use crate::sql::SqlError;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors raised by a reporting repository.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The provider cannot serve this operation.
    #[error("{0}")]
    NotImplemented(String),

    /// The view query could not be built.
    #[error("invalid view query: {0}")]
    InvalidQuery(#[from] SqlError),

    /// The backing store failed.
    #[error("query failed: {0}")]
    Query(#[from] sqlx::Error),
}

/// Read access to pre-built reporting views for one provider.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Provider this repository reads from.
    fn provider(&self) -> Provider;

    /// Read every row of `view` matching `filters`.
    ///
    /// `view` must come from the report catalog and `filters` must already
    /// be whitelisted for the report; neither is caller input.
    async fn query_view(&self, view: &str, filters: &FilterMap) -> RepositoryResult<Vec<Record>>;

    /// Properties for the filter picker. Empty when unsupported.
    async fn list_properties(&self) -> RepositoryResult<Vec<Record>> {
        Ok(Vec::new())
    }

    /// Board members for the filter picker. Empty when unsupported.
    async fn list_board_members(&self) -> RepositoryResult<Vec<Record>> {
        Ok(Vec::new())
    }

    /// Whether the backing store answers.
    async fn ping(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}

/// Build the repository for the configured provider.
///
/// The MySQL pool connects lazily, so this succeeds while the store is down.
pub fn from_settings(settings: &Settings) -> Result<Arc<dyn ReportRepository>, SettingsError> {
    let repo: Arc<dyn ReportRepository> = match settings.provider()? {
        Provider::MySql => {
            settings.mysql.validate()?;
            Arc::new(MySqlReportRepository::connect_lazy(&settings.mysql))
        }
        Provider::Mongo => Arc::new(MongoReportRepository::new()),
    };
    Ok(repo)
}
