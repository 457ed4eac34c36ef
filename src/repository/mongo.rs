//! Document-store reporting provider.
//!
//! Aggregation pipelines matching the SQL view outputs do not exist yet.
//! Selecting this provider disables report execution while the catalog and
//! filter-option endpoints keep working.

use async_trait::async_trait;

use super::{ReportRepository, RepositoryError, RepositoryResult};
use crate::config::Provider;
use crate::filters::FilterMap;
use crate::model::Record;

/// Placeholder repository for the document store.
#[derive(Debug, Clone, Copy, Default)]
pub struct MongoReportRepository;

impl MongoReportRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ReportRepository for MongoReportRepository {
    fn provider(&self) -> Provider {
        Provider::Mongo
    }

    async fn query_view(&self, _view: &str, _filters: &FilterMap) -> RepositoryResult<Vec<Record>> {
        Err(RepositoryError::NotImplemented(
            "Mongo reporting provider is not implemented yet.".to_string(),
        ))
    }
}
