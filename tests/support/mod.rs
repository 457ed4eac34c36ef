//! Shared fixtures for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::json;
use std::sync::{Arc, Mutex};

use condo_reports::config::Provider;
use condo_reports::filters::FilterMap;
use condo_reports::model::Record;
use condo_reports::repository::{ReportRepository, RepositoryError, RepositoryResult};
use condo_reports::{ReportCatalog, ReportingService};

/// In-memory repository that records every view query it receives.
#[derive(Default)]
pub struct RecordingRepository {
    pub rows: Vec<Record>,
    pub log: Mutex<Vec<(String, FilterMap)>>,
    pub fail: bool,
}

impl RecordingRepository {
    pub fn with_rows(rows: Vec<Record>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, FilterMap)> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportRepository for RecordingRepository {
    fn provider(&self) -> Provider {
        Provider::MySql
    }

    async fn query_view(&self, view: &str, filters: &FilterMap) -> RepositoryResult<Vec<Record>> {
        self.log
            .lock()
            .unwrap()
            .push((view.to_string(), filters.clone()));
        if self.fail {
            return Err(RepositoryError::Query(sqlx::Error::PoolTimedOut));
        }
        Ok(self.rows.clone())
    }

    async fn list_properties(&self) -> RepositoryResult<Vec<Record>> {
        if self.fail {
            return Err(RepositoryError::Query(sqlx::Error::PoolTimedOut));
        }
        Ok(vec![record(json!({ "property_id": 1, "property_name": "Harbour View" }))])
    }

    async fn list_board_members(&self) -> RepositoryResult<Vec<Record>> {
        Ok(vec![record(json!({ "user_id": 3, "full_name": "Dana Board" }))])
    }

    async fn ping(&self) -> RepositoryResult<bool> {
        Ok(!self.fail)
    }
}

pub fn record(value: serde_json::Value) -> Record {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

pub fn sample_rows() -> Vec<Record> {
    vec![
        record(json!({ "property_id": 12, "property_name": "Harbour View", "ytd_spend": "1200.50" })),
        record(json!({ "property_id": 12, "property_name": "Harbour View", "ytd_spend": null })),
    ]
}

pub fn service_with(repo: Arc<dyn ReportRepository>) -> ReportingService {
    ReportingService::new(Arc::new(ReportCatalog::builtin()), repo)
}
