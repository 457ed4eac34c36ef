//! Reporting service.
//!
//! Turns `(report id, caller role, raw filters)` into a query against a
//! catalog view on the active provider:
//!
//! 1. look the report up (`NotFound`)
//! 2. check the caller's role (`Forbidden`)
//! 3. whitelist and normalize the filters (never an error)
//! 4. resolve the provider's view (`NotImplemented`)
//! 5. run the query (`Execution` on store failure)

mod error;

pub use error::ReportError;

use serde::Serialize;
use std::sync::Arc;

use crate::catalog::{ReportCatalog, ReportSummary};
use crate::config::{Provider, Settings, SettingsError};
use crate::filters::FilterMap;
use crate::model::{Record, Role};
use crate::repository::{self, ReportRepository};

/// Reports visible to a caller.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    pub provider: Provider,
    pub catalog: Vec<ReportSummary>,
}

/// Lookup lists for populating filter pickers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub provider: Provider,
    pub properties: Vec<Record>,
    pub board_members: Vec<Record>,
}

/// Rows of one report run.
#[derive(Debug, Clone)]
pub struct ReportResult {
    pub report_id: String,
    pub title: String,
    pub provider: Provider,
    /// Filters actually applied, after sanitization.
    pub filters: FilterMap,
    pub rows: Vec<Record>,
}

impl ReportResult {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Role-gated access to the report catalog and the active repository.
#[derive(Clone)]
pub struct ReportingService {
    catalog: Arc<ReportCatalog>,
    repository: Arc<dyn ReportRepository>,
}

impl ReportingService {
    pub fn new(catalog: Arc<ReportCatalog>, repository: Arc<dyn ReportRepository>) -> Self {
        Self {
            catalog,
            repository,
        }
    }

    /// Built-in catalog plus the repository for the configured provider.
    pub fn from_settings(settings: &Settings) -> Result<Self, SettingsError> {
        let repository = repository::from_settings(settings)?;
        Ok(Self::new(Arc::new(ReportCatalog::builtin()), repository))
    }

    pub fn provider(&self) -> Provider {
        self.repository.provider()
    }

    pub fn catalog(&self) -> &ReportCatalog {
        &self.catalog
    }

    /// Reports `role` may run, in catalog order.
    pub fn catalog_for(&self, role: Role) -> CatalogView {
        CatalogView {
            provider: self.provider(),
            catalog: self
                .catalog
                .list_for_role(role)
                .into_iter()
                .map(|r| r.summary())
                .collect(),
        }
    }

    /// Property and board-member lists, fetched concurrently.
    pub async fn filter_options(&self) -> Result<FilterOptions, ReportError> {
        let (properties, board_members) = futures::future::try_join(
            self.repository.list_properties(),
            self.repository.list_board_members(),
        )
        .await?;

        Ok(FilterOptions {
            provider: self.provider(),
            properties,
            board_members,
        })
    }

    pub async fn run(
        &self,
        report_id: &str,
        role: Role,
        raw_filters: &FilterMap,
    ) -> Result<ReportResult, ReportError> {
        let report = self
            .catalog
            .lookup(report_id)
            .ok_or_else(|| ReportError::NotFound(report_id.to_string()))?;

        if !report.permits(role) {
            tracing::warn!(report = report_id, %role, "report access denied");
            return Err(ReportError::Forbidden {
                report: report.id.clone(),
                role,
            });
        }

        let filters = raw_filters.sanitize(&report.filters);

        let provider = self.provider();
        let view = report
            .view_for(provider)
            .ok_or_else(|| ReportError::no_view(provider))?;

        let rows = self.repository.query_view(view, &filters).await?;
        tracing::info!(
            report = report_id,
            %role,
            %provider,
            filters = filters.len(),
            rows = rows.len(),
            "report run"
        );

        Ok(ReportResult {
            report_id: report.id.clone(),
            title: report.title.clone(),
            provider,
            filters,
            rows,
        })
    }

    /// Whether the active repository answers a ping.
    pub async fn healthy(&self) -> bool {
        match self.repository.ping().await {
            Ok(ok) => ok,
            Err(e) => {
                tracing::warn!(error = %e, "reporting store ping failed");
                false
            }
        }
    }
}
