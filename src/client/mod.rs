//! Command-line report runner.
//!
//! Talks to the reporting API the way the dashboard does: load the caller's
//! catalog, pick a report, send only the filters that report declares, and
//! render the rows.

pub mod render;

use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::model::{Record, Role};

/// Error type for the API client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid server URL: {0}")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("no reports available for this account")]
    EmptyCatalog,

    #[error("report {0} is not in your catalog")]
    UnknownReport(String),

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub filters: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogResponse {
    pub provider: String,
    pub catalog: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FiltersResponse {
    pub provider: String,
    #[serde(default)]
    pub properties: Vec<Record>,
    #[serde(default, rename = "boardMembers")]
    pub board_members: Vec<Record>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportHeader {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunResponse {
    pub report: ReportHeader,
    pub provider: String,
    pub count: usize,
    pub rows: Vec<Record>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Rows of a report run plus what produced them.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub entry: CatalogEntry,
    /// Filters sent to the server, in the report's declared order.
    pub applied: Vec<(String, String)>,
    pub response: RunResponse,
}

/// HTTP client for the reporting API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base,
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub async fn catalog(&self) -> Result<CatalogResponse, ClientError> {
        self.get(&["reports", "catalog"], &[]).await
    }

    pub async fn filters(&self) -> Result<FiltersResponse, ClientError> {
        self.get(&["reports", "filters"], &[]).await
    }

    pub async fn run(
        &self,
        report_id: &str,
        filters: &[(String, String)],
    ) -> Result<RunResponse, ClientError> {
        self.get(&["reports", report_id], filters).await
    }

    /// Pick a report from the caller's catalog (the first one when `report`
    /// is `None`) and run it with the filters it declares. Other filters
    /// and blank values are not sent.
    pub async fn run_from_catalog(
        &self,
        report: Option<&str>,
        filters: &[(String, String)],
    ) -> Result<RunOutcome, ClientError> {
        let catalog = self.catalog().await?;
        let entry = select_report(&catalog.catalog, report)?.clone();
        let applied = declared_filters(&entry, filters);
        let response = self.run(&entry.id, &applied).await?;
        Ok(RunOutcome {
            entry,
            applied,
            response,
        })
    }

    /// URL for `/api/<segments...>`, each segment percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(String, String)],
    ) -> Result<T, ClientError> {
        let mut request = self.http.get(self.endpoint(segments)).query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => default_message(status),
        };
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

fn default_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string()
}

/// Find `id` in `catalog`, or take the first entry.
pub fn select_report<'a>(
    catalog: &'a [CatalogEntry],
    id: Option<&str>,
) -> Result<&'a CatalogEntry, ClientError> {
    match id {
        Some(id) => catalog
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| ClientError::UnknownReport(id.to_string())),
        None => catalog.first().ok_or(ClientError::EmptyCatalog),
    }
}

/// Keep the non-blank filters `entry` declares, in declared order.
pub fn declared_filters(entry: &CatalogEntry, filters: &[(String, String)]) -> Vec<(String, String)> {
    entry
        .filters
        .iter()
        .filter_map(|key| {
            filters
                .iter()
                .rev()
                .find(|(k, v)| k == key && !v.trim().is_empty())
                .cloned()
        })
        .collect()
}
