//! Report API handlers.
//!
//! The caller's role comes from the verified token; role checks happen per
//! report in the service.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Serialize;
use std::sync::Arc;

use super::error::ApiError;
use super::server::AppState;
use crate::auth::Claims;
use crate::config::Provider;
use crate::filters::FilterMap;
use crate::model::Record;
use crate::service::{CatalogView, FilterOptions, ReportError};

#[derive(Debug, Serialize)]
pub struct ReportRef {
    pub id: String,
    pub title: String,
}

/// Body of a successful report run.
#[derive(Debug, Serialize)]
pub struct RunReportResponse {
    pub report: ReportRef,
    pub provider: Provider,
    pub count: usize,
    pub rows: Vec<Record>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub provider: Provider,
}

/// GET /api/reports/catalog - Reports the caller may run
pub async fn get_catalog(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Json<CatalogView> {
    Json(state.service.catalog_for(claims.role))
}

/// GET /api/reports/filters - Lookup lists for filter pickers
pub async fn get_filters(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FilterOptions>, ApiError> {
    match state.service.filter_options().await {
        Ok(options) => Ok(Json(options)),
        Err(ReportError::Execution(e)) => {
            tracing::error!(error = %e, "loading filter options failed");
            Err(ApiError::Internal("Failed to load report filters"))
        }
        Err(other) => Err(other.into()),
    }
}

/// GET /api/reports/{report_id} - Run a report with query-string filters
pub async fn run_report(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(report_id): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<RunReportResponse>, ApiError> {
    let raw: FilterMap = params.into_iter().collect();
    let result = state.service.run(&report_id, claims.role, &raw).await?;

    Ok(Json(RunReportResponse {
        count: result.row_count(),
        report: ReportRef {
            id: result.report_id,
            title: result.title,
        },
        provider: result.provider,
        rows: result.rows,
    }))
}

/// GET /api/health - Whether the reporting store answers
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let healthy = state.service.healthy().await;
    let body = HealthResponse {
        status: if healthy { "ok" } else { "degraded" },
        provider: state.service.provider(),
    };
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body))
}
