//! HTTP API for the reporting service.
//!
//! All report routes require a bearer token; `/api/health` is public.

mod error;
mod reports;
mod server;

pub use error::ApiError;
pub use reports::{HealthResponse, ReportRef, RunReportResponse};
pub use server::*;
