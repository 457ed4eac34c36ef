//! API error responses.
//!
//! Every failure leaves the server as `{ "message": ... }` with a status
//! that tells the failure classes apart.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::auth::AuthError;
use crate::service::ReportError;

/// Error returned by API handlers and middleware.
#[derive(Debug)]
pub enum ApiError {
    Report(ReportError),
    Auth(AuthError),
    Internal(&'static str),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Report(ReportError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Report(ReportError::Forbidden { .. }) => StatusCode::FORBIDDEN,
            ApiError::Report(ReportError::NotImplemented(_)) => StatusCode::NOT_IMPLEMENTED,
            ApiError::Report(ReportError::Execution(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Auth(AuthError::Encode(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::Report(e) => e.public_message(),
            ApiError::Auth(AuthError::Encode(_)) => "Internal server error".to_string(),
            ApiError::Auth(e) => e.to_string(),
            ApiError::Internal(msg) => msg.to_string(),
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        ApiError::Report(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            match &self {
                ApiError::Report(e) => tracing::error!(error = %e, "report request failed"),
                ApiError::Auth(e) => tracing::error!(error = %e, "auth failure"),
                ApiError::Internal(msg) => tracing::error!(%msg, "internal error"),
            }
        }
        (status, Json(json!({ "message": self.message() }))).into_response()
    }
}
