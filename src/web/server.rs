//! Axum web server for the reporting API.

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::reports;
use crate::auth::{bearer_token, AuthError, JwtConfig};
use crate::config::Settings;
use crate::service::ReportingService;

/// Application state shared across handlers
pub struct AppState {
    pub service: ReportingService,
    pub jwt: JwtConfig,
}

/// Build the axum router with all routes
pub fn router(state: Arc<AppState>, client_url: Option<&str>) -> Router {
    let protected = Router::new()
        .route("/reports/catalog", get(reports::get_catalog))
        .route("/reports/filters", get(reports::get_filters))
        .route("/reports/{report_id}", get(reports::run_report))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let api = Router::new()
        .route("/health", get(reports::health))
        .merge(protected);

    Router::new()
        .nest("/api", api)
        .layer(cors_layer(client_url))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the web server
pub async fn serve(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    settings.validate()?;

    let service = ReportingService::from_settings(&settings)?;
    let jwt = JwtConfig::new(&settings.auth.jwt_secret, settings.auth.token_ttl_hours);
    let provider = service.provider();

    let state = Arc::new(AppState { service, jwt });
    let app = router(state, settings.server.client_url.as_deref());

    let addr = settings.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, %provider, "reporting API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Reject requests without a valid bearer token; pass the claims on.
async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = {
        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
            .ok_or(AuthError::MissingToken)?;
        state.jwt.verify(token)?
    };
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

fn cors_layer(client_url: Option<&str>) -> CorsLayer {
    let origin = client_url.and_then(|url| match url.parse::<HeaderValue>() {
        Ok(origin) => Some(origin),
        Err(_) => {
            tracing::warn!(%url, "ignoring unparsable client_url for CORS");
            None
        }
    });

    match origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
