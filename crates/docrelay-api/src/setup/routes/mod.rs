//! Route configuration and setup.
//!
//! Relay and analyze-page routes live here; health checks in [health](health).

mod health;

use crate::handlers;
use crate::middleware::body_limit_middleware;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use docrelay_core::Config;
use docrelay_infra::request_id_middleware;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Setup all application routes
pub async fn setup_routes(
    config: &Config,
    state: Arc<AppState>,
) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    tracing::info!(
        http_concurrency_limit = config.http_concurrency_limit,
        max_request_body_bytes = config.max_request_body_bytes,
        "HTTP limits enabled"
    );

    let app = public_routes(state.clone())
        .merge(relay_routes())
        .merge(analyze_routes())
        .layer(ConcurrencyLimitLayer::new(config.http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(config.max_request_body_bytes))
        .layer(axum::middleware::from_fn(body_limit_middleware))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}

fn public_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/health",
            get({
                let state = state.clone();
                move || {
                    let state = state.clone();
                    async { health::health_check(state).await }
                }
            }),
        )
        .route("/live", get(health::liveness_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::ApiDoc::openapi()) }),
        )
}

fn relay_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/analyze-document",
            post(handlers::analyze_document::analyze_document),
        )
        .route("/query", post(handlers::query::query))
}

fn analyze_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/analyze", get(handlers::analyze_page::load_analyze_page))
        .route(
            "/analyze/validate-file",
            post(handlers::analyze_page::check_file),
        )
        .route(
            handlers::analyze_page::UPLOAD_DOCUMENT_PATH,
            post(handlers::analyze_page::upload_document),
        )
        .route(
            handlers::analyze_page::EXPORT_DOCUMENT_PATH,
            post(handlers::analyze_page::export_document),
        )
}
