//! Router assembly
//!
//! API routes, static pages and the middleware stack. Used by both the HTTP
//! server and the oneshot integration tests.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_middleware;
use axum::routing::any;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::api;
use crate::core::{Config, ServerState};
use crate::middleware;
use crate::upload::MAX_BODY_SIZE;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// JSON API routes (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Product API - mutations behind the admin gate
        .merge(api::products::router())
        // Report API - public
        .merge(api::reports::router())
        // Health API - public
        .merge(api::health::router())
        // Unmatched /api/* answers in the API error shape
        .route("/api", any(api::api_not_found))
        .route("/api/{*rest}", any(api::api_not_found))
}

/// Dashboard pages, uploaded images and the public directory
fn page_router(config: &Config) -> Router<ServerState> {
    let public = &config.public_dir;
    Router::new()
        .route_service("/", ServeFile::new(public.join("dashboard.html")))
        .route_service("/login", ServeFile::new(public.join("login.html")))
        .nest_service("/uploads", ServeDir::new(&config.upload_dir))
        .fallback_service(ServeDir::new(public))
}

/// Build a fully configured application with all middleware
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        .merge(page_router(&state.config))
        // Multipart bodies carry up to one 5MB image
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        // ========== Tower HTTP Middleware ==========
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Request logging
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        // Trace - Request tracing
        .layer(TraceLayer::new_for_http())
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
}
