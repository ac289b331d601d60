//! HTTP adapter - REST API over the crop cycle handlers.
//!
//! All routes live under `/api`. Errors are rendered as
//! `{ "error": ..., "details"?: ... }` by [`ApiError`].

pub mod catalog;
pub mod crop_cycle;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod overview;
pub mod state;

use std::time::Duration;

use axum::http::{HeaderValue, Method, Uri};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ErrorResponse};
pub use middleware::RequestDeadline;
pub use state::AppState;

use crate::domain::foundation::ErrorCategory;

/// The `/api` routes bound to `state`, without service layers.
pub fn api_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(crop_cycle::crop_cycle_router())
        .merge(overview::overview_router())
        .merge(catalog::catalog_router());

    Router::new()
        .nest("/api", api)
        .route("/health", get(health))
        .fallback(route_not_found)
        .with_state(state)
}

/// Cross-cutting layers applied around the API.
#[derive(Debug, Clone)]
pub struct ServiceLayers {
    pub request_timeout: Duration,
    pub cors_origins: Vec<String>,
    pub enable_tracing: bool,
    pub enable_compression: bool,
}

impl ServiceLayers {
    /// Wraps `router` in deadline, CORS, tracing, request id and compression layers.
    pub fn apply(&self, router: Router) -> Router {
        let router = router.layer(axum::middleware::from_fn_with_state(
            RequestDeadline::new(self.request_timeout),
            middleware::deadline_middleware,
        ));
        let router = if self.enable_compression {
            router.layer(CompressionLayer::new())
        } else {
            router
        };
        let router = router.layer(self.cors_layer());
        let router = if self.enable_tracing {
            router.layer(TraceLayer::new_for_http())
        } else {
            router
        };
        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    fn cors_layer(&self) -> CorsLayer {
        let origins: Vec<HeaderValue> = self
            .cors_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(%origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();

        let allow_origin = if origins.is_empty() {
            AllowOrigin::from(Any)
        } else {
            AllowOrigin::list(origins)
        };

        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::new(ErrorCategory::NotFound, format!("No route for {}", uri.path()))
}
