//! HTTP adapter for the bloc overview read model.

pub mod handlers;

use axum::routing::get;
use axum::Router;

use crate::adapters::http::state::AppState;

/// `GET /blocs/:bloc_id/overview`, relative to `/api`.
pub fn overview_router() -> Router<AppState> {
    Router::new().route("/blocs/:bloc_id/overview", get(handlers::get_bloc_overview))
}
