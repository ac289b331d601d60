//! Route configuration for crop cycle endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    close_cycle, create_cycle, get_active_cycle, get_cycle_history, validate_closure,
};
use crate::adapters::http::state::AppState;

/// Crop cycle routes, relative to `/api`.
///
/// - `GET /crop-cycles/active?blocId=`
/// - `GET /crop-cycles/history?blocId=`
/// - `POST /crop-cycles`
/// - `POST /crop-cycles/validate`
/// - `POST /crop-cycles/close`
pub fn crop_cycle_router() -> Router<AppState> {
    Router::new()
        .route("/crop-cycles", post(create_cycle))
        .route("/crop-cycles/active", get(get_active_cycle))
        .route("/crop-cycles/history", get(get_cycle_history))
        .route("/crop-cycles/validate", post(validate_closure))
        .route("/crop-cycles/close", post(close_cycle))
}
