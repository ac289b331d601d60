//! Request deadline middleware.
//!
//! A request that does not finish within the configured deadline is answered
//! with 503 and a regular `ErrorResponse`. The work is not retried.
//!
//! ```ignore
//! let app = Router::new()
//!     .nest("/api", routes)
//!     .layer(middleware::from_fn_with_state(
//!         RequestDeadline::new(Duration::from_secs(15)),
//!         deadline_middleware,
//!     ));
//! ```

use std::time::Duration;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::ApiError;

/// Deadline applied to each request.
#[derive(Debug, Clone, Copy)]
pub struct RequestDeadline(Duration);

impl RequestDeadline {
    pub fn new(limit: Duration) -> Self {
        Self(limit)
    }

    pub fn limit(&self) -> Duration {
        self.0
    }
}

pub async fn deadline_middleware(
    State(deadline): State<RequestDeadline>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    match tokio::time::timeout(deadline.limit(), next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(
                %method,
                %path,
                limit_ms = deadline.limit().as_millis() as u64,
                "Request exceeded deadline"
            );
            ApiError::unavailable(format!("{} {} timed out", method, path)).into_response()
        }
    }
}
