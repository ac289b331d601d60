//! Request extractors that reject with [`ApiError`] instead of plain text.

use axum::async_trait;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::domain::foundation::CommandMetadata;

/// `Json<T>` whose rejection is a 400 `ErrorResponse`.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    ApiError::bad_request("Invalid JSON request body").with_details(rejection.body_text())
}

/// `Query<T>` whose rejection is a 400 `ErrorResponse`.
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| ApiQuery(value))
            .map_err(|rejection: QueryRejection| {
                ApiError::bad_request("Invalid query string").with_details(rejection.body_text())
            })
    }
}

/// Command metadata for a request, correlated by its `x-request-id`.
pub fn command_metadata(headers: &HeaderMap) -> CommandMetadata {
    CommandMetadata::for_request(
        headers
            .get("x-request-id")
            .and_then(|value| value.to_str().ok()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::CommandSource;
    use axum::http::HeaderValue;

    #[test]
    fn metadata_uses_request_id_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("req-42"));
        let metadata = command_metadata(&headers);
        assert_eq!(metadata.correlation_id(), "req-42");
        assert_eq!(metadata.source(), CommandSource::Api);
    }

    #[test]
    fn metadata_without_header_gets_generated_correlation() {
        let metadata = command_metadata(&HeaderMap::new());
        assert!(!metadata.correlation_id().is_empty());
    }
}
