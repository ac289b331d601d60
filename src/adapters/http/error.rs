//! HTTP error mapping.
//!
//! Every handler error is reduced to an [`ErrorCategory`] and rendered as
//! `{ "error": ..., "details"?: ... }` with the matching status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::application::handlers::{
    CloseCropCycleError, CreateCropCycleError, GetBlocOverviewError,
    ValidateCropCycleClosureError,
};
use crate::domain::foundation::{DomainError, ErrorCategory, ValidationError};

/// JSON error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// An error ready to be returned from an axum handler.
#[derive(Debug)]
pub struct ApiError {
    category: ErrorCategory,
    message: String,
    details: Option<String>,
}

impl ApiError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Validation, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Unavailable, message)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    pub fn status(&self) -> StatusCode {
        status_for(self.category)
    }
}

/// Status code for each error category.
pub fn status_for(category: ErrorCategory) -> StatusCode {
    match category {
        ErrorCategory::Validation => StatusCode::BAD_REQUEST,
        ErrorCategory::Conflict => StatusCode::CONFLICT,
        ErrorCategory::Unsupported => StatusCode::NOT_IMPLEMENTED,
        ErrorCategory::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCategory::NotFound => StatusCode::NOT_FOUND,
        ErrorCategory::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Storage details stay in the logs.
        let body = match self.category {
            ErrorCategory::Internal => {
                tracing::error!(message = %self.message, "Request failed");
                ErrorResponse {
                    error: "Internal server error".to_string(),
                    details: None,
                }
            }
            ErrorCategory::Unavailable => {
                tracing::warn!(message = %self.message, "Request failed transiently");
                ErrorResponse {
                    error: "Service temporarily unavailable, please retry".to_string(),
                    details: None,
                }
            }
            _ => ErrorResponse {
                error: self.message,
                details: self.details,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let field = err.field().to_string();
        ApiError::bad_request(err.to_string()).with_details(field)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let details = err.details.get("field").cloned();
        ApiError {
            category: err.category(),
            message: err.message,
            details,
        }
    }
}

impl From<CreateCropCycleError> for ApiError {
    fn from(err: CreateCropCycleError) -> Self {
        match err {
            CreateCropCycleError::Validation(e) => e.into(),
            CreateCropCycleError::Domain(e) => e.into(),
            other => ApiError::new(other.category(), other.to_string()),
        }
    }
}

impl From<CloseCropCycleError> for ApiError {
    fn from(err: CloseCropCycleError) -> Self {
        match err {
            CloseCropCycleError::Domain(e) => e.into(),
            other => ApiError::new(other.category(), other.to_string()),
        }
    }
}

impl From<ValidateCropCycleClosureError> for ApiError {
    fn from(err: ValidateCropCycleClosureError) -> Self {
        match err {
            ValidateCropCycleClosureError::Domain(e) => e.into(),
            other => ApiError::new(other.category(), other.to_string()),
        }
    }
}

impl From<GetBlocOverviewError> for ApiError {
    fn from(err: GetBlocOverviewError) -> Self {
        match err {
            GetBlocOverviewError::Domain(e) => e.into(),
            other => ApiError::new(other.category(), other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{BlocId, ErrorCode};

    #[test]
    fn categories_map_to_status_codes() {
        assert_eq!(status_for(ErrorCategory::Validation), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCategory::Conflict), StatusCode::CONFLICT);
        assert_eq!(
            status_for(ErrorCategory::Unsupported),
            StatusCode::NOT_IMPLEMENTED
        );
        assert_eq!(
            status_for(ErrorCategory::Unavailable),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(status_for(ErrorCategory::NotFound), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_error_carries_field_as_details() {
        let err: ApiError = ValidationError::empty_field("blocId").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.details.as_deref(), Some("blocId"));
    }

    #[test]
    fn active_cycle_conflict_is_409() {
        let err: ApiError =
            CreateCropCycleError::ActiveCycleExists(BlocId::new("F1").unwrap()).into();
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn internal_errors_hide_storage_details() {
        let err: ApiError =
            DomainError::new(ErrorCode::DatabaseError, "relation crop_cycles does not exist")
                .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unsupported_is_501() {
        let err: ApiError = DomainError::unsupported("close_cycle").into();
        assert_eq!(err.status(), StatusCode::NOT_IMPLEMENTED);
    }
}
