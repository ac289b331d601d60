//! HTTP handlers for crop cycle endpoints.
//!
//! Each handler validates its payload into a typed command or query, runs
//! the application handler and maps the outcome onto JSON.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::{command_metadata, ApiJson, ApiQuery};
use crate::adapters::http::state::AppState;
use crate::application::handlers::{
    GetActiveCropCycleQuery, GetCropCycleHistoryQuery, ValidateCropCycleClosureQuery,
};
use crate::domain::foundation::Timestamp;

use super::dto::{
    BlocQueryParams, CloseCropCycleRequest, ClosureValidationResponse, CreateCropCycleRequest,
    CropCycleResponse, ValidateClosureRequest,
};

/// GET /api/crop-cycles/active?blocId= - The bloc's active cycle, or `null`
pub async fn get_active_cycle(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<BlocQueryParams>,
) -> Result<Json<Option<CropCycleResponse>>, ApiError> {
    let bloc_id = params.bloc_id()?;

    let cycle = state
        .get_active_cycle_handler()
        .handle(GetActiveCropCycleQuery {
            bloc_id: bloc_id.clone(),
        })
        .await
        .map_err(|err| {
            tracing::warn!(
                operation = "get_active_cycle",
                %bloc_id,
                code = %err.code,
                "Query failed"
            );
            ApiError::from(err)
        })?;

    let today = Timestamp::now().date();
    Ok(Json(
        cycle.map(|cycle| CropCycleResponse::from_cycle(&cycle, today)),
    ))
}

/// GET /api/crop-cycles/history?blocId= - All cycles of a bloc, newest first
pub async fn get_cycle_history(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<BlocQueryParams>,
) -> Result<Json<Vec<CropCycleResponse>>, ApiError> {
    let bloc_id = params.bloc_id()?;

    let history = state
        .get_cycle_history_handler()
        .handle(GetCropCycleHistoryQuery {
            bloc_id: bloc_id.clone(),
        })
        .await
        .map_err(|err| {
            tracing::warn!(
                operation = "get_cycle_history",
                %bloc_id,
                code = %err.code,
                "Query failed"
            );
            ApiError::from(err)
        })?;

    let today = Timestamp::now().date();
    Ok(Json(
        history
            .iter()
            .map(|cycle| CropCycleResponse::from_cycle(cycle, today))
            .collect(),
    ))
}

/// POST /api/crop-cycles - Open a new cycle on a bloc
pub async fn create_cycle(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(request): ApiJson<CreateCropCycleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = request.into_command()?;
    let bloc_id = cmd.bloc_id.clone();

    let cycle = state
        .create_cycle_handler()
        .handle(cmd, command_metadata(&headers))
        .await
        .map_err(|err| {
            tracing::info!(operation = "create_cycle", %bloc_id, error = %err, "Create rejected");
            ApiError::from(err)
        })?;

    let today = Timestamp::now().date();
    Ok((
        StatusCode::CREATED,
        Json(CropCycleResponse::from_cycle(&cycle, today)),
    ))
}

/// POST /api/crop-cycles/validate - Check whether a cycle may be closed
pub async fn validate_closure(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ValidateClosureRequest>,
) -> Result<Json<ClosureValidationResponse>, ApiError> {
    let cycle_id = request.cycle_id()?;

    let report = state
        .validate_closure_handler()
        .handle(ValidateCropCycleClosureQuery { cycle_id })
        .await
        .map_err(|err| {
            tracing::info!(
                operation = "validate_closure",
                %cycle_id,
                error = %err,
                "Validation failed"
            );
            ApiError::from(err)
        })?;

    Ok(Json(report.into()))
}

/// POST /api/crop-cycles/close - Close a cycle after harvest
pub async fn close_cycle(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(request): ApiJson<CloseCropCycleRequest>,
) -> Result<Json<CropCycleResponse>, ApiError> {
    let cmd = request.into_command()?;
    let cycle_id = cmd.cycle_id;

    let cycle = state
        .close_cycle_handler()
        .handle(cmd, command_metadata(&headers))
        .await
        .map_err(|err| {
            tracing::info!(operation = "close_cycle", %cycle_id, error = %err, "Close rejected");
            ApiError::from(err)
        })?;

    let today = Timestamp::now().date();
    Ok(Json(CropCycleResponse::from_cycle(&cycle, today)))
}
