//! HTTP handler for the bloc overview.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::ApiQuery;
use crate::adapters::http::state::AppState;
use crate::application::handlers::GetBlocOverviewQuery;
use crate::domain::foundation::{parse_calendar_date, BlocId};
use crate::domain::overview::BlocOverview;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewParams {
    /// Reference day for growth stage and days since planting.
    pub as_of: Option<String>,
}

/// GET /api/blocs/:bloc_id/overview
pub async fn get_bloc_overview(
    State(state): State<AppState>,
    Path(bloc_id): Path<String>,
    ApiQuery(params): ApiQuery<OverviewParams>,
) -> Result<Json<BlocOverview>, ApiError> {
    let bloc_id = BlocId::new(bloc_id)?;
    let as_of = params
        .as_of
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| parse_calendar_date("asOf", &raw))
        .transpose()?;

    let overview = state
        .bloc_overview_handler()
        .handle(GetBlocOverviewQuery {
            bloc_id: bloc_id.clone(),
            as_of,
        })
        .await
        .map_err(|err| {
            tracing::info!(
                operation = "get_bloc_overview",
                %bloc_id,
                error = %err,
                "Overview failed"
            );
            ApiError::from(err)
        })?;

    Ok(Json(overview))
}
