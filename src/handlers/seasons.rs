use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::entities::cultivation_season::SeasonStatus;
use crate::errors::ServiceError;
use crate::models::ActivityItem;
use crate::services::seasons::MaterializeRequest;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSeasonRequest {
    pub field_id: i64,
    pub planting_date: NaiveDate,
    /// Finalized planning-session activities to expand into work orders.
    pub activities: Vec<ActivityItem>,
    pub created_by: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SeasonFilters {
    pub field_id: Option<i64>,
    /// `active` or `completed`.
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MaterializeResponse<S, W> {
    pub season: S,
    pub work_orders: Vec<W>,
}

pub fn seasons_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_seasons).post(create_season))
        .route("/:id", get(get_season))
        .route("/:id/complete", post(complete_season))
}

/// Materialize a season: one season record plus one work order per activity
#[utoipa::path(
    post,
    path = "/api/v1/seasons",
    request_body = CreateSeasonRequest,
    responses(
        (status = 201, description = "Season and work orders created"),
        (status = 404, description = "Unknown field", body = crate::errors::ErrorResponse),
        (status = 409, description = "Field already has an active season", body = crate::errors::ErrorResponse),
        (status = 422, description = "No eligible assignee", body = crate::errors::ErrorResponse)
    ),
    tag = "seasons"
)]
pub async fn create_season(
    State(state): State<AppState>,
    Json(payload): Json<CreateSeasonRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let outcome = state
        .services
        .seasons
        .materialize(MaterializeRequest {
            field_id: payload.field_id,
            planting_date: payload.planting_date,
            activities: payload.activities,
            created_by: payload.created_by,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MaterializeResponse {
            season: outcome.season,
            work_orders: outcome.work_orders,
        }),
    ))
}

/// List cultivation seasons
#[utoipa::path(
    get,
    path = "/api/v1/seasons",
    params(SeasonFilters),
    responses(
        (status = 200, description = "Seasons matching the filters"),
        (status = 400, description = "Invalid status filter", body = crate::errors::ErrorResponse)
    ),
    tag = "seasons"
)]
pub async fn list_seasons(
    State(state): State<AppState>,
    Query(filters): Query<SeasonFilters>,
) -> Result<impl IntoResponse, ServiceError> {
    let status = filters
        .status
        .as_deref()
        .map(|s| {
            SeasonStatus::from_str(s)
                .map_err(|_| ServiceError::ValidationError(format!("invalid season status: {s}")))
        })
        .transpose()?;

    let seasons = state
        .services
        .seasons
        .list_seasons(filters.field_id, status)
        .await?;
    Ok((StatusCode::OK, Json(seasons)))
}

/// Get one season
#[utoipa::path(
    get,
    path = "/api/v1/seasons/{id}",
    params(("id" = Uuid, Path, description = "Season id")),
    responses(
        (status = 200, description = "Season details"),
        (status = 404, description = "Unknown season", body = crate::errors::ErrorResponse)
    ),
    tag = "seasons"
)]
pub async fn get_season(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let season = state
        .services
        .seasons
        .get_season(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("season {id}")))?;
    Ok((StatusCode::OK, Json(season)))
}

/// Complete a season, freeing its field for the next one
#[utoipa::path(
    post,
    path = "/api/v1/seasons/{id}/complete",
    params(("id" = Uuid, Path, description = "Season id")),
    responses(
        (status = 200, description = "Season completed"),
        (status = 404, description = "Unknown season", body = crate::errors::ErrorResponse)
    ),
    tag = "seasons"
)]
pub async fn complete_season(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let season = state.services.seasons.complete_season(id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({
            "id": season.id,
            "status": season.status,
            "message": format!("Season {} completed", season.name),
        })),
    ))
}
