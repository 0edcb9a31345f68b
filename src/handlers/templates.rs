use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::models::{ActivityDraft, ActivityItem};
use crate::schedule::hst::parse_planting_date;
use crate::schedule::template::{add_custom_activity, RecalculateOptions};
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PlantingDateQuery {
    /// Planting date (HST 0) as `YYYY-MM-DD`.
    pub planting_date: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LoadTemplateQuery {
    /// Planting date (HST 0) as `YYYY-MM-DD`.
    pub planting_date: String,
    /// Shift activities without an HST window by the planting-date delta
    /// instead of keeping their absolute dates.
    #[serde(default)]
    pub shift_non_hst: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveTemplateRequest {
    pub name: String,
    pub description: Option<String>,
    pub planting_date: NaiveDate,
    pub activities: Vec<ActivityItem>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AppendActivityRequest {
    /// The in-progress planning session's activity list.
    pub activities: Vec<ActivityItem>,
    pub draft: ActivityDraft,
}

pub fn templates_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_templates).post(save_template))
        .route("/standard", get(standard_template))
        .route("/activities", post(append_activity))
        .route("/:id", get(load_template).delete(delete_template))
}

/// Build the standard cultivation plan for a planting date
#[utoipa::path(
    get,
    path = "/api/v1/templates/standard",
    params(PlantingDateQuery),
    responses(
        (status = 200, description = "Standard plan anchored to the planting date"),
        (status = 400, description = "Invalid planting date", body = crate::errors::ErrorResponse)
    ),
    tag = "templates"
)]
pub async fn standard_template(
    State(state): State<AppState>,
    Query(query): Query<PlantingDateQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let planting_date = parse_planting_date(&query.planting_date)?;
    let template = state.services.templates.standard_plan(planting_date)?;
    Ok((StatusCode::OK, Json(template)))
}

/// List saved templates
#[utoipa::path(
    get,
    path = "/api/v1/templates",
    responses(
        (status = 200, description = "All stored templates")
    ),
    tag = "templates"
)]
pub async fn list_templates(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let templates = state.services.templates.list_templates().await?;
    Ok((StatusCode::OK, Json(templates)))
}

/// Save the current planning session as a reusable template
#[utoipa::path(
    post,
    path = "/api/v1/templates",
    request_body = SaveTemplateRequest,
    responses(
        (status = 201, description = "Template stored"),
        (status = 400, description = "Invalid template", body = crate::errors::ErrorResponse)
    ),
    tag = "templates"
)]
pub async fn save_template(
    State(state): State<AppState>,
    Json(payload): Json<SaveTemplateRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let template = state
        .services
        .templates
        .save_as_template(
            payload.name,
            payload.description,
            payload.planting_date,
            payload.activities,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(template)))
}

/// Load a stored template re-anchored to a new planting date
#[utoipa::path(
    get,
    path = "/api/v1/templates/{id}",
    params(
        ("id" = Uuid, Path, description = "Template id"),
        LoadTemplateQuery
    ),
    responses(
        (status = 200, description = "Recalculated copy of the template"),
        (status = 400, description = "Invalid planting date", body = crate::errors::ErrorResponse),
        (status = 404, description = "Unknown template", body = crate::errors::ErrorResponse)
    ),
    tag = "templates"
)]
pub async fn load_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<LoadTemplateQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let planting_date = parse_planting_date(&query.planting_date)?;
    let options = RecalculateOptions {
        shift_non_hst_by_delta: query.shift_non_hst,
    };
    let template = state
        .services
        .templates
        .load_recalculated(id, planting_date, options)
        .await?;
    Ok((StatusCode::OK, Json(template)))
}

/// Delete a stored template
#[utoipa::path(
    delete,
    path = "/api/v1/templates/{id}",
    params(("id" = Uuid, Path, description = "Template id")),
    responses(
        (status = 204, description = "Template removed")
    ),
    tag = "templates"
)]
pub async fn delete_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.templates.delete_template(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Validate and append a custom activity to a planning session
#[utoipa::path(
    post,
    path = "/api/v1/templates/activities",
    request_body = AppendActivityRequest,
    responses(
        (status = 200, description = "Activity list with the new entry appended", body = [ActivityItem]),
        (status = 400, description = "Invalid activity", body = crate::errors::ErrorResponse)
    ),
    tag = "templates"
)]
pub async fn append_activity(
    Json(payload): Json<AppendActivityRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let mut activities = payload.activities;
    add_custom_activity(&mut activities, payload.draft)?;
    Ok((StatusCode::OK, Json(activities)))
}
