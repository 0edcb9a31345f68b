use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::entities::work_order::WorkOrderStatus;
use crate::errors::ServiceError;
use crate::services::work_orders::WorkOrderFilters;
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WorkOrderQuery {
    pub field_id: Option<i64>,
    pub season_id: Option<Uuid>,
    pub assignee: Option<String>,
    /// One of `pending`, `in_progress`, `completed`, `overdue`, `cancelled`.
    pub status: Option<String>,
    pub start_from: Option<NaiveDate>,
    pub end_until: Option<NaiveDate>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}
fn default_limit() -> u64 {
    50
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: WorkOrderStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProgressRequest {
    /// Completion percentage, 0-100.
    pub progress: i32,
}

impl WorkOrderQuery {
    fn into_filters(self) -> Result<WorkOrderFilters, ServiceError> {
        let status = self
            .status
            .as_deref()
            .map(|s| {
                WorkOrderStatus::from_str(s).map_err(|_| {
                    ServiceError::ValidationError(format!("invalid work order status: {s}"))
                })
            })
            .transpose()?;

        Ok(WorkOrderFilters {
            field_id: self.field_id,
            cultivation_season_id: self.season_id,
            assignee: self.assignee,
            status,
            start_from: self.start_from,
            end_until: self.end_until,
        })
    }
}

pub fn work_orders_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_work_orders))
        .route("/schedule", get(schedule_board))
        .route("/mark-overdue", post(mark_overdue))
        .route("/:id", get(get_work_order))
        .route("/:id/status", put(update_status))
        .route("/:id/progress", put(update_progress))
        .route("/:id/cancel", post(cancel_work_order))
}

/// List work orders with optional filtering
#[utoipa::path(
    get,
    path = "/api/v1/work-orders",
    params(WorkOrderQuery),
    responses(
        (status = 200, description = "Work orders matching the filters"),
        (status = 400, description = "Invalid filter", body = crate::errors::ErrorResponse)
    ),
    tag = "work-orders"
)]
pub async fn list_work_orders(
    State(state): State<AppState>,
    Query(query): Query<WorkOrderQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let page = query.page.max(1);
    let limit = query.limit.clamp(1, 200);
    let filters = query.into_filters()?;

    let (orders, total) = state
        .services
        .work_orders
        .list_work_orders(filters, page, limit)
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "work_orders": orders,
            "total": total,
            "page": page,
            "limit": limit,
        })),
    ))
}

/// Day-indexed schedule view for calendar and accordion UIs
#[utoipa::path(
    get,
    path = "/api/v1/work-orders/schedule",
    params(WorkOrderQuery),
    responses(
        (status = 200, description = "Past and upcoming day buckets")
    ),
    tag = "work-orders"
)]
pub async fn schedule_board(
    State(state): State<AppState>,
    Query(query): Query<WorkOrderQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let filters = query.into_filters()?;
    let today = Utc::now().date_naive();

    let board = state
        .services
        .work_orders
        .schedule_board(filters, today)
        .await?;
    Ok((StatusCode::OK, Json(board)))
}

/// Get a work order by id
#[utoipa::path(
    get,
    path = "/api/v1/work-orders/{id}",
    params(("id" = Uuid, Path, description = "Work order id")),
    responses(
        (status = 200, description = "Work order details"),
        (status = 404, description = "Unknown work order", body = crate::errors::ErrorResponse)
    ),
    tag = "work-orders"
)]
pub async fn get_work_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state
        .services
        .work_orders
        .get_work_order(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("work order {id}")))?;
    Ok((StatusCode::OK, Json(order)))
}

/// Update a work order's status from a field report or approval flow
#[utoipa::path(
    put,
    path = "/api/v1/work-orders/{id}/status",
    params(("id" = Uuid, Path, description = "Work order id")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated"),
        (status = 404, description = "Unknown work order", body = crate::errors::ErrorResponse)
    ),
    tag = "work-orders"
)]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state
        .services
        .work_orders
        .update_status(id, payload.status)
        .await?;
    Ok((StatusCode::OK, Json(order)))
}

/// Record reported progress on a work order
#[utoipa::path(
    put,
    path = "/api/v1/work-orders/{id}/progress",
    params(("id" = Uuid, Path, description = "Work order id")),
    request_body = UpdateProgressRequest,
    responses(
        (status = 200, description = "Progress updated"),
        (status = 404, description = "Unknown work order", body = crate::errors::ErrorResponse)
    ),
    tag = "work-orders"
)]
pub async fn update_progress(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProgressRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state
        .services
        .work_orders
        .update_progress(id, payload.progress)
        .await?;
    Ok((StatusCode::OK, Json(order)))
}

/// Cancel a work order
#[utoipa::path(
    post,
    path = "/api/v1/work-orders/{id}/cancel",
    params(("id" = Uuid, Path, description = "Work order id")),
    responses(
        (status = 200, description = "Work order cancelled"),
        (status = 404, description = "Unknown work order", body = crate::errors::ErrorResponse)
    ),
    tag = "work-orders"
)]
pub async fn cancel_work_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state.services.work_orders.cancel_work_order(id).await?;
    Ok((StatusCode::OK, Json(order)))
}

/// Sweep open work orders whose end date has passed into `overdue`
#[utoipa::path(
    post,
    path = "/api/v1/work-orders/mark-overdue",
    responses(
        (status = 200, description = "Number of work orders marked overdue")
    ),
    tag = "work-orders"
)]
pub async fn mark_overdue(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let today = Utc::now().date_naive();
    let updated = state.services.work_orders.mark_overdue(today).await?;
    Ok((StatusCode::OK, Json(json!({ "updated": updated }))))
}
