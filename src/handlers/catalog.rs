use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::{ActivityCategory, ActivityKind};
use crate::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogEntry {
    pub kind: ActivityKind,
    /// Human-readable label for selection lists.
    pub name: String,
    pub category: ActivityCategory,
}

pub fn catalog_router() -> Router<AppState> {
    Router::new().route("/activities", get(list_activities))
}

/// List the fixed activity catalog
#[utoipa::path(
    get,
    path = "/api/v1/catalog/activities",
    responses(
        (status = 200, description = "The closed activity vocabulary", body = [CatalogEntry])
    ),
    tag = "catalog"
)]
pub async fn list_activities() -> impl IntoResponse {
    let entries: Vec<CatalogEntry> = ActivityKind::all()
        .into_iter()
        .map(|kind| CatalogEntry {
            kind,
            name: kind.display_name().to_string(),
            category: kind.category(),
        })
        .collect();

    (StatusCode::OK, Json(entries))
}
