use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status category (e.g. "Conflict", "Bad Request")
    #[schema(example = "Conflict")]
    pub error: String,
    /// Human-readable error description
    #[schema(example = "Field 12 already has an active cultivation season")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// ISO 8601 timestamp when the error occurred
    pub timestamp: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unresolved parent activity: {0}")]
    UnresolvedParent(String),

    #[error("Invalid activity: {0}")]
    InvalidActivity(String),

    #[error("Field {field_id} already has an active cultivation season")]
    ActiveSeasonConflict { field_id: i64 },

    #[error("No eligible assignee for field {field_id}")]
    NoAssignee { field_id: i64 },

    #[error("Materialization incomplete: {} work order(s) failed", failed.len())]
    PartialMaterialization { failed: Vec<String> },

    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::error::DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

impl ServiceError {
    /// Single source of truth for the error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidDate(_) | Self::InvalidActivity(_) | Self::ValidationError(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::ActiveSeasonConflict { .. } => StatusCode::CONFLICT,
            Self::NoAssignee { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UnresolvedParent(_)
            | Self::PartialMaterialization { .. }
            | Self::DatabaseError(_)
            | Self::InternalError(_)
            | Self::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message suitable for HTTP responses. Internal errors return generic
    /// messages to avoid leaking implementation details.
    pub fn response_message(&self) -> String {
        match self {
            Self::DatabaseError(_) => "Database error".to_string(),
            Self::InternalError(_) | Self::Other(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }

    /// Extra detail attached to the response body, where the variant carries
    /// structure worth surfacing (which activities failed to materialize).
    fn response_details(&self) -> Option<String> {
        match self {
            Self::PartialMaterialization { failed } => Some(failed.join(", ")),
            _ => None,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let err = ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.response_message(),
            details: self.response_details(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(err)).into_response()
    }
}
