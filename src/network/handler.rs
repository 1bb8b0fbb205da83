//! Request Handlers
//!
//! Read-only HTTP access to table files.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::TableDbError;
use crate::storage::{Record, TableStore};

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Failure of an API request
#[derive(Debug)]
pub enum ApiError {
    /// Table file does not exist (404)
    TableNotFound(String),

    /// Parse or I/O failure (500); details go to the log, not the client
    Internal(String),
}

impl From<TableDbError> for ApiError {
    fn from(err: TableDbError) -> Self {
        match err {
            TableDbError::TableNotFound(table) => ApiError::TableNotFound(table),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::TableNotFound(table) => (
                StatusCode::NOT_FOUND,
                format!("Table \"{}\" not found", table),
            ),
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "error reading table");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// `GET /records/:table`
///
/// The load is blocking file I/O, so it runs off the async workers.
pub async fn get_records(
    State(store): State<TableStore>,
    Path(table): Path<String>,
) -> Result<Json<Vec<Record>>, ApiError> {
    tracing::debug!(table = %table, "records requested");

    let records = tokio::task::spawn_blocking(move || store.load(&table))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(records))
}
