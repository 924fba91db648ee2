//! REST API endpoints.
//!
//! Axum-based HTTP API for reading the configured scoreboard, editing it,
//! and fetching the derived table and player summaries.

pub mod routes;
pub mod state;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;

use crate::storage::StorageError;
use crate::update::ScoreboardError;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ScoreboardError> for ApiError {
    fn from(err: ScoreboardError) -> Self {
        match err {
            ScoreboardError::Validation(_) | ScoreboardError::DuplicatePlayer(_) => {
                ApiError::BadRequest(err.to_string())
            }
            ScoreboardError::PlayerNotFound(_) | ScoreboardError::ScoreboardNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        tracing::error!("Storage failure: {}", err);
        ApiError::Internal(err.to_string())
    }
}

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/scoreboard", get(routes::scoreboard::get_scoreboard))
        .route("/api/scoreboard/add-wins", post(routes::scoreboard::add_wins))
        .route("/api/scoreboard/update-cell", put(routes::scoreboard::update_cell))
        .route("/api/scoreboard/add-player", post(routes::scoreboard::add_player))
        .route("/api/scoreboard/table", get(routes::view::table))
        .route("/api/scoreboard/summary", get(routes::view::summary))
        .with_state(state)
}
