pub mod matches;
pub mod queue;

use crate::domain::MatchmakingError;
use crate::interface_adapters::protocol::ErrorResponse;
use axum::{Json, http::StatusCode};

// Error half of every handler result.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

// Helper to build a JSON error response.
pub fn error_response(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            message: message.to_string(),
        }),
    )
}

// Maps state-store errors to HTTP responses. Every flavor of missing ticket
// collapses into one 404 so callers learn nothing about queue contents.
pub fn map_matchmaking_error(err: MatchmakingError) -> ApiError {
    match err {
        MatchmakingError::AlreadyQueued { .. } => {
            error_response(StatusCode::CONFLICT, "player is already queued")
        }
        MatchmakingError::NotFound => error_response(StatusCode::NOT_FOUND, "ticket not found"),
    }
}
