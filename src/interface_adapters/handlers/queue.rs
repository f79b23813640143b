use crate::domain::Region;
use crate::interface_adapters::auth::authenticate;
use crate::interface_adapters::handlers::{ApiError, error_response, map_matchmaking_error};
use crate::interface_adapters::protocol::{QueueRequest, QueueResponse};
use crate::interface_adapters::state::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use std::sync::Arc;
use tracing::info;

// Enqueue a player; matches are formed later by the sweeper.
pub async fn enqueue(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<QueueResponse>, ApiError> {
    authenticate(&state, &headers, &body)?;

    // Parse only after the signature checks out; the raw bytes are what was signed.
    let request: QueueRequest = serde_json::from_slice(&body)
        .map_err(|_| error_response(StatusCode::BAD_REQUEST, "invalid request body"))?;
    let user_id = request
        .user_id()
        .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, "pid must be an integer"))?;
    let region = Region::resolve(request.region.as_deref());

    let now = state.clock.now_epoch_seconds();
    let ticket_id = {
        let mut matchmaker = state.matchmaker.lock().await;
        matchmaker.enqueue(user_id.clone(), request.elo, region, now)
    }
    .map_err(map_matchmaking_error)?;

    info!(%user_id, %region, ticket = %ticket_id, "player queued");

    Ok(Json(QueueResponse { ticket_id }))
}

// Withdraw a ticket that is still waiting in its queue.
pub async fn cancel(
    State(state): State<Arc<AppState>>,
    Path(ticket): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, ApiError> {
    authenticate(&state, &headers, &body)?;

    let player = {
        let mut matchmaker = state.matchmaker.lock().await;
        matchmaker.cancel(&ticket)
    }
    .map_err(map_matchmaking_error)?;

    info!(user_id = %player.user_id, region = %player.region, %ticket, "queue cancelled");

    Ok("Queue cancelled")
}
