use crate::interface_adapters::auth::authenticate;
use crate::interface_adapters::handlers::{ApiError, map_matchmaking_error};
use crate::interface_adapters::protocol::MatchResponse;
use crate::interface_adapters::state::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use std::sync::Arc;
use tracing::info;

// Poll for a formed match. A successful poll consumes the match for the whole team.
pub async fn claim(
    State(state): State<Arc<AppState>>,
    Path(ticket): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<MatchResponse>, ApiError> {
    authenticate(&state, &headers, &body)?;

    let formed = {
        let mut matchmaker = state.matchmaker.lock().await;
        matchmaker.claim(&ticket)
    }
    .map_err(map_matchmaking_error)?;

    info!(%ticket, match_id = %formed.match_id, region = %formed.region, "match claimed");

    Ok(Json(MatchResponse {
        players: formed.user_ids(),
        match_id: formed.match_id,
    }))
}
