use crate::interface_adapters::handlers::matches::claim;
use crate::interface_adapters::handlers::queue::{cancel, enqueue};
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

// Build the HTTP router for matchmaking endpoints.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/queue", post(enqueue))
        .route("/queue/{ticket}", delete(cancel))
        .route("/match/{ticket}", get(claim))
        .with_state(state)
}
