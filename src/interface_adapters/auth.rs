use crate::interface_adapters::handlers::{ApiError, error_response};
use crate::interface_adapters::state::AppState;
use axum::http::{HeaderMap, StatusCode};
use tracing::debug;

pub const TIMESTAMP_HEADER: &str = "x-timestamp";
pub const SIGNATURE_HEADER: &str = "x-signature";

// Gate every mutating endpoint: reject before any matchmaking state is touched.
pub fn authenticate(state: &AppState, headers: &HeaderMap, body: &[u8]) -> Result<(), ApiError> {
    let now = state.clock.now_epoch_seconds();

    state
        .verifier
        .verify(
            header(headers, TIMESTAMP_HEADER),
            header(headers, SIGNATURE_HEADER),
            body,
            now,
        )
        .map_err(|err| {
            // The reason stays in the logs; clients get the same 401 regardless.
            debug!(reason = err.as_str(), "rejected unauthenticated request");
            error_response(StatusCode::UNAUTHORIZED, "unauthorized")
        })
}

// Non-ASCII header values are treated as absent.
fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
