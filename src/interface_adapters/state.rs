use crate::domain::ports::{Clock, IdGenerator};
use crate::use_cases::{Matchmaker, RequestVerifier};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;
use uuid::Uuid;

// Shared application state for the HTTP handlers and the sweeper.
pub struct AppState {
    pub matchmaker: Arc<Mutex<Matchmaker>>,
    pub verifier: RequestVerifier,
    pub clock: Arc<dyn Clock>,
}

// Wall-clock adapter for the `Clock` port.
#[derive(Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_seconds(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

// Random v4 UUIDs behind a readable prefix, e.g. `ticket_9b2c...`.
#[derive(Clone)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}{}", Uuid::new_v4())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_ids_are_generated_then_they_keep_prefix_and_differ() {
        let first = UuidGenerator.next_id("ticket_");
        let second = UuidGenerator.next_id("ticket_");

        assert!(first.starts_with("ticket_"));
        assert_eq!(first.len(), "ticket_".len() + 36);
        assert_ne!(first, second);
    }
}
