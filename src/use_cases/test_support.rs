use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::ports::{Clock, IdGenerator};

// Shared fixed time source for deterministic use-case tests.
pub(crate) struct FixedClock(pub(crate) u64);

impl Clock for FixedClock {
    fn now_epoch_seconds(&self) -> u64 {
        self.0
    }
}

// Predictable identifiers: `ticket_1`, `ticket_2`, `match_3`, ...
#[derive(Default)]
pub(crate) struct SequentialIds {
    next: AtomicU64,
}

impl IdGenerator for SequentialIds {
    fn next_id(&self, prefix: &str) -> String {
        let id = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{prefix}{id}")
    }
}
