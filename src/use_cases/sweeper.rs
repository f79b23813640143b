// Background task that turns queues into matches and expires stale tickets.

use crate::domain::ports::Clock;
use crate::use_cases::matchmaker::Matchmaker;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Notify};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

pub async fn sweep_task(
    matchmaker: Arc<Mutex<Matchmaker>>,
    clock: Arc<dyn Clock>,
    sweep_interval: Duration,
    shutdown: Arc<Notify>,
) {
    let mut interval = tokio::time::interval(sweep_interval);
    // A slow tick should not trigger a burst of catch-up sweeps.
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.notified() => {
                debug!("sweeper stopping");
                break;
            }
            _ = interval.tick() => {
                let now = clock.now_epoch_seconds();
                let report = {
                    let mut matchmaker = matchmaker.lock().await;
                    matchmaker.sweep(now)
                };

                if !report.is_empty() {
                    info!(
                        matches_formed = report.matches_formed,
                        tickets_expired = report.tickets_expired,
                        matches_expired = report.matches_expired,
                        "sweep"
                    );
                }
            }
        }
    }
}
