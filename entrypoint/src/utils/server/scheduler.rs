use std::{sync::Arc, time::Duration};

use tokio::time::{MissedTickBehavior, interval};
use tracing::{error, info};

use crate::server::ServerState;

/// Kick off the fixed-interval scrape loop. tokio fires the first tick
/// immediately, so it is swallowed to keep startup from triggering a
/// run; the same coordinator as the manual trigger prevents overlap.
pub fn spawn_scheduler(state: Arc<ServerState>, every: Duration) {
    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        ticker.tick().await;

        loop {
            ticker.tick().await;

            if !state.coordinator.try_begin() {
                info!("Skipping scheduled run: a scrape is already in progress");
                continue;
            }

            info!("Starting scheduled scrape run");

            match state.runner.run().await {
                Ok(summary) => info!(
                    "Scheduled run finished: {} categories, {} products",
                    summary.categories, summary.products
                ),
                Err(err) => error!("Scheduled run failed: {}", err),
            }

            state.coordinator.finish();
        }
    });
}
