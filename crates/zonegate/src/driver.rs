//! Runs the decay pass on a timer.
//!
//! The engine is shared as `Arc<tokio::sync::Mutex<ZoneGate<H>>>`; host
//! event handlers lock it per event, the driver locks it once per tick.
//! Since both go through the same mutex, a decay pass never interleaves
//! with an event.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use zonegate_access::Host;
use zonegate_tick::{TickConfig, TickMetrics, TickScheduler};

use crate::ZoneGate;

/// Ticks `engine` until `shutdown` turns `true` (or its sender is
/// dropped). Returns the scheduler's metrics.
///
/// A host-driven config (no period) never ticks; the loop only waits
/// for shutdown.
pub async fn run_decay<H: Host>(
    engine: Arc<Mutex<ZoneGate<H>>>,
    config: TickConfig,
    mut shutdown: watch::Receiver<bool>,
) -> TickMetrics {
    let mut scheduler = TickScheduler::new(config);
    tracing::info!(period = ?scheduler.period(), "decay driver started");

    loop {
        if *shutdown.borrow() {
            break;
        }
        tokio::select! {
            changed = shutdown.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            info = scheduler.wait_for_tick() => {
                let report = engine.lock().await.decay_tick();
                if info.late {
                    tracing::debug!(
                        tick = info.tick,
                        skipped = info.ticks_skipped,
                        "decay tick late"
                    );
                }
                tracing::trace!(
                    tick = info.tick,
                    decremented = report.decremented,
                    evictions = report.evictions.len(),
                    "decay tick"
                );
                scheduler.record_tick_end();
            }
        }
    }

    tracing::info!(ticks = scheduler.tick_count(), "decay driver stopped");
    scheduler.metrics().clone()
}
