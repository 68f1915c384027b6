// Periodic scheduler: one cycle immediately, then one per interval, on a single task.
// Cycles run inside the task loop, so two cycles of the same agent never overlap.

use crate::collector::Collector;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing::Instrument;

pub struct SchedulerConfig {
    pub interval: Duration,
}

/// Spawns the scheduler task. It exits when `shutdown_rx` fires or its sender is dropped;
/// a shutdown arriving mid-cycle is seen once that cycle returns.
pub fn spawn(
    collector: Arc<Collector>,
    config: SchedulerConfig,
    mut shutdown_rx: oneshot::Receiver<()>,
) -> tokio::task::JoinHandle<()> {
    let span = tracing::span!(
        tracing::Level::DEBUG,
        "scheduler",
        interval_secs = config.interval.as_secs()
    );
    tokio::spawn(
        async move {
            // First tick completes immediately: that is the startup cycle.
            let mut tick = interval(config.interval);
            tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = tick.tick() => {
                        let report = collector.run_cycle().await;
                        tracing::debug!(
                            volumes = report.volumes,
                            disks = report.disks,
                            alerts = report.alerts,
                            errors = report.errors,
                            "cycle complete"
                        );
                    }
                    _ = &mut shutdown_rx => {
                        tracing::debug!("Scheduler shutting down");
                        break;
                    }
                }
            }
        }
        .instrument(span),
    )
}
