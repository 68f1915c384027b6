// One collection cycle: volumes, then physical disks. Each sample is recorded, evaluated,
// and any alert is recorded again and optionally emailed. Every failure is handled locally.

use crate::alert;
use crate::metric_source::{DiskStatusEnumerator, VolumeEnumerator};
use crate::models::{Alert, DiskSample, Severity};
use crate::notifier::{Notifier, compose_alert};
use crate::sinks::LogSinks;
use chrono::{DateTime, Local};
use std::sync::{Arc, Mutex};
use tracing::instrument;

/// What one cycle observed. Logged by the scheduler at debug level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub volumes: usize,
    pub disks: usize,
    pub alerts: usize,
    pub errors: usize,
}

/// Hands out sample timestamps that never go backwards within one run,
/// even if the wall clock is stepped back.
#[derive(Default)]
pub struct SampleClock {
    last: Mutex<Option<DateTime<Local>>>,
}

impl SampleClock {
    pub fn now(&self) -> DateTime<Local> {
        self.advance(Local::now())
    }

    /// Returns `wall`, or the last timestamp handed out if `wall` is earlier.
    pub fn advance(&self, wall: DateTime<Local>) -> DateTime<Local> {
        let Ok(mut last) = self.last.lock() else {
            return wall;
        };
        let ts = match *last {
            Some(prev) if prev > wall => prev,
            _ => wall,
        };
        *last = Some(ts);
        ts
    }
}

pub struct CollectorDeps {
    pub volumes: Arc<dyn VolumeEnumerator>,
    pub disks: Arc<dyn DiskStatusEnumerator>,
    pub sinks: Arc<LogSinks>,
    /// `None` when email alerting is disabled.
    pub notifier: Option<Arc<dyn Notifier>>,
}

pub struct Collector {
    agent_name: String,
    volumes: Arc<dyn VolumeEnumerator>,
    disks: Arc<dyn DiskStatusEnumerator>,
    sinks: Arc<LogSinks>,
    notifier: Option<Arc<dyn Notifier>>,
    clock: SampleClock,
}

impl Collector {
    pub fn new(agent_name: impl Into<String>, deps: CollectorDeps) -> Self {
        let CollectorDeps {
            volumes,
            disks,
            sinks,
            notifier,
        } = deps;
        Self {
            agent_name: agent_name.into(),
            volumes,
            disks,
            sinks,
            notifier,
            clock: SampleClock::default(),
        }
    }

    pub fn agent_name(&self) -> &str {
        &self.agent_name
    }

    pub fn sinks(&self) -> &LogSinks {
        &self.sinks
    }

    #[instrument(skip(self), fields(agent = %self.agent_name))]
    pub async fn run_cycle(&self) -> CycleReport {
        let mut report = CycleReport::default();
        self.check_volumes(&mut report).await;
        self.check_physical_disks(&mut report).await;
        report
    }

    async fn check_volumes(&self, report: &mut CycleReport) {
        let volumes = match self.volumes.enumerate_volumes().await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, operation = "enumerate_volumes", "volume check failed");
                self.sinks
                    .record(Severity::Error, &format!("Disk check failed: {}", e));
                report.errors += 1;
                return;
            }
        };

        for volume in volumes.iter().filter(|v| v.ready) {
            let Some(sample) = DiskSample::from_volume(volume, self.clock.now()) else {
                tracing::debug!(drive = %volume.drive_name, "zero-sized volume skipped");
                continue;
            };
            report.volumes += 1;
            self.sinks
                .record_sample(&sample, Severity::Information, &sample.message)
                .await;

            if let Some(alert) = alert::evaluate_capacity(&sample) {
                report.alerts += 1;
                self.sinks
                    .record_sample(&sample, Severity::Warning, &alert.message)
                    .await;
                self.notify(&alert, &sample.message).await;
            }
        }
    }

    async fn check_physical_disks(&self, report: &mut CycleReport) {
        let disks = match self.disks.enumerate_physical_disks().await {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(error = %e, operation = "enumerate_physical_disks", "SMART status check failed");
                self.sinks
                    .record(Severity::Error, &format!("SMART status check failed: {}", e));
                report.errors += 1;
                return;
            }
        };

        for disk in &disks {
            report.disks += 1;
            let message = disk.message();
            self.sinks.record(Severity::Information, &message);

            if let Some(alert) = alert::evaluate_hardware(disk) {
                report.alerts += 1;
                self.sinks.record(Severity::Warning, &alert.message);
                self.notify(&alert, &message).await;
            }
        }
    }

    async fn notify(&self, alert: &Alert, observation: &str) {
        let Some(notifier) = &self.notifier else {
            return;
        };
        let (subject, body) = compose_alert(&self.agent_name, alert, observation);
        match notifier.notify(&subject, &body).await {
            Ok(()) => self.sinks.record_file("Critical alert email sent."),
            Err(e) => {
                tracing::warn!(error = %e, operation = "notify", "alert email failed");
                self.sinks
                    .record_file(&format!("Email delivery failed: {}", e));
            }
        }
    }
}
