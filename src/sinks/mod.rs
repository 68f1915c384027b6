// Fan-out to the event log, the log file and the SQLite store.
// Each write is isolated: a failing sink is reported to a surviving one and never
// stops the others or the cycle.

mod event;
mod file;

pub use event::{EVENT_LOG_TARGET, EventRecorder, TracingEventRecorder};
pub use file::FileSink;

use crate::disk_log_repo::DiskLogRepo;
use crate::error::SinkError;
use crate::models::{DiskSample, Severity};
use std::sync::Arc;

pub struct LogSinks {
    events: Arc<dyn EventRecorder>,
    file: FileSink,
    store: Arc<DiskLogRepo>,
}

impl LogSinks {
    pub fn new(events: Arc<dyn EventRecorder>, file: FileSink, store: Arc<DiskLogRepo>) -> Self {
        Self {
            events,
            file,
            store,
        }
    }

    pub fn store(&self) -> &DiskLogRepo {
        &self.store
    }

    /// Event log + log file.
    pub fn record(&self, severity: Severity, message: &str) {
        self.write_event(severity, message);
        self.write_file(message);
    }

    /// Event log + log file + one store row.
    pub async fn record_sample(&self, sample: &DiskSample, severity: Severity, message: &str) {
        self.record(severity, message);
        if let Err(e) = self.store.insert(sample, message).await {
            let err = SinkError::Store(format!("{:#}", e));
            tracing::warn!(error = %err, operation = "store_insert", drive = %sample.drive_name, "store write failed");
            self.record(
                Severity::Error,
                &format!("Could not write to database: {}", err),
            );
        }
    }

    /// Log file only.
    pub fn record_file(&self, message: &str) {
        self.write_file(message);
    }

    fn write_event(&self, severity: Severity, message: &str) {
        let Err(e) = self.events.record(severity, message) else {
            return;
        };
        if let Err(file_err) = self
            .file
            .write(&format!("Could not write event log entry: {}", e))
        {
            tracing::error!(event_error = %e, file_error = %file_err, "event log and log file both failed");
        }
    }

    fn write_file(&self, message: &str) {
        let Err(e) = self.file.write(message) else {
            return;
        };
        if let Err(event_err) = self
            .events
            .record(Severity::Error, &format!("Could not write log file: {}", e))
        {
            tracing::error!(file_error = %e, event_error = %event_err, "log file and event log both failed");
        }
    }
}
