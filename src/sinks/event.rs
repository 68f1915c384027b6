// OS-level event log sink. The production recorder emits `tracing` events under a fixed
// target; the subscriber in main sends them to stderr, which systemd forwards to the journal.

use crate::error::SinkError;
use crate::models::Severity;

/// `tracing` target used for event-log entries (filter with `RUST_LOG=event_log=info`).
pub const EVENT_LOG_TARGET: &str = "event_log";

pub trait EventRecorder: Send + Sync {
    fn record(&self, severity: Severity, message: &str) -> Result<(), SinkError>;
}

pub struct TracingEventRecorder {
    source: String,
}

impl TracingEventRecorder {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl EventRecorder for TracingEventRecorder {
    fn record(&self, severity: Severity, message: &str) -> Result<(), SinkError> {
        match severity {
            Severity::Information => {
                tracing::info!(target: EVENT_LOG_TARGET, source = %self.source, "{}", message)
            }
            Severity::Warning => {
                tracing::warn!(target: EVENT_LOG_TARGET, source = %self.source, "{}", message)
            }
            Severity::Error => {
                tracing::error!(target: EVENT_LOG_TARGET, source = %self.source, "{}", message)
            }
        }
        Ok(())
    }
}
