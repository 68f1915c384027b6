// Agent lifecycle: Created -> Running -> Stopped. Stopped is final.

use crate::collector::{Collector, CollectorDeps};
use crate::config::AppConfig;
use crate::disk_log_repo::{DiskLogRepo, SchemaInit};
use crate::metric_source::{SysfsDiskStatus, SysinfoVolumes};
use crate::models::Severity;
use crate::notifier::{Notifier, SmtpNotifier};
use crate::sinks::{FileSink, LogSinks, TracingEventRecorder};
use crate::worker::{self, SchedulerConfig};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

enum AgentState {
    Created,
    Running {
        handle: JoinHandle<()>,
        shutdown_tx: oneshot::Sender<()>,
    },
    Stopped,
}

pub struct Agent {
    collector: Arc<Collector>,
    interval: Duration,
    state: AgentState,
}

impl Agent {
    pub fn new(collector: Arc<Collector>, interval: Duration) -> Self {
        Self {
            collector,
            interval,
            state: AgentState::Created,
        }
    }

    /// Wire the production bindings: sysinfo volumes, sysfs disks, tracing event log,
    /// the log file under `install_dir/Logs`, the SQLite store and (if enabled) SMTP.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let name = config.agent.name.as_str();
        let notifier: Option<Arc<dyn Notifier>> = match (&config.email, config.alerts.email_enabled) {
            (Some(email), true) => Some(Arc::new(
                SmtpNotifier::from_config(email)
                    .map_err(|e| anyhow::anyhow!("smtp notifier: {}", e))?,
            )),
            _ => None,
        };
        let sinks = Arc::new(LogSinks::new(
            Arc::new(TracingEventRecorder::new(name)),
            FileSink::new(config.agent.log_dir(), name),
            Arc::new(DiskLogRepo::new(&config.database.path)),
        ));
        let collector = Collector::new(
            name,
            CollectorDeps {
                volumes: Arc::new(SysinfoVolumes::new()),
                disks: Arc::new(SysfsDiskStatus::new()),
                sinks,
                notifier,
            },
        );
        Ok(Self::new(
            Arc::new(collector),
            config.agent.collection_interval(),
        ))
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, AgentState::Running { .. })
    }

    /// Create the store if needed, then spawn the scheduler (which runs a cycle at once).
    /// Fails without side effects if the interval is zero.
    pub async fn start(&mut self) -> anyhow::Result<()> {
        match self.state {
            AgentState::Created => {}
            AgentState::Running { .. } => anyhow::bail!("agent is already running"),
            AgentState::Stopped => anyhow::bail!("agent has been stopped and cannot be restarted"),
        }
        // tokio's interval panics on a zero period
        anyhow::ensure!(
            !self.interval.is_zero(),
            "collection interval must be > 0"
        );

        self.init_store().await;

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let handle = worker::spawn(
            self.collector.clone(),
            SchedulerConfig {
                interval: self.interval,
            },
            shutdown_rx,
        );
        self.collector.sinks().record(
            Severity::Information,
            &format!("{} started.", self.collector.agent_name()),
        );
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "{} started",
            self.collector.agent_name()
        );
        self.state = AgentState::Running {
            handle,
            shutdown_tx,
        };
        Ok(())
    }

    /// Cancel the scheduler. A cycle in flight is aborted, not awaited.
    pub fn stop(&mut self) {
        let AgentState::Running {
            handle,
            shutdown_tx,
        } = std::mem::replace(&mut self.state, AgentState::Stopped)
        else {
            return;
        };
        let _ = shutdown_tx.send(());
        handle.abort();
        self.collector.sinks().record(
            Severity::Information,
            &format!("{} has stopped.", self.collector.agent_name()),
        );
    }

    async fn init_store(&self) {
        let sinks = self.collector.sinks();
        let store = sinks.store();
        match store.init().await {
            Ok(SchemaInit::Created) => {
                tracing::info!(path = %store.path().display(), "database and table created");
                sinks.record_file("Database and table created.");
            }
            Ok(SchemaInit::AlreadyPresent) => {
                tracing::debug!(path = %store.path().display(), "database already exists");
                sinks.record_file("Database already exists.");
            }
            Err(e) => {
                tracing::warn!(error = %e, operation = "init_store", "database creation failed");
                sinks.record(
                    Severity::Error,
                    &format!("Database creation failed: {:#}", e),
                );
            }
        }
    }
}
