// Shared test helpers: fakes for the OS capabilities and the email transport
#![allow(dead_code)]

use async_trait::async_trait;
use diskhealth::collector::{Collector, CollectorDeps};
use diskhealth::disk_log_repo::DiskLogRepo;
use diskhealth::error::{CollectionError, NotificationError, SinkError};
use diskhealth::metric_source::{DiskStatusEnumerator, VolumeEnumerator};
use diskhealth::models::{DiskStatus, Severity, VolumeInfo};
use diskhealth::notifier::Notifier;
use diskhealth::sinks::{EventRecorder, FileSink, LogSinks};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const AGENT: &str = "DiskHealthService";

pub fn volume(name: &str, total: u64, free: u64) -> VolumeInfo {
    VolumeInfo {
        drive_name: name.into(),
        total_size: total,
        free_space: free,
        ready: true,
    }
}

#[derive(Default)]
pub struct FakeVolumes {
    pub volumes: Vec<VolumeInfo>,
    pub fail: bool,
    pub calls: AtomicUsize,
}

impl FakeVolumes {
    pub fn new(volumes: Vec<VolumeInfo>) -> Self {
        Self {
            volumes,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VolumeEnumerator for FakeVolumes {
    async fn enumerate_volumes(&self) -> Result<Vec<VolumeInfo>, CollectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(CollectionError::Volumes("access denied".into()));
        }
        Ok(self.volumes.clone())
    }
}

#[derive(Default)]
pub struct FakeDisks {
    pub disks: Vec<DiskStatus>,
    pub fail: bool,
}

impl FakeDisks {
    pub fn new(disks: Vec<DiskStatus>) -> Self {
        Self { disks, fail: false }
    }

    pub fn failing() -> Self {
        Self {
            disks: vec![],
            fail: true,
        }
    }
}

#[async_trait]
impl DiskStatusEnumerator for FakeDisks {
    async fn enumerate_physical_disks(&self) -> Result<Vec<DiskStatus>, CollectionError> {
        if self.fail {
            return Err(CollectionError::PhysicalDisks("driver not loaded".into()));
        }
        Ok(self.disks.clone())
    }
}

#[derive(Default)]
pub struct RecordingEvents {
    pub entries: Mutex<Vec<(Severity, String)>>,
    pub fail: bool,
}

impl RecordingEvents {
    pub fn failing() -> Self {
        Self {
            entries: Mutex::new(vec![]),
            fail: true,
        }
    }

    pub fn entries(&self) -> Vec<(Severity, String)> {
        self.entries.lock().unwrap().clone()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries().iter().filter(|(s, _)| *s == severity).count()
    }
}

impl EventRecorder for RecordingEvents {
    fn record(&self, severity: Severity, message: &str) -> Result<(), SinkError> {
        if self.fail {
            return Err(SinkError::Event("event source not registered".into()));
        }
        self.entries
            .lock()
            .unwrap()
            .push((severity, message.to_string()));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, String)>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(vec![]),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, subject: &str, body: &str) -> Result<(), NotificationError> {
        self.sent
            .lock()
            .unwrap()
            .push((subject.to_string(), body.to_string()));
        if self.fail {
            return Err(NotificationError::Other("connection refused".into()));
        }
        Ok(())
    }
}

/// Sinks writing under `dir`: `dir/Logs/<AGENT>Log.txt` and `dir/DiskHealth.db`.
pub fn sinks_in(dir: &Path, events: Arc<RecordingEvents>) -> Arc<LogSinks> {
    Arc::new(LogSinks::new(
        events,
        FileSink::new(dir.join("Logs"), AGENT),
        Arc::new(DiskLogRepo::new(dir.join("DiskHealth.db"))),
    ))
}

pub fn collector(
    sinks: Arc<LogSinks>,
    volumes: Arc<FakeVolumes>,
    disks: Arc<FakeDisks>,
    notifier: Option<Arc<RecordingNotifier>>,
) -> Collector {
    Collector::new(
        AGENT,
        CollectorDeps {
            volumes,
            disks,
            sinks,
            notifier: notifier.map(|n| n as Arc<dyn Notifier>),
        },
    )
}

pub fn read_log(dir: &Path) -> String {
    std::fs::read_to_string(dir.join("Logs").join(format!("{}Log.txt", AGENT))).unwrap_or_default()
}
