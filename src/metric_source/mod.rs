// Volume and physical disk enumeration behind narrow capability traits.
// Production bindings: sysinfo for volumes, sysfs for physical disks (Linux).

mod linux;

use crate::error::CollectionError;
use crate::models::{DiskStatus, VolumeInfo};
use async_trait::async_trait;
use std::sync::Arc;
use sysinfo::Disks;
use tracing::instrument;

pub use linux::map_device_state;

/// Enumerates mounted storage volumes. Re-enumerates fully on every call.
#[async_trait]
pub trait VolumeEnumerator: Send + Sync {
    async fn enumerate_volumes(&self) -> Result<Vec<VolumeInfo>, CollectionError>;
}

/// Enumerates physical disks with their OS-reported hardware status.
/// One entry per physical disk, independent of partition count.
#[async_trait]
pub trait DiskStatusEnumerator: Send + Sync {
    async fn enumerate_physical_disks(&self) -> Result<Vec<DiskStatus>, CollectionError>;
}

pub struct SysinfoVolumes {
    disks: Arc<std::sync::Mutex<Disks>>,
}

impl Default for SysinfoVolumes {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoVolumes {
    pub fn new() -> Self {
        Self {
            disks: Arc::new(std::sync::Mutex::new(Disks::new_with_refreshed_list())),
        }
    }
}

#[async_trait]
impl VolumeEnumerator for SysinfoVolumes {
    #[instrument(skip(self), fields(source = "sysinfo", operation = "enumerate_volumes"))]
    async fn enumerate_volumes(&self) -> Result<Vec<VolumeInfo>, CollectionError> {
        let disks = self.disks.clone();
        tokio::task::spawn_blocking(move || -> Result<Vec<VolumeInfo>, CollectionError> {
            let mut disks = disks.lock().map_err(|e| {
                CollectionError::Volumes(format!("sysinfo disks lock poisoned: {}", e))
            })?;
            // true: drop volumes that disappeared since the last cycle
            disks.refresh(true);
            let volumes = disks
                .list()
                .iter()
                .map(|d| VolumeInfo {
                    drive_name: d.mount_point().to_string_lossy().into_owned(),
                    total_size: d.total_space(),
                    free_space: d.available_space(),
                    ready: d.total_space() > 0,
                })
                .collect();
            Ok(volumes)
        })
        .await?
    }
}

/// Physical disks from `/sys/block`. Reports no disks on other platforms.
///
/// Status comes from `device/state` (see [`map_device_state`]). Devices that expose no
/// `state` attribute, such as virtio and mmc disks, report `"Unknown"`, which the hardware
/// rule treats as degraded: they raise a warning (and an email, if enabled) every cycle.
pub struct SysfsDiskStatus {
    root: std::path::PathBuf,
}

impl Default for SysfsDiskStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl SysfsDiskStatus {
    pub fn new() -> Self {
        Self::with_root("/sys/block")
    }

    /// Read from a different sysfs block directory (tests use a temp dir).
    pub fn with_root(root: impl Into<std::path::PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl DiskStatusEnumerator for SysfsDiskStatus {
    #[instrument(skip(self), fields(source = "sysfs", operation = "enumerate_physical_disks"))]
    async fn enumerate_physical_disks(&self) -> Result<Vec<DiskStatus>, CollectionError> {
        let root = self.root.clone();
        tokio::task::spawn_blocking(move || linux::read_block_devices(&root)).await?
    }
}
