// Volume observations

use crate::format::format_bytes;
use chrono::{DateTime, Local};

/// One volume as reported by the OS, before any computation.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeInfo {
    pub drive_name: String,
    pub total_size: u64,
    pub free_space: u64,
    /// False for absent removable media and similar; such volumes are skipped.
    pub ready: bool,
}

/// One measurement of one volume at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct DiskSample {
    pub drive_name: String,
    pub usage_percentage: f64,
    pub total_size: u64,
    pub free_space: u64,
    pub timestamp: DateTime<Local>,
    /// Rendered once and shared by every sink.
    pub message: String,
}

impl DiskSample {
    /// Returns `None` when `total_size` is zero (usage is undefined).
    pub fn new(
        drive_name: impl Into<String>,
        total_size: u64,
        free_space: u64,
        timestamp: DateTime<Local>,
    ) -> Option<Self> {
        if total_size == 0 {
            return None;
        }
        let drive_name = drive_name.into();
        let used = total_size.saturating_sub(free_space);
        let usage_percentage = (used as f64 * 100.0) / total_size as f64;
        let message = format!(
            "Drive: {}, Usage: {:.2}%, Total: {}, Free: {}",
            drive_name,
            usage_percentage,
            format_bytes(total_size),
            format_bytes(free_space)
        );
        Some(Self {
            drive_name,
            usage_percentage,
            total_size,
            free_space,
            timestamp,
            message,
        })
    }

    pub fn from_volume(volume: &VolumeInfo, timestamp: DateTime<Local>) -> Option<Self> {
        Self::new(
            volume.drive_name.clone(),
            volume.total_size,
            volume.free_space,
            timestamp,
        )
    }
}
