// Linux sysfs helpers: /sys/block/<dev>/device/{model,state}.

use crate::error::CollectionError;
use crate::models::DiskStatus;
use std::path::{Path, PathBuf};

/// Map a sysfs device `state` to the status vocabulary the alert rule understands.
/// SCSI/SATA report `running`, NVMe controllers report `live`; both are healthy.
pub fn map_device_state(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some("running") | Some("live") => "OK".into(),
        Some(s) if !s.is_empty() => s.to_string(),
        _ => "Unknown".into(),
    }
}

fn read_attr(path: &Path) -> Option<String> {
    let v = std::fs::read_to_string(path).ok()?;
    let v = v.trim();
    if v.is_empty() {
        None
    } else {
        Some(v.to_string())
    }
}

/// Every entry under `root` with a `device` link is a physical disk;
/// loop, ram, zram and device-mapper nodes have none and are skipped.
pub(super) fn read_block_devices(root: &Path) -> Result<Vec<DiskStatus>, CollectionError> {
    if cfg!(not(target_os = "linux")) && !root.exists() {
        return Ok(Vec::new());
    }
    let entries = std::fs::read_dir(root).map_err(|e| {
        CollectionError::PhysicalDisks(format!("reading {}: {}", root.display(), e))
    })?;
    Ok(collect_devices(entries.map(|entry| entry.map(|e| e.path()))))
}

/// A failing entry is logged and skipped; disks read before and after it are kept.
fn collect_devices(entries: impl Iterator<Item = std::io::Result<PathBuf>>) -> Vec<DiskStatus> {
    let mut out = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(error = %e, operation = "read_block_devices", "skipping unreadable block device entry");
                continue;
            }
        };
        let device = path.join("device");
        if !device.exists() {
            continue;
        }
        let model = read_attr(&device.join("model")).unwrap_or_else(|| {
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        });
        let state = read_attr(&device.join("state"));
        out.push(DiskStatus {
            model: Some(model),
            status: Some(map_device_state(state.as_deref())),
        });
    }
    out.sort_by(|a, b| a.model.cmp(&b.model));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn entry_error_keeps_disks_read_around_it() {
        let dir = tempfile::TempDir::new().unwrap();
        for (name, model) in [("sda", "Samsung SSD 870"), ("sdb", "ST4000DM004")] {
            let device = dir.path().join(name).join("device");
            std::fs::create_dir_all(&device).unwrap();
            std::fs::write(device.join("model"), model).unwrap();
            std::fs::write(device.join("state"), "running").unwrap();
        }
        let entries = vec![
            Ok(dir.path().join("sda")),
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
            Ok(dir.path().join("sdb")),
        ];

        let disks = collect_devices(entries.into_iter());

        assert_eq!(
            disks,
            vec![
                DiskStatus::new("ST4000DM004", "OK"),
                DiskStatus::new("Samsung SSD 870", "OK"),
            ]
        );
    }
}
