// Threshold policy: capacity and hardware rules. Stateless; every cycle re-evaluates.

use crate::models::{Alert, AlertKind, DiskSample, DiskStatus};

/// Usage strictly above this fires a capacity warning.
pub const CAPACITY_THRESHOLD_PERCENT: f64 = 90.0;

pub fn evaluate_capacity(sample: &DiskSample) -> Option<Alert> {
    if sample.usage_percentage > CAPACITY_THRESHOLD_PERCENT {
        Some(Alert {
            kind: AlertKind::CapacityWarning,
            source: sample.drive_name.clone(),
            message: format!(
                "WARNING! Drive {} is more than {}% full.",
                sample.drive_name, CAPACITY_THRESHOLD_PERCENT
            ),
        })
    } else {
        None
    }
}

pub fn evaluate_hardware(status: &DiskStatus) -> Option<Alert> {
    if status.is_ok() {
        return None;
    }
    Some(Alert {
        kind: AlertKind::HardwareWarning,
        source: status.model_str().to_string(),
        message: format!(
            "WARNING! Disk ({}) status is critical: {}",
            status.model_str(),
            status.status_str()
        ),
    })
}
