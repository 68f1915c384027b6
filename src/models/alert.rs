// Alert classification results and sink severities

/// Severity attached to event-log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Information,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    CapacityWarning,
    HardwareWarning,
}

impl AlertKind {
    pub fn label(&self) -> &'static str {
        match self {
            AlertKind::CapacityWarning => "capacity",
            AlertKind::HardwareWarning => "hardware",
        }
    }
}

/// A threshold breach derived from one sample. Distinct from the sample itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    /// Drive name for capacity alerts, disk model for hardware alerts.
    pub source: String,
    pub message: String,
}
