// Physical disk hardware status

/// One hardware-status observation for one physical disk.
/// Both fields are optional because the OS may not report them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskStatus {
    pub model: Option<String>,
    pub status: Option<String>,
}

impl DiskStatus {
    pub fn new(model: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            model: Some(model.into()),
            status: Some(status.into()),
        }
    }

    /// `"OK"` (exact, case-sensitive) is the only healthy status.
    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some("OK")
    }

    pub fn model_str(&self) -> &str {
        self.model.as_deref().unwrap_or("")
    }

    pub fn status_str(&self) -> &str {
        self.status.as_deref().unwrap_or("")
    }

    pub fn message(&self) -> String {
        format!(
            "Disk model: {}, Status: {}",
            self.model_str(),
            self.status_str()
        )
    }
}
