// Plain-text log file: one `yyyy-MM-dd HH:mm:ss - <message>` line per entry.
// The handle is opened in append mode and dropped after every write.

use crate::error::SinkError;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct FileSink {
    dir: PathBuf,
    file: PathBuf,
}

impl FileSink {
    /// Writes to `<log_dir>/<agent_name>Log.txt`.
    pub fn new(log_dir: impl Into<PathBuf>, agent_name: &str) -> Self {
        let dir = log_dir.into();
        let file = dir.join(format!("{}Log.txt", agent_name));
        Self { dir, file }
    }

    pub fn path(&self) -> &Path {
        &self.file
    }

    pub fn write(&self, message: &str) -> Result<(), SinkError> {
        let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        std::fs::create_dir_all(&self.dir).map_err(|source| SinkError::File {
            path: self.dir.clone(),
            source,
        })?;
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file)
            .map_err(|source| SinkError::File {
                path: self.file.clone(),
                source,
            })?;
        writeln!(f, "{} - {}", now, message).map_err(|source| SinkError::File {
            path: self.file.clone(),
            source,
        })
    }
}
