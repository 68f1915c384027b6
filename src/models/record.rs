// Persisted DiskLogs row

use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct DiskLogRecord {
    pub id: i64,
    pub drive_name: String,
    pub usage_percentage: f64,
    pub total_size: i64,
    pub free_space: i64,
    /// Local wall-clock time of the write.
    pub log_time: NaiveDateTime,
    pub message: String,
}
