// SQLite observation store: a single append-only DiskLogs table.
// No pool is held: every call opens its own connection and closes it before returning,
// so the file is never locked between cycles.

use crate::models::{DiskLogRecord, DiskSample};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection, Row};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::instrument;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS DiskLogs (
        Id INTEGER PRIMARY KEY AUTOINCREMENT,
        DriveName TEXT,
        UsagePercentage REAL,
        TotalSize INTEGER,
        FreeSpace INTEGER,
        LogTime DATETIME,
        Message TEXT
    )
"#;

/// Outcome of [`DiskLogRepo::init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaInit {
    Created,
    AlreadyPresent,
}

pub struct DiskLogRepo {
    path: PathBuf,
}

impl DiskLogRepo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn open(&self, create_if_missing: bool) -> anyhow::Result<SqliteConnection> {
        let conn = SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(create_if_missing)
            .busy_timeout(Duration::from_secs(5))
            .connect()
            .await?;
        Ok(conn)
    }

    /// Create the database file and table unless the file already exists.
    /// Never drops or rewrites anything, so calling it again is harmless.
    #[instrument(skip(self), fields(repo = "disk_log", operation = "init"))]
    pub async fn init(&self) -> anyhow::Result<SchemaInit> {
        if self.path.exists() {
            return Ok(SchemaInit::AlreadyPresent);
        }
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let mut conn = self.open(true).await?;
        sqlx::query(CREATE_TABLE).execute(&mut conn).await?;
        conn.close().await?;
        Ok(SchemaInit::Created)
    }

    /// Append one row for `sample` carrying `message` (the observation or an alert about it).
    /// `LogTime` is the sample's capture time. Returns the new row id.
    #[instrument(skip(self, sample, message), fields(repo = "disk_log", operation = "insert", drive = %sample.drive_name))]
    pub async fn insert(&self, sample: &DiskSample, message: &str) -> anyhow::Result<i64> {
        let total_size = i64::try_from(sample.total_size)
            .map_err(|_| anyhow::anyhow!("total size {} exceeds INTEGER range", sample.total_size))?;
        let free_space = i64::try_from(sample.free_space)
            .map_err(|_| anyhow::anyhow!("free space {} exceeds INTEGER range", sample.free_space))?;
        let mut conn = self.open(false).await?;
        let result = sqlx::query(
            "INSERT INTO DiskLogs (DriveName, UsagePercentage, TotalSize, FreeSpace, LogTime, Message) VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&sample.drive_name)
        .bind(sample.usage_percentage)
        .bind(total_size)
        .bind(free_space)
        .bind(sample.timestamp.naive_local())
        .bind(message)
        .execute(&mut conn)
        .await?;
        conn.close().await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn count(&self) -> anyhow::Result<i64> {
        let mut conn = self.open(false).await?;
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM DiskLogs")
            .fetch_one(&mut conn)
            .await?;
        conn.close().await?;
        Ok(n)
    }

    /// Most recent `limit` rows, oldest first.
    pub async fn recent(&self, limit: u32) -> anyhow::Result<Vec<DiskLogRecord>> {
        let mut conn = self.open(false).await?;
        let rows = sqlx::query(
            "SELECT Id, DriveName, UsagePercentage, TotalSize, FreeSpace, LogTime, Message
             FROM DiskLogs ORDER BY Id DESC LIMIT $1",
        )
        .bind(limit as i64)
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(DiskLogRecord {
                id: row.try_get("Id")?,
                drive_name: row.try_get("DriveName")?,
                usage_percentage: row.try_get("UsagePercentage")?,
                total_size: row.try_get("TotalSize")?,
                free_space: row.try_get("FreeSpace")?,
                log_time: row.try_get("LogTime")?,
                message: row.try_get("Message")?,
            });
        }
        out.reverse();
        Ok(out)
    }
}
