// Error taxonomy for one collection cycle. None of these ever stop the scheduler.

use std::path::PathBuf;
use thiserror::Error;

/// An OS query for volumes or physical disks failed.
#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("volume enumeration failed: {0}")]
    Volumes(String),
    #[error("physical disk query failed: {0}")]
    PhysicalDisks(String),
    #[error("collector task join: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// One sink failed to persist a message.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("event log: {0}")]
    Event(String),
    #[error("log file {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("database: {0}")]
    Store(String),
}

/// The email transport failed. Reduced to a log-file entry, never retried.
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("building message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("smtp: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
    #[error("{0}")]
    Other(String),
}
