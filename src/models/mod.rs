// Domain models: volume samples, physical disk status, persisted rows, alerts

mod alert;
mod record;
mod sample;
mod status;

pub use alert::{Alert, AlertKind, Severity};
pub use record::DiskLogRecord;
pub use sample::{DiskSample, VolumeInfo};
pub use status::DiskStatus;
