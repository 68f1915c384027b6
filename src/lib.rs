// Library for tests to access modules

pub mod agent;
pub mod alert;
pub mod collector;
pub mod config;
pub mod disk_log_repo;
pub mod error;
pub mod format;
pub mod metric_source;
pub mod models;
pub mod notifier;
pub mod sinks;
pub mod worker;
