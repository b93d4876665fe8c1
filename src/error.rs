//! Error types for portsweep.
//!
//! Uses `thiserror` for ergonomic error definitions. Per-probe failures are
//! not errors at this level: they become `ProbeOutcome` variants and stay
//! inside the dispatcher.

use crate::types::{HostRangeError, PortError, PrefixError, TargetError};
use std::path::PathBuf;
use thiserror::Error;

/// Engine-level failures. These abort a whole run, never a single unit.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("worker pool closed before all units were dispatched")]
    PoolClosed,

    #[error("result aggregator still shared after the scan completed")]
    AggregatorShared,
}

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Failures while writing a saved report.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;

/// Configuration loading failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings file: {0}")]
    InvalidFormat(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level error surfaced to the operator.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Port(#[from] PortError),

    #[error(transparent)]
    Prefix(#[from] PrefixError),

    #[error(transparent)]
    HostRange(#[from] HostRangeError),

    #[error("Cannot resolve hostname. Check input and try again. ({0})")]
    Target(#[from] TargetError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read input: {0}")]
    Input(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;
