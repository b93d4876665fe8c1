//! # portsweep - Concurrent Network Reconnaissance
//!
//! Two modes on one engine:
//!
//! - **Port scan**: TCP connect probes across an inclusive port range of a
//!   single target, with service names and best-effort banners.
//! - **Host sweep**: ICMP echo probes across `prefix + i` to find live hosts.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use portsweep::scanner::{ScanController, SilentObserver};
//! use portsweep::types::{PortRange, ScanRequest, ScanTarget};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let target = ScanTarget::resolve("127.0.0.1").await.unwrap();
//!     let request = ScanRequest::new(target, PortRange::from_bounds(1, 1024).unwrap());
//!
//!     let controller = ScanController::new(Arc::new(SilentObserver));
//!     let report = controller.port_scan(&request).await.unwrap();
//!
//!     for open in &report.open_ports {
//!         println!("{} {} {}", open.port, open.service, open.banner);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Validated ports, ranges, targets, and requests
//! - [`scanner`] - Probes, the bounded dispatcher, aggregation, and per-mode control
//! - [`cli`] - Subcommands and the interactive menu
//! - [`config`] - Settings file handling
//! - [`output`] - Terminal output
//! - [`report`] - Saved report serialization
//! - [`error`] - Error types

pub mod banner;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod report;
pub mod scanner;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, ScanError};
pub use scanner::{OpenPort, Probe, ProbeOutcome, ScanController};
pub use types::{Port, PortRange, ScanRequest, ScanTarget, SweepRequest};
