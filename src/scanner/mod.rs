//! Scanner module - the concurrent probing engine.
//!
//! Both modes share one engine: a [`Dispatcher`] fans the unit space out to
//! a bounded pool of tokio tasks, each task runs a [`Probe`], and every
//! positive outcome lands in an [`Aggregator`]. The [`ScanController`]
//! wraps that per mode and times the run.

pub mod aggregator;
pub mod controller;
pub mod dispatcher;
pub mod icmp;
pub mod tcp;
pub mod traits;

use std::time::Duration;

pub use aggregator::{Aggregator, ResultSet};
pub use controller::{PortScanReport, ScanController, ScanObserver, SilentObserver, SweepReport};
pub use dispatcher::Dispatcher;
pub use icmp::PingProbe;
pub use tcp::TcpConnectProbe;
pub use traits::{Finding, LiveHost, OpenPort, Probe, ProbeOutcome};

/// Concurrent probes allowed during a TCP port scan.
pub const PORT_SCAN_POOL_SIZE: usize = 100;

/// Concurrent pings allowed during host discovery.
pub const HOST_SWEEP_POOL_SIZE: usize = 50;

/// Deadline for every individual network operation of a probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(1);
