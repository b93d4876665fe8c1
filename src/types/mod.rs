//! Core type definitions using newtype patterns for type safety.
//!
//! Requests can only be built from already-validated parts, so the engine
//! never sees an inverted range or an out-of-range port.

mod network;
mod port;
mod request;
mod target;

pub use network::{HostRange, HostRangeError, NetworkPrefix, PrefixError};
pub use port::{Port, PortError, PortRange};
pub use request::{ScanRequest, SweepRequest};
pub use target::{ScanTarget, TargetError};
