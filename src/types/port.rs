//! Port types with validation and parsing.
//!
//! The `Port` newtype ensures values are always valid port numbers (1-65535).
//! `PortRange` is the inclusive span a port scan walks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated network port number (1-65535).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Port(u16);

impl Port {
    /// Minimum valid port number.
    pub const MIN: u16 = 1;
    /// Maximum valid port number.
    pub const MAX: u16 = 65535;

    /// Create a new Port from a u16, returning None for port 0.
    #[inline]
    pub const fn new(port: u16) -> Option<Self> {
        if port >= Self::MIN {
            Some(Self(port))
        } else {
            None
        }
    }

    /// Get the raw port number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Forward so width/alignment flags apply to the number.
        fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<u16> for Port {
    type Error = PortError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(PortError::OutOfRange(value.into()))
    }
}

impl FromStr for Port {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let value: u32 = s
            .parse()
            .map_err(|_| PortError::InvalidFormat(s.to_string()))?;
        u16::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or(PortError::OutOfRange(value))
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

/// Error type for port parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("port {0} is out of valid range (1-65535)")]
    OutOfRange(u32),
    #[error("invalid port number: '{0}'")]
    InvalidFormat(String),
    #[error("invalid port range: start ({0}) > end ({1})")]
    InvalidRange(u16, u16),
    #[error("empty port range")]
    Empty,
}

/// An inclusive range of ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRange {
    start: Port,
    end: Port,
}

impl PortRange {
    /// Create a new port range.
    pub fn new(start: Port, end: Port) -> Result<Self, PortError> {
        if start.0 > end.0 {
            Err(PortError::InvalidRange(start.0, end.0))
        } else {
            Ok(Self { start, end })
        }
    }

    /// Build a range from raw numbers, validating both bounds.
    pub fn from_bounds(start: u16, end: u16) -> Result<Self, PortError> {
        Self::new(Port::try_from(start)?, Port::try_from(end)?)
    }

    /// Create a range containing a single port.
    pub const fn single(port: Port) -> Self {
        Self {
            start: port,
            end: port,
        }
    }

    pub const fn start(&self) -> Port {
        self.start
    }

    pub const fn end(&self) -> Port {
        self.end
    }

    /// Get the number of ports in this range.
    pub const fn len(&self) -> usize {
        (self.end.0 - self.start.0) as usize + 1
    }

    /// A valid range always holds at least one port.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over all ports in this range, ascending.
    pub fn iter(&self) -> impl Iterator<Item = Port> {
        (self.start.0..=self.end.0).map(Port)
    }

    pub fn contains(&self, port: Port) -> bool {
        self.start <= port && port <= self.end
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for PortRange {
    type Err = PortError;

    /// Accepts `"start-end"` or a lone `"port"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PortError::Empty);
        }

        match s.split_once('-') {
            Some((start, end)) => Self::new(start.parse()?, end.parse()?),
            None => Ok(Self::single(s.parse()?)),
        }
    }
}
