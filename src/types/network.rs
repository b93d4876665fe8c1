//! Address-space types for host discovery.
//!
//! A sweep walks `prefix + i` for every `i` in a [`HostRange`], where the
//! prefix is the first three octets of an IPv4 address.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// The `a.b.c.` part of a /24-style sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkPrefix([u8; 3]);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrefixError {
    #[error("invalid network prefix '{0}': expected three octets such as 192.168.1.")]
    InvalidFormat(String),
}

impl NetworkPrefix {
    pub const fn new(a: u8, b: u8, c: u8) -> Self {
        Self([a, b, c])
    }

    /// Join the prefix with a final octet.
    pub fn address(&self, host: u8) -> Ipv4Addr {
        let [a, b, c] = self.0;
        Ipv4Addr::new(a, b, c, host)
    }
}

impl FromStr for NetworkPrefix {
    type Err = PrefixError;

    /// Parses `"192.168.1"` or `"192.168.1."`; the trailing separator is
    /// optional on input and always present on display.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let body = trimmed.strip_suffix('.').unwrap_or(trimmed);
        let invalid = || PrefixError::InvalidFormat(trimmed.to_string());

        let octets = body
            .split('.')
            .map(|part| part.parse::<u8>().map_err(|_| invalid()))
            .collect::<Result<Vec<u8>, _>>()?;

        match octets.as_slice() {
            &[a, b, c] => Ok(Self([a, b, c])),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for NetworkPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{}.{}.{}.", a, b, c)
    }
}

/// Inclusive range of final octets, e.g. `1-254`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRange {
    start: u8,
    end: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostRangeError {
    #[error("invalid range '{0}'. Use format like 1-254")]
    InvalidFormat(String),
    #[error("invalid range: start ({0}) > end ({1})")]
    Inverted(u8, u8),
}

impl HostRange {
    pub fn new(start: u8, end: u8) -> Result<Self, HostRangeError> {
        if start > end {
            Err(HostRangeError::Inverted(start, end))
        } else {
            Ok(Self { start, end })
        }
    }

    pub const fn start(&self) -> u8 {
        self.start
    }

    pub const fn end(&self) -> u8 {
        self.end
    }

    pub const fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    pub const fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> {
        self.start..=self.end
    }
}

impl FromStr for HostRange {
    type Err = HostRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || HostRangeError::InvalidFormat(s.to_string());

        let (start, end) = s.split_once('-').ok_or_else(invalid)?;
        let start: u8 = start.trim().parse().map_err(|_| invalid())?;
        let end: u8 = end.trim().parse().map_err(|_| invalid())?;
        Self::new(start, end)
    }
}

impl fmt::Display for HostRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
