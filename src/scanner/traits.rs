//! Probe trait abstraction.
//!
//! Defines the common interface both probe variants implement, together
//! with the outcome they classify each unit into.

use crate::types::Port;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

/// Classified result of probing one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome<F> {
    /// Positive result: an open port or a live host.
    Open(F),
    /// The target actively refused.
    Closed,
    /// No answer within the deadline, or no route to the target.
    Unreachable,
    /// The probe could not be carried out.
    Error { reason: String },
}

impl<F> ProbeOutcome<F> {
    pub fn error(reason: impl Into<String>) -> Self {
        Self::Error {
            reason: reason.into(),
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Open(_) => "open",
            Self::Closed => "closed",
            Self::Unreachable => "unreachable",
            Self::Error { .. } => "error",
        }
    }

    pub fn into_finding(self) -> Option<F> {
        match self {
            Self::Open(finding) => Some(finding),
            _ => None,
        }
    }
}

/// A positive outcome worth reporting, keyed by the unit that produced it.
pub trait Finding: Send + 'static {
    type Key: Ord + Copy + fmt::Debug + Send + 'static;

    fn key(&self) -> Self::Key;
}

/// An open TCP port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenPort {
    pub port: Port,
    pub service: String,
    pub banner: String,
}

impl Finding for OpenPort {
    type Key = Port;

    fn key(&self) -> Port {
        self.port
    }
}

/// A host that answered an echo request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveHost {
    pub address: Ipv4Addr,
}

impl Finding for LiveHost {
    type Key = Ipv4Addr;

    fn key(&self) -> Ipv4Addr {
        self.address
    }
}

/// A single bounded-time network check.
///
/// Implementations must absorb every failure into a [`ProbeOutcome`] and
/// release whatever transient resource they opened before returning.
#[async_trait]
pub trait Probe: Send + Sync {
    /// The atomic item of work, e.g. a port or an address.
    type Unit: Copy + fmt::Display + Send + Sync + 'static;
    /// What a positive outcome carries.
    type Finding: Finding;

    /// Short name of the technique, for logs.
    fn name(&self) -> &'static str;

    /// Probe one unit.
    async fn probe(&self, unit: Self::Unit) -> ProbeOutcome<Self::Finding>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_classification() {
        let open: ProbeOutcome<LiveHost> = ProbeOutcome::Open(LiveHost {
            address: Ipv4Addr::LOCALHOST,
        });
        assert!(open.is_positive());
        assert_eq!(open.kind(), "open");
        assert!(!ProbeOutcome::<LiveHost>::Closed.is_positive());
        assert_eq!(ProbeOutcome::<LiveHost>::error("boom").kind(), "error");
    }

    #[test]
    fn test_into_finding_drops_negatives() {
        let port = Port::new(22).unwrap();
        let open = ProbeOutcome::Open(OpenPort {
            port,
            service: "ssh".into(),
            banner: "SSH-2.0".into(),
        });
        assert_eq!(open.into_finding().map(|f| f.key()), Some(port));
        assert!(ProbeOutcome::<OpenPort>::Unreachable.into_finding().is_none());
    }
}
