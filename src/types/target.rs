//! Port-scan target resolution.
//!
//! A target is either a literal IP address or a hostname. Hostnames are
//! resolved exactly once, before any probing starts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use tracing::debug;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// A scan target that has been resolved to an IP address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanTarget {
    /// The original input (hostname or IP string).
    pub original: String,
    /// The resolved IP address.
    pub ip: IpAddr,
}

/// Error type for target parsing and resolution.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TargetError {
    #[error("invalid target: '{0}'")]
    InvalidFormat(String),
    #[error("failed to resolve hostname '{0}': {1}")]
    DnsResolutionFailed(String, String),
    #[error("no IP addresses found for hostname '{0}'")]
    NoAddressesFound(String),
}

impl ScanTarget {
    /// Create a new scan target.
    pub fn new(original: impl Into<String>, ip: IpAddr) -> Self {
        Self {
            original: original.into(),
            ip,
        }
    }

    /// Resolve user input into a target.
    ///
    /// Literal addresses are used as-is. Hostnames go through the system
    /// resolver configuration (hosts file included), and the first IPv4
    /// answer wins over any IPv6 one.
    pub async fn resolve(input: &str) -> Result<Self, TargetError> {
        let input = input.trim();

        if let Ok(ip) = input.parse::<IpAddr>() {
            return Ok(Self::new(input, ip));
        }

        if !is_valid_hostname(input) {
            return Err(TargetError::InvalidFormat(input.to_string()));
        }

        let resolver = TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|e| {
            debug!(error = %e, "system resolver config unavailable, using defaults");
            TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
        });

        let response = resolver
            .lookup_ip(input)
            .await
            .map_err(|e| TargetError::DnsResolutionFailed(input.to_string(), e.to_string()))?;

        let ips: Vec<IpAddr> = response.iter().collect();
        let ip = ips
            .iter()
            .find(|ip| ip.is_ipv4())
            .or_else(|| ips.first())
            .copied()
            .ok_or_else(|| TargetError::NoAddressesFound(input.to_string()))?;

        debug!(hostname = input, %ip, candidates = ips.len(), "hostname resolved");
        Ok(Self::new(input, ip))
    }

    /// Whether the input was a hostname rather than a literal address.
    pub fn was_resolved(&self) -> bool {
        self.original != self.ip.to_string()
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.was_resolved() {
            write!(f, "{} ({})", self.original, self.ip)
        } else {
            write!(f, "{}", self.ip)
        }
    }
}

/// Check if a string is a syntactically valid hostname.
fn is_valid_hostname(s: &str) -> bool {
    // A fully-qualified name may carry one trailing root dot.
    let s = s.strip_suffix('.').unwrap_or(s);
    if s.is_empty() || s.len() > 253 {
        return false;
    }

    s.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && label.chars().next().is_some_and(|c| c.is_ascii_alphanumeric())
            && label.chars().last().is_some_and(|c| c.is_ascii_alphanumeric())
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}
