//! Validated, immutable scan requests.
//!
//! Every way of starting a scan (subcommand or interactive menu) ends up
//! building one of these before the engine runs.

use super::{HostRange, NetworkPrefix, Port, PortRange, ScanTarget};
use serde::Serialize;
use std::net::Ipv4Addr;

/// A TCP port scan of one resolved target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanRequest {
    target: ScanTarget,
    ports: PortRange,
}

impl ScanRequest {
    pub fn new(target: ScanTarget, ports: PortRange) -> Self {
        Self { target, ports }
    }

    pub fn target(&self) -> &ScanTarget {
        &self.target
    }

    pub fn ports(&self) -> PortRange {
        self.ports
    }

    /// The unit space, ascending.
    pub fn units(&self) -> impl Iterator<Item = Port> {
        self.ports.iter()
    }
}

/// An ICMP sweep over `prefix + i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweepRequest {
    prefix: NetworkPrefix,
    hosts: HostRange,
}

impl SweepRequest {
    pub fn new(prefix: NetworkPrefix, hosts: HostRange) -> Self {
        Self { prefix, hosts }
    }

    pub fn prefix(&self) -> NetworkPrefix {
        self.prefix
    }

    pub fn hosts(&self) -> HostRange {
        self.hosts
    }

    /// First and last address of the sweep.
    pub fn bounds(&self) -> (Ipv4Addr, Ipv4Addr) {
        (
            self.prefix.address(self.hosts.start()),
            self.prefix.address(self.hosts.end()),
        )
    }

    /// The unit space, ascending.
    pub fn addresses(&self) -> impl Iterator<Item = Ipv4Addr> {
        let prefix = self.prefix;
        self.hosts.iter().map(move |i| prefix.address(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::IpAddr;

    #[test]
    fn test_scan_request_units_cover_range() {
        let target = ScanTarget::new("127.0.0.1", IpAddr::V4(Ipv4Addr::LOCALHOST));
        let request = ScanRequest::new(target, PortRange::from_bounds(2000, 2002).unwrap());
        let ports: Vec<u16> = request.units().map(Port::as_u16).collect();
        assert_eq!(ports, vec![2000, 2001, 2002]);
    }

    #[test]
    fn test_sweep_addresses_are_prefix_plus_index() {
        let request = SweepRequest::new(
            "127.0.0".parse().unwrap(),
            HostRange::new(1, 3).unwrap(),
        );
        let addrs: Vec<String> = request.addresses().map(|a| a.to_string()).collect();
        assert_eq!(addrs, vec!["127.0.0.1", "127.0.0.2", "127.0.0.3"]);
        assert_eq!(
            request.bounds(),
            (Ipv4Addr::new(127, 0, 0, 1), Ipv4Addr::new(127, 0, 0, 3))
        );
    }
}
