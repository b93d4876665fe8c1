//! TCP connect probe.
//!
//! Performs a full handshake through the operating system's socket API,
//! then grabs a best-effort banner from ports that accept.

use crate::banner::grab_banner;
use crate::scanner::traits::{OpenPort, Probe, ProbeOutcome};
use crate::services::service_name;
use crate::types::Port;
use async_trait::async_trait;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

/// TCP connect probe against a single target.
///
/// Does not require elevated privileges.
#[derive(Debug, Clone)]
pub struct TcpConnectProbe {
    target: IpAddr,
    timeout: Duration,
}

impl TcpConnectProbe {
    /// Create a new probe.
    ///
    /// # Arguments
    /// * `target` - Target IP address to scan
    /// * `timeout` - Deadline for the connect, and separately for the banner exchange
    pub fn new(target: IpAddr, timeout: Duration) -> Self {
        Self { target, timeout }
    }
}

/// Map a failed connect to an outcome.
fn classify_connect_error(err: &io::Error) -> ProbeOutcome<OpenPort> {
    match err.kind() {
        io::ErrorKind::ConnectionRefused => ProbeOutcome::Closed,
        io::ErrorKind::TimedOut
        | io::ErrorKind::HostUnreachable
        | io::ErrorKind::NetworkUnreachable => ProbeOutcome::Unreachable,
        _ => ProbeOutcome::error(err.to_string()),
    }
}

#[async_trait]
impl Probe for TcpConnectProbe {
    type Unit = Port;
    type Finding = OpenPort;

    fn name(&self) -> &'static str {
        "tcp-connect"
    }

    async fn probe(&self, port: Port) -> ProbeOutcome<OpenPort> {
        let addr = SocketAddr::new(self.target, port.as_u16());

        let mut stream = match timeout(self.timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                trace!(%addr, error = %e, "connect failed");
                return classify_connect_error(&e);
            }
            Err(_) => return ProbeOutcome::Unreachable,
        };

        let service = service_name(port.as_u16()).to_string();
        let banner = grab_banner(&mut stream, self.timeout).await;

        // Best effort; the socket is released on drop either way.
        let _ = timeout(self.timeout, stream.shutdown()).await;
        drop(stream);

        ProbeOutcome::Open(OpenPort {
            port,
            service,
            banner,
        })
    }
}
