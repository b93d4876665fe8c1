//! ICMP echo probe.
//!
//! Delegates to the platform `ping` utility, which already carries the
//! privileges needed to send raw echo requests. One request per host, no
//! retries; every failure counts as "not live".

use crate::scanner::traits::{LiveHost, Probe, ProbeOutcome};
use async_trait::async_trait;
use std::net::Ipv4Addr;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::trace;

/// Extra time granted to the child process on top of the echo deadline
/// before it is killed.
const PROCESS_GRACE: Duration = Duration::from_millis(500);

/// Host liveness probe backed by the system `ping` command.
#[derive(Debug, Clone)]
pub struct PingProbe {
    program: String,
    timeout: Duration,
}

impl PingProbe {
    /// Create a probe that waits up to `timeout` for the echo reply.
    pub fn new(timeout: Duration) -> Self {
        Self {
            program: "ping".to_string(),
            timeout,
        }
    }

    /// Use a different executable, e.g. an absolute path to `ping`.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Arguments for a single echo request on this platform.
    fn arguments(&self, address: Ipv4Addr) -> Vec<String> {
        let secs = self.timeout.as_secs().max(1).to_string();

        let mut args: Vec<String> = if cfg!(windows) {
            vec![
                "-n".into(),
                "1".into(),
                "-w".into(),
                self.timeout.as_millis().to_string(),
            ]
        } else if cfg!(target_os = "macos") {
            vec!["-c".into(), "1".into(), "-t".into(), secs]
        } else {
            vec!["-c".into(), "1".into(), "-W".into(), secs]
        };
        args.push(address.to_string());
        args
    }
}

#[async_trait]
impl Probe for PingProbe {
    type Unit = Ipv4Addr;
    type Finding = LiveHost;

    fn name(&self) -> &'static str {
        "icmp-echo"
    }

    async fn probe(&self, address: Ipv4Addr) -> ProbeOutcome<LiveHost> {
        let child = Command::new(&self.program)
            .args(self.arguments(address))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn();

        let mut child = match child {
            Ok(child) => child,
            Err(e) => return ProbeOutcome::error(format!("failed to run {}: {}", self.program, e)),
        };

        match timeout(self.timeout + PROCESS_GRACE, child.wait()).await {
            Ok(Ok(status)) if status.success() => ProbeOutcome::Open(LiveHost { address }),
            Ok(Ok(status)) => {
                trace!(%address, ?status, "no echo reply");
                ProbeOutcome::Unreachable
            }
            Ok(Err(e)) => ProbeOutcome::error(e.to_string()),
            Err(_) => {
                // kill_on_drop reaps the child when it goes out of scope
                trace!(%address, "ping did not exit in time");
                ProbeOutcome::Unreachable
            }
        }
    }
}
