//! Per-mode orchestration: enumerate units, time the run, collect results.

use crate::error::{ScanError, ScanResult};
use crate::scanner::aggregator::{Aggregator, ResultSet};
use crate::scanner::dispatcher::Dispatcher;
use crate::scanner::icmp::PingProbe;
use crate::scanner::tcp::TcpConnectProbe;
use crate::scanner::traits::{LiveHost, OpenPort, Probe, ProbeOutcome};
use crate::scanner::{HOST_SWEEP_POOL_SIZE, PORT_SCAN_POOL_SIZE, PROBE_TIMEOUT};
use crate::types::{HostRange, NetworkPrefix, Port, PortRange, ScanRequest, ScanTarget, SweepRequest};
use chrono::{DateTime, Local};
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Receives progress while a scan is running.
///
/// Calls arrive from worker tasks, in completion order.
pub trait ScanObserver: Send + Sync {
    fn open_port(&self, _port: &OpenPort) {}

    fn live_host(&self, _host: &LiveHost) {}

    /// One unit finished, whatever its outcome.
    fn unit_complete(&self) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl ScanObserver for SilentObserver {}

/// Final state of a port scan.
#[derive(Debug, Clone)]
pub struct PortScanReport {
    pub target: ScanTarget,
    pub ports: PortRange,
    pub started_at: DateTime<Local>,
    pub duration: Duration,
    pub open_ports: ResultSet<OpenPort>,
}

/// Final state of a host sweep.
#[derive(Debug, Clone)]
pub struct SweepReport {
    pub prefix: NetworkPrefix,
    pub hosts: HostRange,
    pub started_at: DateTime<Local>,
    pub duration: Duration,
    pub live_hosts: ResultSet<LiveHost>,
}

/// Glues enumeration, dispatch, and aggregation together for each mode.
pub struct ScanController {
    observer: Arc<dyn ScanObserver>,
}

impl ScanController {
    pub fn new(observer: Arc<dyn ScanObserver>) -> Self {
        Self { observer }
    }

    /// TCP connect scan with the standard probe and pool size.
    pub async fn port_scan(&self, request: &ScanRequest) -> ScanResult<PortScanReport> {
        let probe = TcpConnectProbe::new(request.target().ip, PROBE_TIMEOUT);
        self.port_scan_with(request, Arc::new(probe), PORT_SCAN_POOL_SIZE)
            .await
    }

    /// Port scan with an arbitrary probe and pool size.
    pub async fn port_scan_with<P>(
        &self,
        request: &ScanRequest,
        probe: Arc<P>,
        pool_size: usize,
    ) -> ScanResult<PortScanReport>
    where
        P: Probe<Unit = Port, Finding = OpenPort> + 'static,
    {
        info!(
            target = %request.target(),
            ports = %request.ports(),
            "port scan started"
        );

        let observer = Arc::clone(&self.observer);
        let (open_ports, started_at, duration) = collect(
            request.units(),
            probe,
            pool_size,
            move |outcome: &ProbeOutcome<OpenPort>| {
                if let ProbeOutcome::Open(port) = outcome {
                    observer.open_port(port);
                }
                observer.unit_complete();
            },
        )
        .await?;

        info!(open = open_ports.len(), elapsed_ms = duration.as_millis() as u64, "port scan finished");

        Ok(PortScanReport {
            target: request.target().clone(),
            ports: request.ports(),
            started_at,
            duration,
            open_ports,
        })
    }

    /// ICMP sweep with the standard probe and pool size.
    pub async fn host_sweep(&self, request: &SweepRequest) -> ScanResult<SweepReport> {
        self.host_sweep_with(request, Arc::new(PingProbe::new(PROBE_TIMEOUT)), HOST_SWEEP_POOL_SIZE)
            .await
    }

    /// Host sweep with an arbitrary probe and pool size.
    pub async fn host_sweep_with<P>(
        &self,
        request: &SweepRequest,
        probe: Arc<P>,
        pool_size: usize,
    ) -> ScanResult<SweepReport>
    where
        P: Probe<Unit = Ipv4Addr, Finding = LiveHost> + 'static,
    {
        let (first, last) = request.bounds();
        info!(%first, %last, "host sweep started");

        let observer = Arc::clone(&self.observer);
        let (live_hosts, started_at, duration) = collect(
            request.addresses(),
            probe,
            pool_size,
            move |outcome: &ProbeOutcome<LiveHost>| {
                if let ProbeOutcome::Open(host) = outcome {
                    observer.live_host(host);
                }
                observer.unit_complete();
            },
        )
        .await?;

        info!(live = live_hosts.len(), elapsed_ms = duration.as_millis() as u64, "host sweep finished");

        Ok(SweepReport {
            prefix: request.prefix(),
            hosts: request.hosts(),
            started_at,
            duration,
            live_hosts,
        })
    }
}

/// Run the dispatcher into a fresh aggregator and time it.
async fn collect<P, I, N>(
    units: I,
    probe: Arc<P>,
    pool_size: usize,
    notify: N,
) -> ScanResult<(ResultSet<P::Finding>, DateTime<Local>, Duration)>
where
    P: Probe + 'static,
    I: IntoIterator<Item = P::Unit>,
    N: Fn(&ProbeOutcome<P::Finding>) + Send + Sync + 'static,
{
    let aggregator = Arc::new(Aggregator::new());
    let sink = Arc::clone(&aggregator);

    let started_at = Local::now();
    let clock = Instant::now();
    Dispatcher::new(pool_size)
        .run(units, probe, move |_, outcome| {
            notify(&outcome);
            sink.record(outcome);
        })
        .await?;
    let duration = clock.elapsed();

    let aggregator = Arc::into_inner(aggregator).ok_or(ScanError::AggregatorShared)?;
    Ok((aggregator.finalize(), started_at, duration))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banner::NO_BANNER;
    use crate::services::service_name;
    use async_trait::async_trait;
    use std::net::IpAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::net::TcpListener;

    #[derive(Default)]
    struct RecordingObserver {
        open: Mutex<Vec<u16>>,
        live: Mutex<Vec<Ipv4Addr>>,
        completed: AtomicUsize,
    }

    impl ScanObserver for RecordingObserver {
        fn open_port(&self, port: &OpenPort) {
            self.open.lock().unwrap().push(port.port.as_u16());
        }

        fn live_host(&self, host: &LiveHost) {
            self.live.lock().unwrap().push(host.address);
        }

        fn unit_complete(&self) {
            self.completed.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Only loopback .1 answers.
    struct LoopbackOnlyProbe;

    #[async_trait]
    impl Probe for LoopbackOnlyProbe {
        type Unit = Ipv4Addr;
        type Finding = LiveHost;

        fn name(&self) -> &'static str {
            "loopback-only"
        }

        async fn probe(&self, address: Ipv4Addr) -> ProbeOutcome<LiveHost> {
            if address == Ipv4Addr::LOCALHOST {
                ProbeOutcome::Open(LiveHost { address })
            } else {
                ProbeOutcome::Unreachable
            }
        }
    }

    /// Listener that accepts and stays silent, plus two released ports
    /// above it. Retries until three consecutive ports are available.
    async fn silent_listener_with_closed_neighbours() -> (u16, TcpListener) {
        loop {
            let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
            let port = listener.local_addr().unwrap().port();
            if port > 65533 {
                continue;
            }
            let neighbours_free = TcpListener::bind((Ipv4Addr::LOCALHOST, port + 1)).await.is_ok()
                && TcpListener::bind((Ipv4Addr::LOCALHOST, port + 2)).await.is_ok();
            if neighbours_free {
                return (port, listener);
            }
        }
    }

    #[tokio::test]
    async fn test_port_scan_finds_single_silent_listener() {
        let (open_port, listener) = silent_listener_with_closed_neighbours().await;
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let target = ScanTarget::new("127.0.0.1", IpAddr::V4(Ipv4Addr::LOCALHOST));
        let request = ScanRequest::new(
            target,
            PortRange::from_bounds(open_port, open_port + 2).unwrap(),
        );
        let observer = Arc::new(RecordingObserver::default());
        let controller = ScanController::new(observer.clone());

        let report = controller.port_scan(&request).await.unwrap();

        assert_eq!(report.open_ports.len(), 1);
        let found = &report.open_ports.as_slice()[0];
        assert_eq!(found.port.as_u16(), open_port);
        assert_eq!(found.service, service_name(open_port));
        assert_eq!(found.banner, NO_BANNER);
        assert_eq!(*observer.open.lock().unwrap(), vec![open_port]);
        assert_eq!(observer.completed.load(Ordering::SeqCst), 3);
        assert!(report.duration < PROBE_TIMEOUT * 3);
    }

    #[tokio::test]
    async fn test_sweep_reports_only_live_hosts() {
        let request = SweepRequest::new(
            "127.0.0.".parse().unwrap(),
            HostRange::new(1, 3).unwrap(),
        );
        let observer = Arc::new(RecordingObserver::default());
        let controller = ScanController::new(observer.clone());

        let report = controller
            .host_sweep_with(&request, Arc::new(LoopbackOnlyProbe), HOST_SWEEP_POOL_SIZE)
            .await
            .unwrap();

        let live: Vec<Ipv4Addr> = report.live_hosts.iter().map(|h| h.address).collect();
        assert_eq!(live, vec![Ipv4Addr::LOCALHOST]);
        assert_eq!(*observer.live.lock().unwrap(), vec![Ipv4Addr::LOCALHOST]);
        assert_eq!(observer.completed.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_pool_size_one_and_hundred_agree_on_real_sockets() {
        let (open_port, listener) = silent_listener_with_closed_neighbours().await;
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let ip = IpAddr::V4(Ipv4Addr::LOCALHOST);
        let request = ScanRequest::new(
            ScanTarget::new("127.0.0.1", ip),
            PortRange::from_bounds(open_port, open_port + 2).unwrap(),
        );
        let probe = Arc::new(TcpConnectProbe::new(ip, Duration::from_millis(200)));

        let serial_observer = Arc::new(RecordingObserver::default());
        let serial = ScanController::new(serial_observer.clone())
            .port_scan_with(&request, Arc::clone(&probe), 1)
            .await
            .unwrap();
        let parallel_observer = Arc::new(RecordingObserver::default());
        let parallel = ScanController::new(parallel_observer.clone())
            .port_scan_with(&request, probe, 100)
            .await
            .unwrap();

        assert_eq!(serial.open_ports, parallel.open_ports);
        let open: Vec<u16> = serial.open_ports.iter().map(|p| p.port.as_u16()).collect();
        assert_eq!(open, vec![open_port]);
        assert_eq!(serial_observer.completed.load(Ordering::SeqCst), 3);
        assert_eq!(parallel_observer.completed.load(Ordering::SeqCst), 3);
    }
}
