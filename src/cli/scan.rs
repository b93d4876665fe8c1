//! Scan subcommand implementation.
//!
//! Handles `portsweep scan <target>`: resolve once, probe the range,
//! print as ports open, then summarize and optionally save.

use super::RunOptions;
use crate::error::CliResult;
use crate::output::{self, ConsoleObserver};
use crate::report::write_report;
use crate::scanner::{PortScanReport, ScanController};
use crate::types::{PortRange, ScanRequest, ScanTarget};
use clap::Parser;
use std::sync::Arc;
use tracing::warn;

/// Scan a target for open TCP ports.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
pub struct ScanCommand {
    /// Target IP address or hostname (e.g. 127.0.0.1 or scanme.nmap.org)
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Inclusive port range, e.g. "1-1024" or a single port
    #[arg(short, long, default_value = "1-1024")]
    pub ports: PortRange,

    /// Save results to scan_results_<ip>_<start>-<end>.<ext>
    #[arg(short, long)]
    pub save: bool,
}

impl ScanCommand {
    /// Execute the scan command.
    pub async fn execute(&self, options: &RunOptions) -> CliResult<()> {
        // Resolution failure aborts before any probe is sent.
        let target = ScanTarget::resolve(&self.target).await?;
        let request = ScanRequest::new(target, self.ports);

        output::print_scan_header(&request);

        let observer = Arc::new(if options.progress {
            ConsoleObserver::with_progress(request.ports().len())
        } else {
            ConsoleObserver::new()
        });
        let controller = ScanController::new(observer.clone());

        let report = controller.port_scan(&request).await?;
        observer.finish();

        output::print_scan_summary(&report);

        if self.save {
            save_report(&report, options)?;
        }

        Ok(())
    }
}

fn save_report(report: &PortScanReport, options: &RunOptions) -> CliResult<()> {
    if report.open_ports.is_empty() {
        output::print_info("No open ports found, nothing saved.");
        return Ok(());
    }

    match write_report(report, &options.report_dir, options.report_format) {
        Ok(path) => {
            output::print_success(&format!("Results saved to {}", path.display()));
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "report not saved");
            Err(e.into())
        }
    }
}
