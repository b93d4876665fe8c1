//! Plain text output formatting.
//!
//! Produces the human-readable table rows and summaries.

use crate::report::format_duration;
use crate::scanner::{LiveHost, OpenPort, PortScanReport, SweepReport};
use crate::types::ScanRequest;
use console::style;

const RULE_WIDTH: usize = 60;

/// Column header of the open-port table.
pub fn table_header() -> String {
    format!("{:<10} {:<10} {:<15} {}", "Port", "State", "Service", "Banner")
}

/// One fixed-width row for an open port.
pub fn open_port_row(open: &OpenPort) -> String {
    format!(
        "Port {:5} | OPEN | {:12} | {}",
        open.port, open.service, open.banner
    )
}

/// Line announcing a responsive host.
pub fn live_host_line(host: &LiveHost) -> String {
    format!("{} is LIVE", host.address)
}

/// Print the banner shown before a port scan starts.
pub fn print_scan_header(request: &ScanRequest) {
    let target = request.target();
    if target.was_resolved() {
        println!("\nHostname resolved to: {}", style(target.ip).bold());
    }
    println!(
        "Scanning {} | Ports {}\n",
        style(target.ip).white().bold(),
        request.ports()
    );
    println!("{}", style(table_header()).bold());
    println!("{}", "=".repeat(RULE_WIDTH));
}

/// Print the summary after the port scan barrier.
pub fn print_scan_summary(report: &PortScanReport) {
    println!("{}\n", "=".repeat(RULE_WIDTH));
    println!("Scan finished in {}", format_duration(report.duration));
    println!(
        "Found {} open port(s)",
        style(report.open_ports.len()).green().bold()
    );
}

/// Print the line shown before a sweep starts.
pub fn print_sweep_header(first: impl std::fmt::Display, last: impl std::fmt::Display) {
    println!("\nPinging {} to {}...\n", first, last);
}

/// Print the summary after the sweep barrier.
pub fn print_sweep_summary(report: &SweepReport) {
    println!(
        "\nPing complete. Found {} live host(s).",
        style(report.live_hosts.len()).green().bold()
    );
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Port;
    use std::net::Ipv4Addr;

    #[test]
    fn test_open_port_row_is_fixed_width() {
        let row = open_port_row(&OpenPort {
            port: Port::new(22).unwrap(),
            service: "ssh".into(),
            banner: "SSH-2.0-OpenSSH_9.6".into(),
        });
        assert_eq!(row, "Port    22 | OPEN | ssh          | SSH-2.0-OpenSSH_9.6");
    }

    #[test]
    fn test_table_header_columns() {
        assert_eq!(
            table_header(),
            "Port       State      Service         Banner"
        );
    }

    #[test]
    fn test_live_host_line() {
        let line = live_host_line(&LiveHost {
            address: Ipv4Addr::new(192, 168, 1, 1),
        });
        assert_eq!(line, "192.168.1.1 is LIVE");
    }
}
