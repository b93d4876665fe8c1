//! Saved port-scan reports.
//!
//! Pure serialization of a finished [`PortScanReport`]; nothing here
//! touches the engine.

use crate::error::{ReportError, ReportResult};
use crate::scanner::{OpenPort, PortScanReport};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File format for saved reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Plain text, one line per open port
    #[default]
    Text,
    /// JSON document
    Json,
    /// CSV table
    Csv,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// `scan_results_<ip>_<start>-<end>.<ext>`
pub fn file_name(report: &PortScanReport, format: ReportFormat) -> String {
    format!(
        "scan_results_{}_{}-{}.{}",
        report.target.ip,
        report.ports.start(),
        report.ports.end(),
        format.extension()
    )
}

/// Scan duration as shown to the operator.
pub fn format_duration(duration: std::time::Duration) -> String {
    format!("{:.2}s", duration.as_secs_f64())
}

/// Render the text report.
pub fn render_text(report: &PortScanReport) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "Port Scanner Results");
    let _ = writeln!(out, "Target IP: {}", report.target.ip);
    let _ = writeln!(out, "Scanned ports: {}", report.ports);
    let _ = writeln!(out, "Time taken: {}", format_duration(report.duration));
    let _ = writeln!(
        out,
        "Date of scan: {}",
        report.started_at.format("%Y-%m-%d %H:%M:%S")
    );
    for open in &report.open_ports {
        let _ = writeln!(out, "{}", text_line(open));
    }
    out
}

fn text_line(open: &OpenPort) -> String {
    format!("Port {} | OPEN | {} | {}", open.port, open.service, open.banner)
}

#[derive(Serialize)]
struct JsonReport<'a> {
    target: &'a str,
    ip_address: String,
    ports: String,
    started_at: String,
    duration_ms: u64,
    open_ports: &'a [OpenPort],
}

/// Render the JSON report.
pub fn render_json(report: &PortScanReport) -> ReportResult<String> {
    let doc = JsonReport {
        target: &report.target.original,
        ip_address: report.target.ip.to_string(),
        ports: report.ports.to_string(),
        started_at: report.started_at.to_rfc3339(),
        duration_ms: report.duration.as_millis() as u64,
        open_ports: report.open_ports.as_slice(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Render the CSV report.
pub fn render_csv(report: &PortScanReport) -> ReportResult<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["port", "state", "service", "banner"])?;
    for open in &report.open_ports {
        let port = open.port.to_string();
        wtr.write_record([
            port.as_str(),
            "open",
            open.service.as_str(),
            open.banner.as_str(),
        ])?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| ReportError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write `report` into `dir` and return the file path.
pub fn write_report(report: &PortScanReport, dir: &Path, format: ReportFormat) -> ReportResult<PathBuf> {
    let content = match format {
        ReportFormat::Text => render_text(report),
        ReportFormat::Json => render_json(report)?,
        ReportFormat::Csv => render_csv(report)?,
    };

    let path = dir.join(file_name(report, format));
    fs::write(&path, content).map_err(|source| ReportError::Write {
        path: path.clone(),
        source,
    })?;

    debug!(path = %path.display(), %format, "report written");
    Ok(path)
}
