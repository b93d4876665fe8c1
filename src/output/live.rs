//! Live terminal feedback while a scan runs.

use super::plain::{live_host_line, open_port_row};
use crate::scanner::{LiveHost, OpenPort, ScanObserver};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Prints findings as they arrive, optionally under a progress bar.
pub struct ConsoleObserver {
    progress: Option<ProgressBar>,
}

impl ConsoleObserver {
    /// Plain line output.
    pub fn new() -> Self {
        Self { progress: None }
    }

    /// Line output routed through a progress bar of `total` units.
    pub fn with_progress(total: usize) -> Self {
        let pb = ProgressBar::new(total as u64);
        if let Ok(bar_style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)",
        ) {
            pb.set_style(bar_style.progress_chars("=>-"));
        }
        Self { progress: Some(pb) }
    }

    /// Clear the bar once the barrier has been reached.
    pub fn finish(&self) {
        if let Some(pb) = &self.progress {
            pb.finish_and_clear();
        }
    }

    fn emit(&self, line: String) {
        match &self.progress {
            Some(pb) => pb.println(line),
            None => println!("{}", line),
        }
    }
}

impl Default for ConsoleObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanObserver for ConsoleObserver {
    fn open_port(&self, port: &OpenPort) {
        self.emit(style(open_port_row(port)).green().to_string());
    }

    fn live_host(&self, host: &LiveHost) {
        self.emit(style(live_host_line(host)).green().to_string());
    }

    fn unit_complete(&self) {
        if let Some(pb) = &self.progress {
            pb.inc(1);
        }
    }
}
