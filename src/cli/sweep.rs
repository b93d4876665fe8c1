//! Sweep subcommand implementation.

use super::RunOptions;
use crate::error::CliResult;
use crate::output::{self, ConsoleObserver};
use crate::scanner::ScanController;
use crate::types::{HostRange, NetworkPrefix, SweepRequest};
use clap::Parser;
use std::sync::Arc;

/// Ping every address in `<prefix><start>..=<prefix><end>`.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
pub struct SweepCommand {
    /// Base network, e.g. "192.168.1." (trailing dot optional)
    #[arg(value_name = "PREFIX")]
    pub prefix: NetworkPrefix,

    /// Inclusive range of final octets
    #[arg(short, long, default_value = "1-254")]
    pub range: HostRange,
}

impl SweepCommand {
    pub async fn execute(&self, options: &RunOptions) -> CliResult<()> {
        let request = SweepRequest::new(self.prefix, self.range);
        let (first, last) = request.bounds();
        output::print_sweep_header(first, last);

        let observer = Arc::new(if options.progress {
            ConsoleObserver::with_progress(request.hosts().len())
        } else {
            ConsoleObserver::new()
        });
        let controller = ScanController::new(observer.clone());

        let report = controller.host_sweep(&request).await?;
        observer.finish();

        output::print_sweep_summary(&report);
        Ok(())
    }
}
