//! CLI definitions and handlers.
//!
//! - `portsweep scan <target>` - TCP port scan of one host
//! - `portsweep sweep <prefix>` - ICMP discovery across a range
//! - `portsweep` - interactive menu producing one of the above

pub mod interactive;
mod scan;
mod sweep;

pub use interactive::{MenuSelection, Prompt};
pub use scan::ScanCommand;
pub use sweep::SweepCommand;

use crate::config::AppSettings;
use crate::error::{CliResult, ConfigResult};
use crate::report::ReportFormat;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// portsweep - concurrent port scanner and live-host finder.
///
/// Run without a subcommand for the interactive menu.
#[derive(Parser, Debug)]
#[command(name = "portsweep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Concurrent TCP port scanner and ICMP host sweeper", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Path to a settings file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory for saved reports
    #[arg(long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Format for saved reports
    #[arg(long, global = true, value_enum)]
    pub format: Option<ReportFormat>,

    /// Show a progress bar while scanning
    #[arg(long, global = true)]
    pub progress: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Scan a target for open TCP ports
    #[command(alias = "s")]
    Scan(ScanCommand),

    /// Ping a range of addresses to find live hosts
    #[command(alias = "w")]
    Sweep(SweepCommand),
}

impl Commands {
    pub async fn execute(&self, options: &RunOptions) -> CliResult<()> {
        match self {
            Self::Scan(cmd) => cmd.execute(options).await,
            Self::Sweep(cmd) => cmd.execute(options).await,
        }
    }
}

/// Effective presentation and reporting options after merging the
/// settings file with command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub report_dir: PathBuf,
    pub report_format: ReportFormat,
    pub progress: bool,
}

impl Cli {
    /// Load the settings file named by `--config`, or the default one.
    pub fn load_settings(&self) -> ConfigResult<AppSettings> {
        match &self.config {
            Some(path) => AppSettings::load_from(path),
            None => AppSettings::load(),
        }
    }

    /// Flags win over settings.
    pub fn run_options(&self, settings: &AppSettings) -> RunOptions {
        RunOptions {
            report_dir: self
                .output_dir
                .clone()
                .unwrap_or_else(|| settings.report_dir()),
            report_format: self.format.unwrap_or(settings.report_format),
            progress: self.progress || settings.progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PortRange;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_scan_subcommand_parses_range() {
        let cli = Cli::try_parse_from(["portsweep", "scan", "127.0.0.1", "-p", "2000-2002", "--save"])
            .unwrap();
        match cli.command {
            Some(Commands::Scan(cmd)) => {
                assert_eq!(cmd.target, "127.0.0.1");
                assert_eq!(cmd.ports, PortRange::from_bounds(2000, 2002).unwrap());
                assert!(cmd.save);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_scan_subcommand_rejects_inverted_range() {
        assert!(Cli::try_parse_from(["portsweep", "scan", "localhost", "-p", "90-80"]).is_err());
    }

    #[test]
    fn test_sweep_subcommand_appends_dot() {
        let cli = Cli::try_parse_from(["portsweep", "sweep", "10.0.0", "-r", "1-3"]).unwrap();
        match cli.command {
            Some(Commands::Sweep(cmd)) => {
                assert_eq!(cmd.prefix.to_string(), "10.0.0.");
                assert_eq!(cmd.range.len(), 3);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["portsweep", "-vv"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_flags_override_settings() {
        let settings = AppSettings {
            report_dir: Some(PathBuf::from("/tmp/reports")),
            report_format: ReportFormat::Csv,
            progress: false,
            log_level: "warn".into(),
        };

        let cli = Cli::try_parse_from(["portsweep", "--format", "json", "--progress"]).unwrap();
        let options = cli.run_options(&settings);
        assert_eq!(options.report_format, ReportFormat::Json);
        assert_eq!(options.report_dir, PathBuf::from("/tmp/reports"));
        assert!(options.progress);

        let cli = Cli::try_parse_from(["portsweep", "--output-dir", "out"]).unwrap();
        let options = cli.run_options(&settings);
        assert_eq!(options.report_dir, PathBuf::from("out"));
        assert_eq!(options.report_format, ReportFormat::Csv);
    }
}
