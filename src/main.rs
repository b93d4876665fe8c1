use anyhow::Context;
use clap::Parser;
use portsweep::cli::{interactive, Cli, Commands, MenuSelection, Prompt};
use portsweep::output;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = cli.load_settings().unwrap_or_else(|e| {
        output::print_warning(&format!("{}; using default settings", e));
        Default::default()
    });
    init_tracing(cli.verbose, &settings.log_level);
    let options = cli.run_options(&settings);

    // Gather a complete, validated command before any network activity.
    let command = match cli.command {
        Some(command) => command,
        None => match from_menu() {
            Ok(Some(command)) => command,
            Ok(None) => {
                println!("{}", interactive::INVALID_CHOICE);
                return ExitCode::SUCCESS;
            }
            Err(e) => {
                output::print_error(&e.to_string());
                return ExitCode::FAILURE;
            }
        },
    };

    match run(command, options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn from_menu() -> portsweep::error::CliResult<Option<Commands>> {
    let stdin = io::stdin();
    let mut prompt = Prompt::new(stdin.lock(), io::stdout());
    Ok(match interactive::run_menu(&mut prompt)? {
        MenuSelection::Run(command) => Some(command),
        MenuSelection::Invalid(choice) => {
            tracing::debug!(%choice, "menu choice rejected");
            None
        }
    })
}

fn run(command: Commands, options: portsweep::cli::RunOptions) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(command.execute(&options))?;
    Ok(())
}

fn init_tracing(verbose: u8, fallback: &str) {
    let level = match verbose {
        0 => fallback,
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
