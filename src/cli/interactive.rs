//! Interactive menu.
//!
//! Reads answers from any line source and turns them into the same
//! validated commands the subcommands produce. Nothing here touches the
//! network; malformed input fails before a scan can start.

use super::{Commands, ScanCommand, SweepCommand};
use crate::error::CliResult;
use crate::types::{HostRange, NetworkPrefix, Port, PortRange};
use std::io::{self, BufRead, Write};

/// Message printed for anything other than `1` or `2`.
pub const INVALID_CHOICE: &str = "Invalid choice. Please enter 1 or 2.";

/// Question/answer channel over a reader and a writer.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a line of text.
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// Ask a question and return the trimmed answer.
    ///
    /// End of input is an error: there is no sensible default answer.
    pub fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input ended before the question was answered",
            ));
        }
        Ok(line.trim().to_string())
    }
}

/// What the operator picked from the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuSelection {
    Run(Commands),
    /// Anything other than `1` or `2`.
    Invalid(String),
}

/// Show the menu and collect the inputs for the chosen mode.
pub fn run_menu<R: BufRead, W: Write>(prompt: &mut Prompt<R, W>) -> CliResult<MenuSelection> {
    let rule = "=".repeat(50);
    prompt.say(&rule)?;
    prompt.say("1. Simple port scanner")?;
    prompt.say("2. Ping range to discover live hosts")?;
    prompt.say(&rule)?;

    let choice = prompt.ask("Choose an option (1 or 2): ")?;
    let command = match choice.as_str() {
        "1" => Commands::Scan(ask_port_scan(prompt)?),
        "2" => Commands::Sweep(ask_sweep(prompt)?),
        _ => return Ok(MenuSelection::Invalid(choice)),
    };
    Ok(MenuSelection::Run(command))
}

fn ask_port_scan<R: BufRead, W: Write>(prompt: &mut Prompt<R, W>) -> CliResult<ScanCommand> {
    prompt.say("\nSimple Port Scanner")?;
    let target = prompt.ask("Enter IP or hostname, e.g., 127.0.0.1 or scanme.nmap.org): ")?;
    let start: Port = prompt.ask("Start port (e.g., 1): ")?.parse()?;
    let end: Port = prompt.ask("End port (e.g., 1024): ")?.parse()?;
    let ports = PortRange::new(start, end)?;
    let save = prompt
        .ask("Save results to file? (y/n): ")?
        .eq_ignore_ascii_case("y");

    Ok(ScanCommand {
        target,
        ports,
        save,
    })
}

fn ask_sweep<R: BufRead, W: Write>(prompt: &mut Prompt<R, W>) -> CliResult<SweepCommand> {
    prompt.say("\nPing - Discover Live Hosts")?;
    let prefix: NetworkPrefix = prompt
        .ask("Enter base network (e.g., 192.168.1.): ")?
        .parse()?;
    let range: HostRange = prompt.ask("Enter range (e.g., 1-254): ")?.parse()?;

    Ok(SweepCommand { prefix, range })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::io::Cursor;

    fn answer(script: &str) -> (CliResult<MenuSelection>, String) {
        let mut output = Vec::new();
        let result = {
            let mut prompt = Prompt::new(Cursor::new(script.as_bytes()), &mut output);
            run_menu(&mut prompt)
        };
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_port_scan_answers_become_scan_command() {
        let (result, transcript) = answer("1\nlocalhost\n2000\n2002\nY\n");

        let expected = ScanCommand {
            target: "localhost".into(),
            ports: PortRange::from_bounds(2000, 2002).unwrap(),
            save: true,
        };
        assert_eq!(
            result.unwrap(),
            MenuSelection::Run(Commands::Scan(expected))
        );
        assert!(transcript.contains("1. Simple port scanner"));
        assert!(transcript.contains("Save results to file? (y/n): "));
    }

    #[test]
    fn test_anything_but_y_means_no_save() {
        let (result, _) = answer("1\n10.0.0.1\n1\n10\nno\n");
        match result.unwrap() {
            MenuSelection::Run(Commands::Scan(cmd)) => assert!(!cmd.save),
            other => panic!("unexpected selection {:?}", other),
        }
    }

    #[test]
    fn test_sweep_answers_become_sweep_command() {
        let (result, _) = answer("2\n192.168.1\n1-254\n");
        match result.unwrap() {
            MenuSelection::Run(Commands::Sweep(cmd)) => {
                assert_eq!(cmd.prefix.to_string(), "192.168.1.");
                assert_eq!(cmd.range, HostRange::new(1, 254).unwrap());
            }
            other => panic!("unexpected selection {:?}", other),
        }
    }

    #[test]
    fn test_invalid_choice() {
        let (result, _) = answer("3\n");
        assert_eq!(result.unwrap(), MenuSelection::Invalid("3".into()));
    }

    #[test]
    fn test_malformed_port_aborts() {
        let (result, _) = answer("1\nlocalhost\nabc\n");
        assert!(matches!(result, Err(CliError::Port(_))));
    }

    #[test]
    fn test_inverted_port_range_aborts() {
        let (result, _) = answer("1\nlocalhost\n100\n50\nn\n");
        assert!(matches!(result, Err(CliError::Port(_))));
    }

    #[test]
    fn test_malformed_sweep_range_aborts() {
        let (result, _) = answer("2\n192.168.1.\n1to254\n");
        assert!(matches!(result, Err(CliError::HostRange(_))));
    }

    #[test]
    fn test_eof_is_an_input_error() {
        let (result, _) = answer("1\nlocalhost\n");
        assert!(matches!(result, Err(CliError::Input(_))));
    }
}
