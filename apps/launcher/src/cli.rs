//! Command line surface: `start [port] [dynamicPort]` and `shutdown`.

use launcher_core::error::CoreError;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

pub const NO_ARGUMENTS_MESSAGE: &str = "No arguments.";

#[derive(Debug, Parser)]
#[command(name = "solr-launcher", version, about = "Start or stop the bundled Solr server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Start the server and keep running until it is shut down
    Start {
        /// Port to bind. Falls back to the port recorded in config.properties
        #[arg(allow_negative_numbers = true)]
        port: Option<String>,
        /// `dynamicPort` to search for a free port when none is usable
        mode: Option<String>,
        /// Anything after the mode is accepted and ignored.
        #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
        ignored: Vec<String>,
    },
    /// Stop the server recorded in config.properties
    Shutdown {
        #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
        ignored: Vec<String>,
    },
}

/// What the process should do with its arguments.
#[derive(Debug)]
pub enum Invocation {
    Run(Command),
    /// `--help` or `--version`: print and exit successfully.
    Informational(clap::Error),
    Invalid(CoreError),
}

/// Parse the full argument list, program name included.
///
/// The command word is matched case-insensitively.
#[track_caller]
pub fn parse_args(mut args: Vec<String>) -> Invocation {
    if args.len() < 2 {
        return Invocation::Invalid(CoreError::argument(NO_ARGUMENTS_MESSAGE));
    }

    if let Some(word) = args.get_mut(1)
        && !word.starts_with('-')
    {
        *word = word.to_lowercase();
    }

    match Cli::try_parse_from(args) {
        Ok(cli) => Invocation::Run(cli.command),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            Invocation::Informational(e)
        }
        Err(e) => Invocation::Invalid(CoreError::argument(clap_summary(&e))),
    }
}

/// First line of a clap error without its `error: ` prefix.
fn clap_summary(error: &clap::Error) -> String {
    let rendered = error.to_string();
    let first_line = rendered.lines().next().unwrap_or_default().trim();

    first_line
        .strip_prefix("error:")
        .unwrap_or(first_line)
        .trim()
        .to_string()
}
