//! `friends` command-line entry point.
//!
//! # Responsibility
//! - Resolve config, load the journal document, run one command and write
//!   the document back only when the command changed it.
//! - Map every failure to `Error: <message>` on stderr and exit status 1.

mod commands;
mod config;
mod render;
mod store;

use chrono::Local;
use clap::Parser;
use colored::Colorize;
use commands::{Command, CommandError};
use config::CliConfig;
use friends_core::{init_logging, Journal};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

/// friends - keep track of the people you spend time with
#[derive(Parser, Debug)]
#[command(name = "friends")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Journal document path
    #[arg(long, global = true)]
    filename: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error); logs go to FRIENDS_LOG_DIR
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Print query results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Debug)]
enum CliError {
    Config(String),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Command(CommandError),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(message) => write!(f, "{message}"),
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Command(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(_) => None,
            Self::Io { source, .. } => Some(source),
            Self::Command(err) => Some(err),
        }
    }
}

impl From<CommandError> for CliError {
    fn from(value: CommandError) -> Self {
        Self::Command(value)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} {err}", error_prefix(std::io::stderr().is_terminal()));
            ExitCode::FAILURE
        }
    }
}

/// `colored` only inspects stdout, so the stderr check happens here.
fn error_prefix(stderr_is_terminal: bool) -> String {
    if stderr_is_terminal {
        "Error:".red().to_string()
    } else {
        "Error:".to_string()
    }
}

fn run(cli: Cli) -> Result<Vec<String>, CliError> {
    let config = CliConfig::from_env(cli.filename, cli.log_level).map_err(CliError::Config)?;
    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(config.log_level, log_dir).map_err(CliError::Config)?;
    }

    let path = config.document_path.as_path();
    let text = store::load_document(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut journal = Journal::parse(&text);

    let outcome = commands::execute(cli.command, &mut journal, Local::now().date_naive(), cli.json)?;
    if outcome.changed {
        store::save_document(path, &journal.serialize()).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("event=document_persist module=cli status=ok");
    }
    Ok(outcome.lines)
}
