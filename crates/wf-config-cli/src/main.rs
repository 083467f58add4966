//! Command-line tool that generates and inspects blog server `config.ini`
//! files.
//!
//! # Usage
//!
//! ```text
//! wfconfig [--config <PATH>] <COMMAND>
//!
//! Commands:
//!   init   Write a config with sane defaults
//!   show   Print the config as INI or JSON
//!   check  Summarise backend and TLS settings
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `info`);
//! command output goes to stdout.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Generate and inspect blog server configuration files.
#[derive(Debug, Parser)]
#[command(name = "wfconfig", version)]
struct Cli {
    /// Path to the configuration file.  An empty value means `config.ini`.
    #[arg(short, long, global = true, default_value = wf_config::FILE_NAME)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write a new config file with sane defaults.
    Init {
        /// Use SQLite instead of MySQL.
        #[arg(long)]
        sqlite: bool,
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Load the config file and print it.
    Show {
        /// Print JSON instead of INI.  The database password is masked.
        #[arg(long)]
        json: bool,
    },
    /// Load the config file and summarise its deployment mode.
    Check,
}

fn main() -> ExitCode {
    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut out = std::io::stdout().lock();

    let result = match cli.command {
        Command::Init { sqlite, force } => commands::init(&cli.config, sqlite, force, &mut out),
        Command::Show { json } => commands::show(&cli.config, json, &mut out),
        Command::Check => commands::check(&cli.config, &mut out),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
