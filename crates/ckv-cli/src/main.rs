//! ckv CLI
//!
//! Query and edit ckv configuration files from the shell.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = cli.parse_options();
    tracing::debug!(?options, "Grammar options");

    match cli.command {
        Commands::Get { file, key } => commands::run_get(&file, &key, options),
        Commands::Set {
            file,
            key,
            value,
            dry_run,
        } => commands::run_set(&file, &key, &value, dry_run, options),
        Commands::Remove { file, key, dry_run } => {
            commands::run_remove(&file, &key, dry_run, options)
        }
        Commands::Dump { file, json } => commands::run_dump(&file, json, options),
        Commands::Check { file } => commands::run_check(&file, options),
    }
}

/// Log to stderr. `--verbose` forces debug, otherwise `RUST_LOG` or warn.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
