//! CLI argument parsing using clap derive

use std::path::PathBuf;

use ckv::{Nesting, ParseOptions};
use clap::{Parser, Subcommand};

/// Read and edit ckv configuration files
#[derive(Parser, Debug)]
#[command(name = "ckv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Allow a block's children to be indented more than one tab deeper
    #[arg(long, global = true, env = "CKV_LENIENT_NESTING")]
    pub lenient_nesting: bool,

    /// Treat double quotes in values as ordinary characters
    #[arg(long, global = true, env = "CKV_RAW_QUOTES")]
    pub raw_quotes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn parse_options(&self) -> ParseOptions {
        let nesting = if self.lenient_nesting {
            Nesting::Lenient
        } else {
            Nesting::Strict
        };
        ParseOptions::new()
            .with_nesting(nesting)
            .with_quoted_values(!self.raw_quotes)
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the value stored at a dotted key
    Get { file: PathBuf, key: String },

    /// Change the value of an existing key
    ///
    /// Examples:
    ///   ckv set app.ckv server.port 8080
    ///   ckv set app.ckv name "" --dry-run
    Set {
        file: PathBuf,
        key: String,
        value: String,

        /// Show the change as a diff without writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove a key, or a whole block with everything under it
    Remove {
        file: PathBuf,
        key: String,

        /// Show the change as a diff without writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Print every value with its dotted key
    Dump {
        file: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Check that a file parses
    Check { file: PathBuf },
}
