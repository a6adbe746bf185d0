//! CLI argument definitions using clap
//!
//! Commands:
//! - orgstat init --config <path>
//! - orgstat serve --config <path> [--port <n>]
//! - orgstat import --config <path> [--path <dir>]
//! - orgstat report <q1|q2|q3> --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// orgstat - organization records and salary reports
#[derive(Parser, Debug)]
#[command(name = "orgstat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default config file and create the database schema
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./orgstat.json")]
        config: PathBuf,
    },

    /// Start the HTTP API
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./orgstat.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Import the sheet directory once and exit
    Import {
        /// Path to configuration file
        #[arg(long, default_value = "./orgstat.json")]
        config: PathBuf,

        /// Override the configured sheet directory
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Print a salary report as JSON
    Report {
        /// Report to run: q1, q2 or q3
        kind: String,

        /// Path to configuration file
        #[arg(long, default_value = "./orgstat.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
