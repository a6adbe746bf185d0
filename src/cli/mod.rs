//! CLI module for orgstat
//!
//! Provides command-line interface for:
//! - init: Write a default config and create the schema
//! - serve: Run the HTTP API
//! - import: One-shot sheet import
//! - report: One-shot salary report

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{import, init, report, run, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_response;
