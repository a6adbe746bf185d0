//! CLI command implementations

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::http_server::{ApiState, HttpServer};
use crate::importer::{ImportSummary, Importer};
use crate::observability::{init_logging, CallLog};
use crate::report::ReportKind;
use crate::store::Database;

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
        Command::Import { config, path } => import(&config, path),
        Command::Report { kind, config } => report(&config, &kind),
    }
}

/// Write a default config file and create the schema
///
/// An existing config file is left untouched.
pub fn init(config_path: &Path) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::already_initialized(config_path.display()));
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let config = Config::default();
    fs::write(config_path, serde_json::to_string_pretty(&config)?)?;

    Database::open(&config.database_path)?;

    write_response(json!({
        "initialized": true,
        "config": config_path.display().to_string(),
        "database": config.database_path.display().to_string(),
    }))?;

    Ok(())
}

/// Serve the HTTP API until the process is stopped
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::load(config_path)?;
    config.http.override_port(port);
    init_logging(config.level());

    let db = Database::open(&config.database_path)?;
    info!(path = %config.database_path.display(), "database opened");

    if config.import.on_start {
        Importer::new(db.clone()).run(&config.import.path);
    }

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        let call_log = CallLog::start(Arc::new(db.clone()), config.call_log_capacity);
        let server = HttpServer::with_config(config.http.clone(), ApiState::new(db, call_log));

        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Import the sheet directory once and print the summary
pub fn import(config_path: &Path, path: Option<PathBuf>) -> CliResult<()> {
    let config = Config::load(config_path)?;
    init_logging(config.level());

    let dir = path.unwrap_or(config.import.path);
    let db = Database::open(&config.database_path)?;
    let summary: ImportSummary = Importer::new(db).run(&dir);

    write_response(serde_json::to_value(summary)?)?;

    Ok(())
}

/// Print one report as JSON
pub fn report(config_path: &Path, kind: &str) -> CliResult<()> {
    let kind: ReportKind = kind.parse().map_err(CliError::invalid_argument)?;
    let config = Config::load(config_path)?;

    let db = Database::open(&config.database_path)?;
    let rows = kind.render(&db.snapshot()?)?;

    write_response(json!({ "report": kind.as_str(), "rows": rows }))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir) -> PathBuf {
        let config_path = dir.path().join("orgstat.json");
        let config = Config {
            database_path: dir.path().join("org.db"),
            ..Config::default()
        };
        fs::write(&config_path, serde_json::to_string(&config).unwrap()).unwrap();
        config_path
    }

    #[test]
    fn test_init_refuses_existing_config() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir);

        let err = init(&config_path).unwrap_err();
        assert_eq!(err.code_str(), "ORGSTAT_CLI_ALREADY_INITIALIZED");
    }

    #[test]
    fn test_report_rejects_unknown_kind() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir);

        let err = report(&config_path, "q9").unwrap_err();
        assert_eq!(err.code_str(), "ORGSTAT_CLI_INVALID_ARGUMENT");
    }

    #[test]
    fn test_report_on_empty_database() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir);

        report(&config_path, "q1").unwrap();
        assert!(dir.path().join("org.db").exists());
    }

    #[test]
    fn test_import_missing_directory_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir);

        import(&config_path, Some(dir.path().join("nowhere"))).unwrap();
    }
}
