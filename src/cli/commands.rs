//! CLI command dispatch.
//!
//! `serve` is the long-running mode: it resolves configuration, opens the
//! store (fatal if that fails — the process must not serve traffic
//! without its store), builds the schema, and runs the HTTP server on a
//! tokio runtime. `init` pre-creates the data directory.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::graphql::build_schema;
use crate::observability::{Logger, Severity};
use crate::registry::Registry;
use crate::server::{ApiServer, ServerConfig};
use crate::store::DocumentStore;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments and dispatch.
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args())
}

/// Dispatch an already-parsed command.
pub fn run_command(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Init { data_dir } => init(data_dir),
        Command::Serve { port, data_dir } => serve(port, data_dir),
    }
}

/// Environment configuration with CLI flag overrides applied.
fn load_config(port: Option<u16>, data_dir: Option<PathBuf>) -> CliResult<Config> {
    let mut config = Config::from_env().map_err(|e| CliError::config_error(e.to_string()))?;
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(data_dir) = data_dir {
        config.data_dir = data_dir;
    }
    Ok(config)
}

/// Create the data directory and an empty record log.
pub fn init(data_dir: Option<PathBuf>) -> CliResult<()> {
    let config = load_config(None, data_dir)?;
    let log_path = DocumentStore::log_path_for(&config.data_dir);

    if log_path.exists() {
        return Err(CliError::already_initialized());
    }

    DocumentStore::open(&config.data_dir).map_err(|e| CliError::boot_failed(e.to_string()))?;

    Logger::log(
        Severity::Info,
        "store_initialized",
        &[("log_path", &log_path.display().to_string())],
    );
    Ok(())
}

/// Open the store and serve the GraphQL endpoint until the process exits.
pub fn serve(port: Option<u16>, data_dir: Option<PathBuf>) -> CliResult<()> {
    let config = load_config(port, data_dir)?;

    // The store must open before any traffic is served.
    let registry = match Registry::open(&config.data_dir) {
        Ok(registry) => Arc::new(registry),
        Err(e) => {
            Logger::log_stderr(
                Severity::Fatal,
                "store_open_failed",
                &[
                    ("data_dir", &config.data_dir.display().to_string()),
                    ("error", &e.to_string()),
                ],
            );
            return Err(CliError::boot_failed(format!(
                "cannot open store at {}: {}",
                config.data_dir.display(),
                e
            )));
        }
    };

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        let (wielders, zanpakutos) = registry.record_counts().await;
        Logger::log(
            Severity::Info,
            "store_opened",
            &[
                ("data_dir", &config.data_dir.display().to_string()),
                ("wielders", &wielders.to_string()),
                ("zanpakutos", &zanpakutos.to_string()),
            ],
        );

        let schema = build_schema(registry.clone());
        let server = ApiServer::with_config(ServerConfig::with_port(config.port), schema);

        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}
