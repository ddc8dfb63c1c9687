// crates/capacity-sync-cli/src/main.rs
// ============================================================================
// Module: Capacity Sync CLI Entry Point
// Description: Command dispatcher for catalog capacity sweeps.
// Purpose: Load configuration, wire providers, and run one sweep per call.
// Dependencies: clap, capacity-sync-config, capacity-sync-core,
//               capacity-sync-providers, tokio, tracing-subscriber
// ============================================================================

//! ## Overview
//! The `capacity-sync` binary walks the catalog once and rewrites stale
//! capacity labels. `run` performs the sweep; `config validate` checks a
//! configuration file without touching any remote service.
//!
//! Logs go to stderr through `tracing-subscriber`; the final sweep summary is
//! written to stdout as one JSON line. A sweep that stops on a listing
//! failure exits non-zero.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use capacity_sync_config::CapacitySyncConfig;
use capacity_sync_config::CatalogConfig;
use capacity_sync_config::LogFormat;
use capacity_sync_config::LoggingConfig;
use capacity_sync_config::ObjectStoreConfig;
use capacity_sync_core::CatalogWalker;
use capacity_sync_core::SweepSummary;
use capacity_sync_core::TracingReporter;
use capacity_sync_providers::BasicCredentials;
use capacity_sync_providers::S3ObjectStore;
use capacity_sync_providers::S3ObjectStoreConfig;
use capacity_sync_providers::WordPressCatalog;
use capacity_sync_providers::WordPressCatalogConfig;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Capacity Sync command-line interface.
#[derive(Parser, Debug)]
#[command(name = "capacity-sync", version, about = "Reconcile catalog capacity labels")]
struct Cli {
    /// Selected command.
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Sweep the catalog once and rewrite stale capacity labels.
    Run(RunCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments for the `run` command.
#[derive(Args, Debug, Default)]
struct RunCommand {
    /// Optional config file path (defaults to capacity-sync.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Compute and report changes without writing them back.
    #[arg(long)]
    dry_run: bool,
    /// Override the page limit for this sweep.
    #[arg(long, value_name = "PAGES")]
    max_pages: Option<u32>,
    /// Override the number of entries requested per page.
    #[arg(long, value_name = "ENTRIES")]
    page_size: Option<u32>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to capacity-sync.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// CLI error wrapper for user-facing messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(command) => command_run(command).await,
        Commands::Config {
            command,
        } => command_config(command),
    }
}

// ============================================================================
// SECTION: Run Command
// ============================================================================

/// Executes the `run` command.
async fn command_run(command: RunCommand) -> CliResult<ExitCode> {
    let mut config = CapacitySyncConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))?;
    apply_overrides(&mut config, &command)?;
    init_logging(&config.logging)?;

    let credentials =
        catalog_credentials(&config.catalog, |name| std::env::var(name).ok())?;
    let catalog = WordPressCatalog::new(catalog_config(&config.catalog, credentials))
        .map_err(|err| CliError::new(format!("failed to build catalog client: {err}")))?;
    let store = S3ObjectStore::connect(object_store_config(&config.object_store))
        .await
        .map_err(|err| CliError::new(format!("failed to build object store: {err}")))?;
    tracing::info!(
        catalog = %config.catalog.base_url,
        collection = %config.catalog.collection,
        bucket = %config.object_store.bucket,
        "providers ready"
    );

    let settings = config.sweep_settings();
    let reporter = TracingReporter;
    let summary = CatalogWalker::new(&catalog, &store, &reporter, &settings).run().await;

    let rendered = serde_json::to_string(&summary)
        .map_err(|err| CliError::new(format!("failed to render summary: {err}")))?;
    write_stdout_line(&rendered).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(exit_code_for(&summary))
}

/// Applies command-line overrides and revalidates the sweep section.
fn apply_overrides(config: &mut CapacitySyncConfig, command: &RunCommand) -> CliResult<()> {
    if command.dry_run {
        config.sweep.dry_run = true;
    }
    if let Some(max_pages) = command.max_pages {
        config.sweep.max_pages = max_pages;
    }
    if let Some(page_size) = command.page_size {
        config.sweep.page_size = page_size;
    }
    config.sweep.validate().map_err(|err| CliError::new(err.to_string()))
}

/// Resolves catalog credentials, reading the password through `lookup`.
fn catalog_credentials<F>(
    catalog: &CatalogConfig,
    lookup: F,
) -> CliResult<Option<BasicCredentials>>
where
    F: Fn(&str) -> Option<String>,
{
    match (&catalog.username, &catalog.password_env) {
        (None, None) => Ok(None),
        (Some(username), Some(variable)) => {
            let password = lookup(variable).filter(|value| !value.is_empty()).ok_or_else(|| {
                CliError::new(format!("catalog password variable {variable} is not set"))
            })?;
            Ok(Some(BasicCredentials {
                username: username.clone(),
                password,
            }))
        }
        _ => Err(CliError::new(
            "catalog.username and catalog.password_env must be set together".to_string(),
        )),
    }
}

/// Builds the catalog client configuration.
fn catalog_config(
    catalog: &CatalogConfig,
    credentials: Option<BasicCredentials>,
) -> WordPressCatalogConfig {
    WordPressCatalogConfig {
        base_url: catalog.base_url.clone(),
        collection: catalog.collection.clone(),
        variant_groups_key: catalog.variant_groups_key.clone(),
        credentials,
        timeout: catalog.timeout(),
        user_agent: user_agent(),
    }
}

/// Builds the object store configuration.
fn object_store_config(store: &ObjectStoreConfig) -> S3ObjectStoreConfig {
    S3ObjectStoreConfig {
        bucket: store.bucket.clone(),
        region: store.region.clone(),
        endpoint: store.endpoint.clone(),
        force_path_style: store.force_path_style,
        prefix: store.prefix.clone(),
        timeout: store.timeout(),
    }
}

/// Returns the user agent sent to the catalog.
fn user_agent() -> String {
    format!("capacity-sync/{}", env!("CARGO_PKG_VERSION"))
}

/// Maps a sweep summary to the process exit code.
fn exit_code_for(summary: &SweepSummary) -> ExitCode {
    if summary.is_aborted() { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

// ============================================================================
// SECTION: Config Command
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
    }
}

/// Executes `config validate`.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    CapacitySyncConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))?;
    write_stdout_line("config ok").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Logging
// ============================================================================

/// Builds the level filter; `RUST_LOG` takes precedence over the config.
fn log_filter(logging: &LoggingConfig) -> CliResult<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&logging.level)
            .map_err(|err| CliError::new(format!("invalid log level: {err}"))),
    }
}

/// Installs the global tracing subscriber writing to stderr.
fn init_logging(logging: &LoggingConfig) -> CliResult<()> {
    let registry = tracing_subscriber::registry().with(log_filter(logging)?);
    let installed = match logging.format {
        LogFormat::Text => {
            registry.with(fmt::layer().with_writer(std::io::stderr).with_target(false)).try_init()
        }
        LogFormat::Json => registry.with(fmt::layer().json().with_writer(std::io::stderr)).try_init(),
    };
    installed.map_err(|err| CliError::new(format!("failed to initialize logging: {err}")))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
