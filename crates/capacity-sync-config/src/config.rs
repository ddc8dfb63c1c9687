// crates/capacity-sync-config/src/config.rs
// ============================================================================
// Module: Capacity Sync Configuration
// Description: Configuration loading and validation for the capacity sweep.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: capacity-sync-core, serde, toml, url
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The `[catalog]` and `[object_store]` sections are required; `[sweep]` and
//! `[logging]` fall back to defaults that reproduce the production sweep.
//! Secrets are never stored in the file: the catalog password is read from
//! the environment variable named by `catalog.password_env`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use capacity_sync_core::ReconcilePolicy;
use capacity_sync_core::SweepSettings;
use capacity_sync_core::TitleRules;
use capacity_sync_core::runtime::DEFAULT_DIVERGENCE_THRESHOLD_MB;
use capacity_sync_core::runtime::DEFAULT_ENTRY_DELAY_MS;
use capacity_sync_core::runtime::DEFAULT_MAX_PAGES;
use capacity_sync_core::runtime::DEFAULT_PAGE_SIZE;
use capacity_sync_core::runtime::DEFAULT_SAMPLE_CAP;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "capacity-sync.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "CAPACITY_SYNC_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Largest accepted page size.
pub(crate) const MAX_PAGE_SIZE: u32 = 100;
/// Largest accepted sample cap.
pub(crate) const MAX_SAMPLE_CAP: usize = 64;
/// Longest accepted pause between entries.
pub(crate) const MAX_ENTRY_DELAY_MS: u64 = 60_000;
/// Shortest accepted request timeout.
pub(crate) const MIN_TIMEOUT_MS: u64 = 100;
/// Longest accepted request timeout.
pub(crate) const MAX_TIMEOUT_MS: u64 = 120_000;
/// Accepted logging levels.
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

// ============================================================================
// SECTION: Root Config
// ============================================================================

/// Capacity sync configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CapacitySyncConfig {
    /// Catalog service connection.
    pub catalog: CatalogConfig,
    /// Object store connection.
    pub object_store: ObjectStoreConfig,
    /// Sweep tunables.
    #[serde(default)]
    pub sweep: SweepConfig,
    /// Logging output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CapacitySyncConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// The path is taken from `path`, else from [`CONFIG_ENV_VAR`], else the
    /// default file name in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", resolved.display())))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.catalog.validate()?;
        self.object_store.validate()?;
        self.sweep.validate()?;
        self.logging.validate()
    }

    /// Builds the runtime sweep settings.
    #[must_use]
    pub fn sweep_settings(&self) -> SweepSettings {
        let sweep = &self.sweep;
        SweepSettings {
            page_size: sweep.page_size,
            max_pages: sweep.max_pages,
            entry_delay: Duration::from_millis(sweep.entry_delay_ms),
            policy: ReconcilePolicy {
                sample_cap: sweep.sample_cap,
                divergence_threshold_mb: sweep.divergence_threshold_mb,
            },
            dry_run: sweep.dry_run,
            titles: TitleRules {
                strip_phrases: sweep.title_strip_phrases.clone(),
                cut_markers: sweep.title_cut_markers.clone(),
            },
        }
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Catalog service connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// REST API root, e.g. `https://example.org/wp-json/wp/v2`.
    pub base_url: String,
    /// Path segment of the entry collection.
    #[serde(default = "default_collection")]
    pub collection: String,
    /// Metadata key holding the variant-group list.
    #[serde(default = "default_variant_groups_key")]
    pub variant_groups_key: String,
    /// Basic-auth user name.
    #[serde(default)]
    pub username: Option<String>,
    /// Environment variable holding the basic-auth password.
    #[serde(default)]
    pub password_env: Option<String>,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_catalog_timeout_ms")]
    pub timeout_ms: u64,
    /// Allow a plain `http://` base URL (explicit opt-in).
    #[serde(default)]
    pub allow_http: bool,
}

impl CatalogConfig {
    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Validates catalog settings.
    fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(self.base_url.trim())
            .map_err(|err| ConfigError::Invalid(format!("catalog.base_url is invalid: {err}")))?;
        match url.scheme() {
            "https" => {}
            "http" if self.allow_http => {}
            "http" => {
                return Err(ConfigError::Invalid(
                    "catalog.base_url uses http:// without allow_http".to_string(),
                ));
            }
            other => {
                return Err(ConfigError::Invalid(format!(
                    "catalog.base_url scheme {other} is not supported"
                )));
            }
        }
        validate_segment("catalog.collection", &self.collection)?;
        if self.variant_groups_key.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "catalog.variant_groups_key must be non-empty".to_string(),
            ));
        }
        match (&self.username, &self.password_env) {
            (Some(_), None) => {
                return Err(ConfigError::Invalid(
                    "catalog.username requires catalog.password_env".to_string(),
                ));
            }
            (None, Some(_)) => {
                return Err(ConfigError::Invalid(
                    "catalog.password_env requires catalog.username".to_string(),
                ));
            }
            (Some(username), Some(password_env)) => {
                if username.trim().is_empty() {
                    return Err(ConfigError::Invalid(
                        "catalog.username must be non-empty".to_string(),
                    ));
                }
                if password_env.trim().is_empty() {
                    return Err(ConfigError::Invalid(
                        "catalog.password_env must be non-empty".to_string(),
                    ));
                }
            }
            (None, None) => {}
        }
        validate_timeout("catalog.timeout_ms", self.timeout_ms)
    }
}

// ============================================================================
// SECTION: Object Store
// ============================================================================

/// S3-compatible object store settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectStoreConfig {
    /// Bucket holding the media objects.
    pub bucket: String,
    /// Optional region (defaults to environment).
    #[serde(default)]
    pub region: Option<String>,
    /// Optional S3-compatible endpoint.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Force path-style addressing.
    #[serde(default)]
    pub force_path_style: bool,
    /// Optional key prefix prepended to every object reference.
    #[serde(default)]
    pub prefix: Option<String>,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_object_store_timeout_ms")]
    pub timeout_ms: u64,
    /// Allow a plain `http://` endpoint (explicit opt-in).
    #[serde(default)]
    pub allow_http: bool,
}

impl ObjectStoreConfig {
    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Validates object-store settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when object-store settings are invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bucket.trim().is_empty() {
            return Err(ConfigError::Invalid("object_store.bucket must be set".to_string()));
        }
        if let Some(endpoint) = &self.endpoint {
            let trimmed = endpoint.trim();
            if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
                return Err(ConfigError::Invalid(
                    "object_store.endpoint must include http:// or https://".to_string(),
                ));
            }
            if trimmed.starts_with("http://") && !self.allow_http {
                return Err(ConfigError::Invalid(
                    "object_store.endpoint uses http:// without allow_http".to_string(),
                ));
            }
        }
        if let Some(prefix) = &self.prefix {
            validate_object_store_prefix(prefix)?;
        }
        validate_timeout("object_store.timeout_ms", self.timeout_ms)
    }
}

// ============================================================================
// SECTION: Sweep
// ============================================================================

/// Sweep tunables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Entries requested per page.
    pub page_size: u32,
    /// Hard stop after this many pages.
    pub max_pages: u32,
    /// Pause after each entry in milliseconds.
    pub entry_delay_ms: u64,
    /// Items sampled from the head of each variant group.
    pub sample_cap: usize,
    /// Megabyte difference above which a label is replaced.
    pub divergence_threshold_mb: f64,
    /// Compute changes without writing them back.
    pub dry_run: bool,
    /// Phrases removed from display titles.
    pub title_strip_phrases: Vec<String>,
    /// Markers after which display titles are cut.
    pub title_cut_markers: Vec<String>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
            entry_delay_ms: DEFAULT_ENTRY_DELAY_MS,
            sample_cap: DEFAULT_SAMPLE_CAP,
            divergence_threshold_mb: DEFAULT_DIVERGENCE_THRESHOLD_MB,
            dry_run: false,
            title_strip_phrases: Vec::new(),
            title_cut_markers: Vec::new(),
        }
    }
}

impl SweepConfig {
    /// Validates sweep tunables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a tunable is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(ConfigError::Invalid(format!(
                "sweep.page_size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        if self.max_pages == 0 {
            return Err(ConfigError::Invalid(
                "sweep.max_pages must be greater than zero".to_string(),
            ));
        }
        if self.entry_delay_ms > MAX_ENTRY_DELAY_MS {
            return Err(ConfigError::Invalid(format!(
                "sweep.entry_delay_ms must not exceed {MAX_ENTRY_DELAY_MS}"
            )));
        }
        if !(1..=MAX_SAMPLE_CAP).contains(&self.sample_cap) {
            return Err(ConfigError::Invalid(format!(
                "sweep.sample_cap must be between 1 and {MAX_SAMPLE_CAP}"
            )));
        }
        if !self.divergence_threshold_mb.is_finite() || self.divergence_threshold_mb < 0.0 {
            return Err(ConfigError::Invalid(
                "sweep.divergence_threshold_mb must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Logging
// ============================================================================

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Logging output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level filter; `RUST_LOG` takes precedence.
    pub level: String,
    /// Line format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

impl LoggingConfig {
    /// Validates logging settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if LOG_LEVELS.contains(&self.level.as_str()) {
            Ok(())
        } else {
            Err(ConfigError::Invalid(format!(
                "logging.level must be one of {}",
                LOG_LEVELS.join(", ")
            )))
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a single URL path segment.
fn validate_segment(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.contains('/') || trimmed.contains('?') || trimmed.contains('#') {
        return Err(ConfigError::Invalid(format!("{field} must be a single path segment")));
    }
    if trimmed.len() > MAX_PATH_COMPONENT_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    Ok(())
}

/// Validates a timeout against the accepted range.
fn validate_timeout(field: &str, value: u64) -> Result<(), ConfigError> {
    if (MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{field} must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS}"
        )))
    }
}

/// Validates an object-store key prefix.
fn validate_object_store_prefix(value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    if trimmed.contains('\\') {
        return Err(ConfigError::Invalid(
            "object_store.prefix must not contain backslashes".to_string(),
        ));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("object_store.prefix exceeds max length".to_string()));
    }
    if trimmed.starts_with('/') {
        return Err(ConfigError::Invalid("object_store.prefix must be relative".to_string()));
    }
    let normalized = trimmed.trim_end_matches('/');
    for segment in normalized.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            return Err(ConfigError::Invalid(
                "object_store.prefix contains an empty or relative segment".to_string(),
            ));
        }
        if segment.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("object_store.prefix segment too long".to_string()));
        }
    }
    Ok(())
}

/// Default catalog collection segment.
fn default_collection() -> String {
    "series".to_string()
}

/// Default variant-group metadata key.
fn default_variant_groups_key() -> String {
    "series_dlbox".to_string()
}

/// Default catalog request timeout.
const fn default_catalog_timeout_ms() -> u64 {
    15_000
}

/// Default object-store request timeout.
const fn default_object_store_timeout_ms() -> u64 {
    10_000
}

