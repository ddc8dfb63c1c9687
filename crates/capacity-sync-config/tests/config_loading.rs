//! Config loading tests for capacity-sync-config.
// crates/capacity-sync-config/tests/config_loading.rs
// =============================================================================
// Module: Config Loading Tests
// Description: File loading, defaults, and conversion to sweep settings.
// Purpose: Ensure capacity-sync.toml loads deterministically and fails closed.
// =============================================================================

use std::fs;
use std::time::Duration;

use capacity_sync_config::CapacitySyncConfig;
use capacity_sync_config::ConfigError;
use capacity_sync_config::LogFormat;
use capacity_sync_core::SweepSettings;
use tempfile::tempdir;

mod common;

type TestResult = Result<(), String>;

const FULL_TOML: &str = r#"
[catalog]
base_url = "https://catalog.example.org/wp-json/wp/v2"
collection = "movies"
variant_groups_key = "movie_dlbox"
username = "sync-bot"
password_env = "CATALOG_PASSWORD"
timeout_ms = 5000

[object_store]
bucket = "media-links"
region = "ir-thr-at1"
endpoint = "https://s3.example.org"
force_path_style = true
prefix = "uploads/"
timeout_ms = 2500

[sweep]
page_size = 25
max_pages = 4
entry_delay_ms = 2000
sample_cap = 4
divergence_threshold_mb = 50.0
dry_run = true
title_strip_phrases = ["دانلود انیمه "]
title_cut_markers = [" با زیرنویس فارسی"]

[logging]
level = "debug"
format = "json"
"#;

#[test]
fn load_reads_every_section() -> TestResult {
    let dir = tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("capacity-sync.toml");
    fs::write(&path, FULL_TOML).map_err(|err| err.to_string())?;

    let config = CapacitySyncConfig::load(Some(&path)).map_err(|err| err.to_string())?;

    assert_eq!(config.catalog.collection, "movies");
    assert_eq!(config.catalog.timeout(), Duration::from_millis(5000));
    assert_eq!(config.object_store.prefix.as_deref(), Some("uploads/"));
    assert!(config.object_store.force_path_style);
    assert_eq!(config.logging.format, LogFormat::Json);
    let settings = config.sweep_settings();
    assert_eq!(settings.page_size, 25);
    assert_eq!(settings.max_pages, 4);
    assert_eq!(settings.entry_delay, Duration::from_secs(2));
    assert_eq!(settings.policy.sample_cap, 4);
    assert!(settings.dry_run);
    assert_eq!(settings.titles.clean("دانلود انیمه Monster با زیرنویس فارسی"), "Monster");
    Ok(())
}

#[test]
fn omitted_sections_use_production_defaults() -> TestResult {
    let config = CapacitySyncConfig::from_toml(common::MINIMAL_TOML).map_err(|err| err.to_string())?;

    assert_eq!(config.catalog.collection, "series");
    assert_eq!(config.catalog.variant_groups_key, "series_dlbox");
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Text);
    assert_eq!(config.sweep_settings(), SweepSettings::default());
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() -> TestResult {
    let dir = tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.toml");

    match CapacitySyncConfig::load(Some(&path)) {
        Err(ConfigError::Io(message)) if message.contains("absent.toml") => Ok(()),
        Err(err) => Err(format!("unexpected error: {err}")),
        Ok(_) => Err("expected io error".to_string()),
    }
}

#[test]
fn oversized_file_is_rejected() -> TestResult {
    let dir = tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("big.toml");
    let padding = "#".repeat(1024 * 1024);
    fs::write(&path, format!("{}\n{padding}", common::MINIMAL_TOML)).map_err(|err| err.to_string())?;

    common::assert_invalid(CapacitySyncConfig::load(Some(&path)).map(|_| ()), "size limit")
}

#[test]
fn non_utf8_file_is_rejected() -> TestResult {
    let dir = tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("binary.toml");
    fs::write(&path, [0xff, 0xfe, 0x00]).map_err(|err| err.to_string())?;

    common::assert_invalid(CapacitySyncConfig::load(Some(&path)).map(|_| ()), "utf-8")
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let result = CapacitySyncConfig::from_toml("[catalog\nbase_url = 1");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn missing_required_section_is_a_parse_error() {
    let result = CapacitySyncConfig::from_toml("[object_store]\nbucket = \"b\"\n");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn load_validates_after_parsing() -> TestResult {
    let dir = tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("capacity-sync.toml");
    fs::write(&path, format!("{}\n[sweep]\npage_size = 0\n", common::MINIMAL_TOML))
        .map_err(|err| err.to_string())?;

    common::assert_invalid(CapacitySyncConfig::load(Some(&path)).map(|_| ()), "sweep.page_size")
}
