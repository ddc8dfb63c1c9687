//! Config validation tests for capacity-sync-config.
// crates/capacity-sync-config/tests/validation.rs
// =============================================================================
// Module: Config Validation Tests
// Description: Range and consistency checks for every config section.
// Purpose: Ensure invalid settings never reach the sweep.
// =============================================================================

use capacity_sync_config::CapacitySyncConfig;

mod common;

use common::assert_invalid;

type TestResult = Result<(), String>;

fn minimal() -> Result<CapacitySyncConfig, String> {
    common::minimal_config().map_err(|err| err.to_string())
}

#[test]
fn minimal_config_is_valid() -> TestResult {
    minimal()?.validate().map_err(|err| err.to_string())
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

#[test]
fn catalog_rejects_unparseable_url() -> TestResult {
    let mut config = minimal()?;
    config.catalog.base_url = "not a url".to_string();
    assert_invalid(config.validate(), "catalog.base_url is invalid")
}

#[test]
fn catalog_rejects_http_without_allow() -> TestResult {
    let mut config = minimal()?;
    config.catalog.base_url = "http://catalog.local/wp-json/wp/v2".to_string();
    assert_invalid(config.validate(), "without allow_http")?;
    config.catalog.allow_http = true;
    config.validate().map_err(|err| err.to_string())
}

#[test]
fn catalog_rejects_other_schemes() -> TestResult {
    let mut config = minimal()?;
    config.catalog.base_url = "ftp://catalog.local/".to_string();
    assert_invalid(config.validate(), "scheme ftp")
}

#[test]
fn catalog_collection_must_be_one_segment() -> TestResult {
    let mut config = minimal()?;
    config.catalog.collection = "series/extra".to_string();
    assert_invalid(config.validate(), "single path segment")?;
    config.catalog.collection = " ".to_string();
    assert_invalid(config.validate(), "catalog.collection must be non-empty")
}

#[test]
fn catalog_requires_groups_key() -> TestResult {
    let mut config = minimal()?;
    config.catalog.variant_groups_key = String::new();
    assert_invalid(config.validate(), "variant_groups_key")
}

#[test]
fn catalog_credentials_come_in_pairs() -> TestResult {
    let mut config = minimal()?;
    config.catalog.username = Some("bot".to_string());
    assert_invalid(config.validate(), "requires catalog.password_env")?;
    config.catalog.username = None;
    config.catalog.password_env = Some("PASSWORD".to_string());
    assert_invalid(config.validate(), "requires catalog.username")?;
    config.catalog.username = Some("bot".to_string());
    config.validate().map_err(|err| err.to_string())
}

#[test]
fn catalog_timeout_is_bounded() -> TestResult {
    let mut config = minimal()?;
    config.catalog.timeout_ms = 50;
    assert_invalid(config.validate(), "catalog.timeout_ms")?;
    config.catalog.timeout_ms = 120_001;
    assert_invalid(config.validate(), "catalog.timeout_ms")
}

// ============================================================================
// SECTION: Object Store
// ============================================================================

#[test]
fn object_store_requires_bucket() -> TestResult {
    let mut config = minimal()?;
    config.object_store.bucket = "  ".to_string();
    assert_invalid(config.validate(), "object_store.bucket must be set")
}

#[test]
fn object_store_endpoint_needs_scheme() -> TestResult {
    let mut config = minimal()?;
    config.object_store.endpoint = Some("s3.example.org".to_string());
    assert_invalid(config.validate(), "must include http:// or https://")?;
    config.object_store.endpoint = Some("http://minio.local:9000".to_string());
    assert_invalid(config.validate(), "without allow_http")?;
    config.object_store.allow_http = true;
    config.validate().map_err(|err| err.to_string())
}

#[test]
fn object_store_prefix_must_be_relative_and_clean() -> TestResult {
    let mut config = minimal()?;
    config.object_store.prefix = Some("/uploads".to_string());
    assert_invalid(config.validate(), "must be relative")?;
    config.object_store.prefix = Some("../uploads".to_string());
    assert_invalid(config.validate(), "empty or relative segment")?;
    config.object_store.prefix = Some("uploads//2024".to_string());
    assert_invalid(config.validate(), "empty or relative segment")?;
    config.object_store.prefix = Some("uploads/./2024".to_string());
    assert_invalid(config.validate(), "empty or relative segment")?;
    config.object_store.prefix = Some("uploads\\2024".to_string());
    assert_invalid(config.validate(), "backslashes")?;
    config.object_store.prefix = Some("uploads/2024//".to_string());
    config.validate().map_err(|err| err.to_string())
}

// ============================================================================
// SECTION: Sweep
// ============================================================================

#[test]
fn sweep_page_size_is_bounded() -> TestResult {
    let mut config = minimal()?;
    config.sweep.page_size = 0;
    assert_invalid(config.validate(), "sweep.page_size")?;
    config.sweep.page_size = 101;
    assert_invalid(config.validate(), "sweep.page_size")?;
    config.sweep.page_size = 100;
    config.validate().map_err(|err| err.to_string())
}

#[test]
fn sweep_requires_at_least_one_page() -> TestResult {
    let mut config = minimal()?;
    config.sweep.max_pages = 0;
    assert_invalid(config.validate(), "sweep.max_pages")
}

#[test]
fn sweep_delay_is_bounded() -> TestResult {
    let mut config = minimal()?;
    config.sweep.entry_delay_ms = 60_001;
    assert_invalid(config.validate(), "sweep.entry_delay_ms")?;
    config.sweep.entry_delay_ms = 0;
    config.validate().map_err(|err| err.to_string())
}

#[test]
fn sweep_sample_cap_is_bounded() -> TestResult {
    let mut config = minimal()?;
    config.sweep.sample_cap = 0;
    assert_invalid(config.validate(), "sweep.sample_cap")?;
    config.sweep.sample_cap = 65;
    assert_invalid(config.validate(), "sweep.sample_cap")
}

#[test]
fn sweep_threshold_must_be_finite_and_non_negative() -> TestResult {
    let mut config = minimal()?;
    config.sweep.divergence_threshold_mb = -1.0;
    assert_invalid(config.validate(), "divergence_threshold_mb")?;
    config.sweep.divergence_threshold_mb = f64::NAN;
    assert_invalid(config.validate(), "divergence_threshold_mb")?;
    config.sweep.divergence_threshold_mb = 0.0;
    config.validate().map_err(|err| err.to_string())
}

// ============================================================================
// SECTION: Logging
// ============================================================================

#[test]
fn logging_level_must_be_known() -> TestResult {
    let mut config = minimal()?;
    config.logging.level = "verbose".to_string();
    assert_invalid(config.validate(), "logging.level")
}

#[test]
fn logging_format_rejects_unknown_values() {
    let text = format!("{}\n[logging]\nformat = \"xml\"\n", common::MINIMAL_TOML);
    assert!(common::config_from_toml(&text).is_err());
}
