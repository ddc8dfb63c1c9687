// crates/capacity-sync-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for capacity-sync-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use capacity_sync_config::CapacitySyncConfig;
use capacity_sync_config::ConfigError;

/// Smallest valid configuration.
pub const MINIMAL_TOML: &str = r#"
[catalog]
base_url = "https://catalog.example.org/wp-json/wp/v2"

[object_store]
bucket = "media-links"
"#;

/// Parses a TOML string without validating it.
pub fn config_from_toml(toml_str: &str) -> Result<CapacitySyncConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns a minimal config with all defaults applied.
pub fn minimal_config() -> Result<CapacitySyncConfig, toml::de::Error> {
    config_from_toml(MINIMAL_TOML)
}

/// Checks that `result` failed with a message containing `needle`.
pub fn assert_invalid(result: Result<(), ConfigError>, needle: &str) -> Result<(), String> {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(()) => Err("expected invalid config".to_string()),
    }
}
