// crates/capacity-sync-core/src/runtime/settings.rs
// ============================================================================
// Module: Sweep Settings
// Description: Tunables for paging, throttling, sampling, and thresholds.
// Purpose: Keep sweep constants configurable with stable defaults.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Sweep settings are resolved once per run. Defaults reproduce the observed
//! production behavior: ten entries per page, at most 113 pages, one second
//! between entries, eight sampled objects per group, and a 20 MB divergence
//! threshold.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use crate::core::TitleRules;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default entries requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Default page limit for one sweep.
pub const DEFAULT_MAX_PAGES: u32 = 113;
/// Default pause after each entry, in milliseconds.
pub const DEFAULT_ENTRY_DELAY_MS: u64 = 1_000;
/// Default pause after each entry.
pub const DEFAULT_ENTRY_DELAY: Duration = Duration::from_millis(DEFAULT_ENTRY_DELAY_MS);
/// Default number of items sampled per variant group.
pub const DEFAULT_SAMPLE_CAP: usize = 8;
/// Default megabyte difference that triggers a relabel.
pub const DEFAULT_DIVERGENCE_THRESHOLD_MB: f64 = 20.0;

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Per-group reconciliation policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconcilePolicy {
    /// Items sampled from the head of each group.
    pub sample_cap: usize,
    /// Strict lower bound on the megabyte difference that triggers a relabel.
    pub divergence_threshold_mb: f64,
}

impl Default for ReconcilePolicy {
    fn default() -> Self {
        Self {
            sample_cap: DEFAULT_SAMPLE_CAP,
            divergence_threshold_mb: DEFAULT_DIVERGENCE_THRESHOLD_MB,
        }
    }
}

/// Settings for one catalog sweep.
///
/// # Invariants
/// - `page_size` and `max_pages` are at least 1 (enforced by config validation).
#[derive(Debug, Clone, PartialEq)]
pub struct SweepSettings {
    /// Entries requested per page.
    pub page_size: u32,
    /// Hard stop after this many pages.
    pub max_pages: u32,
    /// Unconditional pause after each entry.
    pub entry_delay: Duration,
    /// Per-group reconciliation policy.
    pub policy: ReconcilePolicy,
    /// Compute changes without writing them back.
    pub dry_run: bool,
    /// Display-title cleanup rules.
    pub titles: TitleRules,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
            entry_delay: DEFAULT_ENTRY_DELAY,
            policy: ReconcilePolicy::default(),
            dry_run: false,
            titles: TitleRules::default(),
        }
    }
}
