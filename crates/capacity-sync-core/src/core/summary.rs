// crates/capacity-sync-core/src/core/summary.rs
// ============================================================================
// Module: Sweep Summary
// Description: Aggregate counters and termination reason of a catalog sweep.
// Purpose: Report what a sweep did once it stops.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A sweep always ends with a summary, including when a page listing fails;
//! counters accumulated before the failure are preserved.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

// ============================================================================
// SECTION: Summary Types
// ============================================================================

/// Reason a sweep stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SweepOutcome {
    /// A page returned no entries.
    Exhausted,
    /// A page returned fewer entries than requested.
    LastPage,
    /// The configured page limit was reached.
    PageLimit,
    /// A page listing failed and the sweep stopped early.
    Aborted {
        /// Page whose listing failed.
        page: u32,
        /// Failure description.
        error: String,
    },
}

/// Aggregate result of a sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweepSummary {
    /// Entries picked up from listings, including ones that failed.
    pub processed: u64,
    /// Entries whose metadata was written back successfully.
    pub updated: u64,
    /// Page listings fetched successfully.
    pub pages: u32,
    /// Why the sweep stopped.
    pub outcome: SweepOutcome,
}

impl SweepSummary {
    /// Returns true when the sweep stopped on a listing failure.
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        matches!(self.outcome, SweepOutcome::Aborted { .. })
    }
}
