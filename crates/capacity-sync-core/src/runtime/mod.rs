// crates/capacity-sync-core/src/runtime/mod.rs
// ============================================================================
// Module: Capacity Sync Runtime
// Description: Size estimation, group reconciliation, and the catalog sweep.
// Purpose: Execute a sequential, throttled capacity-label sweep.
// Dependencies: crate::{core, interfaces}, tokio, tracing
// ============================================================================

//! ## Overview
//! The runtime composes three layers: the [`SizeEstimator`] samples object
//! sizes, the [`GroupReconciler`] decides which labels to replace, and the
//! [`CatalogWalker`] pages through the catalog and writes changes back.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod estimator;
pub mod reconciler;
pub mod report;
pub mod settings;
pub mod walker;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use estimator::SizeEstimate;
pub use estimator::SizeEstimator;
pub use reconciler::GroupReconciler;
pub use reconciler::ReconcileOutcome;
pub use report::NoopReporter;
pub use report::TracingReporter;
pub use settings::DEFAULT_DIVERGENCE_THRESHOLD_MB;
pub use settings::DEFAULT_ENTRY_DELAY;
pub use settings::DEFAULT_ENTRY_DELAY_MS;
pub use settings::DEFAULT_MAX_PAGES;
pub use settings::DEFAULT_PAGE_SIZE;
pub use settings::DEFAULT_SAMPLE_CAP;
pub use settings::ReconcilePolicy;
pub use settings::SweepSettings;
pub use walker::CatalogWalker;
