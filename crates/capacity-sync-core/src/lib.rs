// crates/capacity-sync-core/src/lib.rs
// ============================================================================
// Module: Capacity Sync Core
// Description: Catalog capacity-label reconciliation engine.
// Purpose: Keep stored capacity labels in line with measured object sizes.
// Dependencies: async-trait, serde, serde_json, thiserror, tokio, tracing
// ============================================================================

//! ## Overview
//! Capacity Sync walks a paginated content catalog, samples the byte sizes of
//! the objects each variant group references, and rewrites the group's
//! human-readable capacity label when it has drifted from the measurement.
//! Remote collaborators are reached through the [`CatalogService`] and
//! [`ObjectStore`] traits; concrete backends live in the providers crate.
//! Invariants:
//! - All remote calls are awaited sequentially; there is no fan-out.
//! - Only the variant-group metadata key is ever written back.
//! - Only a failed page listing ends a sweep early.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::CatalogError;
pub use interfaces::CatalogService;
pub use interfaces::ErrorKind;
pub use interfaces::ObjectStore;
pub use interfaces::ObjectStoreError;
pub use interfaces::Operation;
pub use interfaces::ReportLevel;
pub use interfaces::SweepEvent;
pub use interfaces::SweepReporter;
pub use interfaces::failure_level;
pub use runtime::CatalogWalker;
pub use runtime::GroupReconciler;
pub use runtime::NoopReporter;
pub use runtime::ReconcileOutcome;
pub use runtime::ReconcilePolicy;
pub use runtime::SizeEstimate;
pub use runtime::SizeEstimator;
pub use runtime::SweepSettings;
pub use runtime::TracingReporter;
