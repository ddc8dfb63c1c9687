// crates/capacity-sync-config/src/lib.rs
// ============================================================================
// Module: Capacity Sync Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for capacity-sync.toml semantics.
// Dependencies: capacity-sync-core, serde, toml, url
// ============================================================================

//! ## Overview
//! `capacity-sync-config` defines the TOML configuration model for the
//! capacity sweep: catalog and object-store connection settings, sweep
//! tunables, and logging. Loading is size-limited and validation fails closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
