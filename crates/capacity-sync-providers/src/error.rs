// crates/capacity-sync-providers/src/error.rs
// ============================================================================
// Module: Provider Errors
// Description: Construction failures for catalog and object-store backends.
// Purpose: Report misconfiguration before a sweep starts.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Runtime failures are reported through the core `CatalogError` and
//! `ObjectStoreError` types; [`ProviderError`] only covers backend setup.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Backend construction errors.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Backend settings are unusable.
    #[error("invalid provider settings: {0}")]
    Invalid(String),
    /// The underlying client could not be built.
    #[error("provider client error: {0}")]
    Client(String),
}
