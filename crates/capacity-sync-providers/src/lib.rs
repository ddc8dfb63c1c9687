// crates/capacity-sync-providers/src/lib.rs
// ============================================================================
// Module: Capacity Sync Providers
// Description: REST catalog client and S3-compatible object store.
// Purpose: Connect the sweep runtime to its remote collaborators.
// Dependencies: capacity-sync-core, reqwest, aws-sdk-s3, serde_json
// ============================================================================

//! ## Overview
//! This crate ships the two production backends of the capacity sweep: a
//! WordPress-style REST catalog client implementing [`CatalogService`] and an
//! S3-compatible store implementing [`ObjectStore`] through metadata-only
//! `HEAD` requests. Both bound every request with a timeout and classify
//! failures into the core error kinds.
//!
//! [`CatalogService`]: capacity_sync_core::CatalogService
//! [`ObjectStore`]: capacity_sync_core::ObjectStore

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod error;
pub mod s3;
pub mod wordpress;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::ProviderError;
pub use s3::S3ObjectStore;
pub use s3::S3ObjectStoreConfig;
pub use wordpress::BasicCredentials;
pub use wordpress::WordPressCatalog;
pub use wordpress::WordPressCatalogConfig;
