// crates/capacity-sync-core/src/core/mod.rs
// ============================================================================
// Module: Capacity Sync Core Types
// Description: Canonical catalog records, capacity labels, and sweep summaries.
// Purpose: Provide stable, serializable types shared by runtime and providers.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Core types describe catalog entries and their variant groups, the capacity
//! label codec, display-title cleanup, and sweep summaries. They carry no I/O.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod capacity;
pub mod catalog;
pub mod identifiers;
pub mod summary;
pub mod title;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use capacity::CapacityError;
pub use capacity::CapacityLabel;
pub use capacity::UNKNOWN_CAPACITY;
pub use capacity::decode_capacity;
pub use capacity::encode_capacity;
pub use capacity::label_megabytes;
pub use catalog::CatalogEntry;
pub use catalog::CatalogListing;
pub use catalog::EntryMetadata;
pub use catalog::GroupKeys;
pub use catalog::ItemKeys;
pub use catalog::KeyPresence;
pub use catalog::PageRequest;
pub use catalog::SortOrder;
pub use catalog::VariantGroup;
pub use catalog::VariantItem;
pub use identifiers::EntryId;
pub use identifiers::ObjectKey;
pub use summary::SweepOutcome;
pub use summary::SweepSummary;
pub use title::TitleRules;
