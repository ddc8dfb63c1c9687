// crates/capacity-sync-core/src/core/identifiers.rs
// ============================================================================
// Module: Capacity Sync Identifiers
// Description: Opaque identifiers for catalog entries and stored objects.
// Purpose: Provide strongly typed, serializable identifiers with stable wire forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Catalog entries are addressed by the integer identifier the catalog service
//! assigns; stored objects are addressed by a relative key. Object keys are
//! normalized once at construction so lookups never see a leading separator.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Catalog entry identifier assigned by the catalog service.
///
/// # Invariants
/// - Opaque; uniqueness is guaranteed by the catalog service, not this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(u64);

impl EntryId {
    /// Creates an entry identifier from the raw catalog value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Key of a blob in the object store.
///
/// # Invariants
/// - Never empty.
/// - Never starts with the `/` path separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Builds an object key from a reference embedded in catalog metadata.
    ///
    /// A single leading `/` is stripped. Returns `None` when nothing remains.
    #[must_use]
    pub fn from_reference(reference: &str) -> Option<Self> {
        let key = reference.strip_prefix('/').unwrap_or(reference);
        if key.is_empty() { None } else { Some(Self(key.to_string())) }
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::ObjectKey;

    #[test]
    fn object_key_strips_one_leading_separator() {
        let key = ObjectKey::from_reference("/anime/ep01.mkv");
        assert_eq!(key.as_ref().map(ObjectKey::as_str), Some("anime/ep01.mkv"));
        let key = ObjectKey::from_reference("//double.mkv");
        assert_eq!(key.as_ref().map(ObjectKey::as_str), Some("/double.mkv"));
    }

    #[test]
    fn object_key_rejects_empty_reference() {
        assert!(ObjectKey::from_reference("").is_none());
        assert!(ObjectKey::from_reference("/").is_none());
    }
}
