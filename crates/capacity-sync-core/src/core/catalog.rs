// crates/capacity-sync-core/src/core/catalog.rs
// ============================================================================
// Module: Catalog Records
// Description: Typed catalog entries, variant groups, and paging requests.
// Purpose: Model the catalog metadata the reconciler reads and writes back.
// Dependencies: crate::core::identifiers, serde, serde_json
// ============================================================================

//! ## Overview
//! Catalog metadata is an open-ended bag on the wire. These types make the
//! fields the reconciler depends on explicit and keep every other attribute in
//! a residual map that is serialized back unchanged, so a whole-list
//! write-back never drops unrelated metadata.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::core::identifiers::EntryId;
use crate::core::identifiers::ObjectKey;

// ============================================================================
// SECTION: Paging
// ============================================================================

/// Sort direction for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Ascending order.
    Ascending,
}

impl SortOrder {
    /// Returns the wire label for the sort direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
        }
    }
}

/// Request for one page of catalog listings.
///
/// # Invariants
/// - `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u32,
    /// Number of entries requested per page.
    pub page_size: u32,
    /// Field the listing is ordered by.
    pub order_by: String,
    /// Sort direction.
    pub order: SortOrder,
}

impl PageRequest {
    /// Creates a title-ascending page request.
    #[must_use]
    pub fn by_title(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            order_by: "title".to_string(),
            order: SortOrder::Ascending,
        }
    }
}

/// Summary record returned by a catalog listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogListing {
    /// Entry identifier.
    pub id: EntryId,
    /// Raw display title as rendered by the catalog.
    pub title: String,
}

// ============================================================================
// SECTION: Entries
// ============================================================================

/// Full catalog entry detail record.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    /// Entry identifier.
    pub id: EntryId,
    /// Raw display title as rendered by the catalog.
    pub title: String,
    /// Typed entry metadata.
    pub meta: EntryMetadata,
}

/// Entry metadata with the variant-group list made explicit.
///
/// # Invariants
/// - `extra` never contains the variant-group key when `variant_groups` was
///   parsed from a list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryMetadata {
    /// Variant groups stored under the configured metadata key.
    pub variant_groups: Vec<VariantGroup>,
    /// Every other metadata attribute, untouched.
    pub extra: Map<String, Value>,
}

impl EntryMetadata {
    /// Builds typed metadata from the raw `meta` object of an entry.
    ///
    /// A missing or non-object `meta`, or a missing or non-list value under
    /// `groups_key`, yields an empty group list.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when the group list exists but its
    /// elements are not variant-group objects.
    pub fn from_json(meta: Option<Value>, groups_key: &str) -> Result<Self, serde_json::Error> {
        let Some(Value::Object(mut extra)) = meta else {
            return Ok(Self::default());
        };
        let variant_groups = match extra.remove(groups_key) {
            Some(Value::Array(groups)) => serde_json::from_value(Value::Array(groups))?,
            Some(other) => {
                extra.insert(groups_key.to_string(), other);
                Vec::new()
            }
            None => Vec::new(),
        };
        Ok(Self {
            variant_groups,
            extra,
        })
    }
}

/// How an explicitly modeled key appeared in the stored record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyPresence {
    /// The key was not stored.
    #[default]
    Absent,
    /// The key was stored with a `null` value.
    Null,
    /// The key was stored with a value.
    Value,
}

impl KeyPresence {
    /// Classifies a raw key read with [`present`].
    const fn of<T>(raw: &Option<Option<T>>) -> Self {
        match raw {
            None => Self::Absent,
            Some(None) => Self::Null,
            Some(Some(_)) => Self::Value,
        }
    }

    /// Rebuilds the raw key for `value`; a set value always wins.
    fn restore<T>(self, value: Option<T>) -> Option<Option<T>> {
        match (value, self) {
            (Some(value), _) => Some(Some(value)),
            (None, Self::Null) => Some(None),
            (None, Self::Absent | Self::Value) => None,
        }
    }
}

/// Stored presence of a variant group's modeled keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupKeys {
    /// Presence of `quality`.
    pub quality: KeyPresence,
    /// Presence of `capacity`.
    pub capacity: KeyPresence,
    /// Presence of `items`.
    pub items: KeyPresence,
}

/// Quality tier of an entry bundling similarly sized objects.
///
/// # Invariants
/// - `extra` holds every attribute other than the explicit fields.
/// - Serialization reproduces the stored form of unset explicit fields:
///   absent keys stay absent and `null` keys stay `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "GroupRecord", into = "GroupRecord")]
pub struct VariantGroup {
    /// Quality tag, compared case-insensitively after trimming.
    pub quality: Option<String>,
    /// Stored capacity label.
    pub capacity: Option<String>,
    /// Items referencing stored objects, in catalog order.
    pub items: Vec<VariantItem>,
    /// Unmodeled attributes passed through on write-back.
    pub extra: Map<String, Value>,
    /// How the modeled keys were stored.
    pub keys: GroupKeys,
}

impl VariantGroup {
    /// Returns the trimmed, uppercased quality tag, or `None` when empty.
    #[must_use]
    pub fn normalized_quality(&self) -> Option<String> {
        let quality = self.quality.as_deref()?.trim();
        if quality.is_empty() { None } else { Some(quality.to_uppercase()) }
    }

    /// Returns object keys for the first `cap` items that carry a reference.
    ///
    /// The cap applies to items, not to resolved keys: items without a
    /// reference inside the prefix are dropped, not replaced.
    #[must_use]
    pub fn sample_keys(&self, cap: usize) -> Vec<ObjectKey> {
        self.items
            .iter()
            .take(cap)
            .filter_map(VariantItem::reference)
            .filter_map(ObjectKey::from_reference)
            .collect()
    }
}

/// Stored presence of a variant item's modeled keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemKeys {
    /// Presence of `play_link`.
    pub play_link: KeyPresence,
    /// Presence of `link`.
    pub link: KeyPresence,
}

/// One downloadable item inside a variant group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ItemRecord", into = "ItemRecord")]
pub struct VariantItem {
    /// Preferred object reference.
    pub play_link: Option<String>,
    /// Fallback object reference.
    pub link: Option<String>,
    /// Unmodeled attributes passed through on write-back.
    pub extra: Map<String, Value>,
    /// How the modeled keys were stored.
    pub keys: ItemKeys,
}

impl VariantItem {
    /// Returns the first non-empty reference, preferring `play_link`.
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        [self.play_link.as_deref(), self.link.as_deref()]
            .into_iter()
            .flatten()
            .find(|reference| !reference.is_empty())
    }
}

// ============================================================================
// SECTION: Wire Records
// ============================================================================

/// Stored form of a variant group; `None` is an absent key, `Some(None)` a null.
#[derive(Serialize, Deserialize)]
struct GroupRecord {
    /// Raw quality key.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    quality: Option<Option<String>>,
    /// Raw capacity key.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    capacity: Option<Option<String>>,
    /// Raw items key.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    items: Option<Option<Vec<VariantItem>>>,
    /// Remaining attributes.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<GroupRecord> for VariantGroup {
    fn from(record: GroupRecord) -> Self {
        let keys = GroupKeys {
            quality: KeyPresence::of(&record.quality),
            capacity: KeyPresence::of(&record.capacity),
            items: KeyPresence::of(&record.items),
        };
        Self {
            quality: record.quality.flatten(),
            capacity: record.capacity.flatten(),
            items: record.items.flatten().unwrap_or_default(),
            extra: record.extra,
            keys,
        }
    }
}

impl From<VariantGroup> for GroupRecord {
    fn from(group: VariantGroup) -> Self {
        let keep_items = !group.items.is_empty() || group.keys.items == KeyPresence::Value;
        let items = keep_items.then_some(group.items);
        Self {
            quality: group.keys.quality.restore(group.quality),
            capacity: group.keys.capacity.restore(group.capacity),
            items: group.keys.items.restore(items),
            extra: group.extra,
        }
    }
}

/// Stored form of a variant item; `None` is an absent key, `Some(None)` a null.
#[derive(Serialize, Deserialize)]
struct ItemRecord {
    /// Raw preferred reference key.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    play_link: Option<Option<String>>,
    /// Raw fallback reference key.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    link: Option<Option<String>>,
    /// Remaining attributes.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<ItemRecord> for VariantItem {
    fn from(record: ItemRecord) -> Self {
        let keys = ItemKeys {
            play_link: KeyPresence::of(&record.play_link),
            link: KeyPresence::of(&record.link),
        };
        Self {
            play_link: record.play_link.flatten(),
            link: record.link.flatten(),
            extra: record.extra,
            keys,
        }
    }
}

impl From<VariantItem> for ItemRecord {
    fn from(item: VariantItem) -> Self {
        Self {
            play_link: item.keys.play_link.restore(item.play_link),
            link: item.keys.link.restore(item.link),
            extra: item.extra,
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Deserializes a key that is present, keeping `null` as `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
