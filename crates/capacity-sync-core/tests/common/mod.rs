// crates/capacity-sync-core/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Scripted catalog, object store, and recording reporter.
// Purpose: Drive the sweep runtime deterministically without network access.
// Dependencies: capacity-sync-core
// ============================================================================

//! ## Overview
//! Fakes in this module answer from scripts set up by each test and record
//! every call they receive so tests can assert on request order and volume.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use capacity_sync_core::CatalogEntry;
use capacity_sync_core::CatalogError;
use capacity_sync_core::CatalogListing;
use capacity_sync_core::CatalogService;
use capacity_sync_core::EntryId;
use capacity_sync_core::EntryMetadata;
use capacity_sync_core::ObjectKey;
use capacity_sync_core::ObjectStore;
use capacity_sync_core::ObjectStoreError;
use capacity_sync_core::PageRequest;
use capacity_sync_core::ReportLevel;
use capacity_sync_core::SweepEvent;
use capacity_sync_core::SweepReporter;
use capacity_sync_core::VariantGroup;
use capacity_sync_core::VariantItem;

/// One mebibyte in bytes.
pub const MIB: u64 = 1024 * 1024;

// ============================================================================
// SECTION: Catalog Fake
// ============================================================================

/// Scripted response to a page listing.
pub enum PageScript {
    /// The page lists these entries.
    Listing(Vec<CatalogListing>),
    /// The listing fails with a transport error.
    Fail(String),
}

/// Scripted response to an entry fetch.
pub enum EntryScript {
    /// The entry exists.
    Found(CatalogEntry),
    /// The entry was deleted.
    Missing,
    /// The fetch fails with a server error.
    Broken(u16),
}

/// In-memory catalog driven by scripts.
#[derive(Default)]
pub struct ScriptedCatalog {
    /// Page responses in request order; exhausted scripts list nothing.
    pages: Mutex<VecDeque<PageScript>>,
    /// Entry responses by identifier.
    entries: Mutex<HashMap<EntryId, EntryScript>>,
    /// Entries whose write-back is rejected.
    rejected: Mutex<Vec<EntryId>>,
    /// Every page request received.
    requests: Mutex<Vec<PageRequest>>,
    /// Every accepted write-back.
    patches: Mutex<Vec<(EntryId, Vec<VariantGroup>)>>,
    /// Every entry fetch received.
    fetches: Mutex<Vec<EntryId>>,
}

impl ScriptedCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a page listing these entries.
    pub fn with_page(self, entries: Vec<CatalogEntry>) -> Self {
        let listings = entries
            .iter()
            .map(|entry| CatalogListing {
                id: entry.id,
                title: entry.title.clone(),
            })
            .collect();
        for entry in entries {
            self.entries.lock().unwrap().insert(entry.id, EntryScript::Found(entry));
        }
        self.pages.lock().unwrap().push_back(PageScript::Listing(listings));
        self
    }

    /// Appends a page whose listing fails.
    pub fn with_failing_page(self, message: &str) -> Self {
        self.pages.lock().unwrap().push_back(PageScript::Fail(message.to_string()));
        self
    }

    /// Appends a page listing a raw set of listings without entry details.
    pub fn with_listing(self, listings: Vec<CatalogListing>) -> Self {
        self.pages.lock().unwrap().push_back(PageScript::Listing(listings));
        self
    }

    /// Overrides the fetch response for one entry.
    pub fn with_entry_script(self, id: u64, script: EntryScript) -> Self {
        self.entries.lock().unwrap().insert(EntryId::new(id), script);
        self
    }

    /// Makes write-backs for `id` fail.
    pub fn rejecting(self, id: u64) -> Self {
        self.rejected.lock().unwrap().push(EntryId::new(id));
        self
    }

    /// Returns the page requests received so far.
    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns the accepted write-backs so far.
    pub fn patches(&self) -> Vec<(EntryId, Vec<VariantGroup>)> {
        self.patches.lock().unwrap().clone()
    }

    /// Returns the entry fetches received so far.
    pub fn fetches(&self) -> Vec<EntryId> {
        self.fetches.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogService for ScriptedCatalog {
    async fn list_page(&self, request: &PageRequest) -> Result<Vec<CatalogListing>, CatalogError> {
        self.requests.lock().unwrap().push(request.clone());
        match self.pages.lock().unwrap().pop_front() {
            Some(PageScript::Listing(listings)) => Ok(listings),
            Some(PageScript::Fail(message)) => Err(CatalogError::Transport(message)),
            None => Ok(Vec::new()),
        }
    }

    async fn get_entry(&self, id: EntryId) -> Result<CatalogEntry, CatalogError> {
        self.fetches.lock().unwrap().push(id);
        match self.entries.lock().unwrap().get(&id) {
            Some(EntryScript::Found(entry)) => Ok(entry.clone()),
            Some(EntryScript::Broken(status)) => Err(CatalogError::Status {
                status: *status,
                body: "internal error".to_string(),
            }),
            Some(EntryScript::Missing) | None => Err(CatalogError::NotFound(id.to_string())),
        }
    }

    async fn patch_variant_groups(
        &self,
        id: EntryId,
        groups: &[VariantGroup],
    ) -> Result<(), CatalogError> {
        if self.rejected.lock().unwrap().contains(&id) {
            return Err(CatalogError::Status {
                status: 403,
                body: "{\"code\":\"rest_forbidden\"}".to_string(),
            });
        }
        self.patches.lock().unwrap().push((id, groups.to_vec()));
        Ok(())
    }
}

// ============================================================================
// SECTION: Object Store Fake
// ============================================================================

/// Scripted response to an object lookup.
#[derive(Clone, Copy)]
pub enum ObjectScript {
    /// The object has this size.
    Size(u64),
    /// The lookup fails with a backend error.
    Broken,
}

/// In-memory object store; unknown keys are not found.
#[derive(Default)]
pub struct ScriptedStore {
    /// Responses by object key.
    objects: HashMap<String, ObjectScript>,
    /// Every key looked up, in order.
    lookups: Mutex<Vec<ObjectKey>>,
}

impl ScriptedStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an object of `size` bytes under `key`.
    pub fn with_object(mut self, key: &str, size: u64) -> Self {
        self.objects.insert(key.to_string(), ObjectScript::Size(size));
        self
    }

    /// Makes lookups of `key` fail with a backend error.
    pub fn with_broken(mut self, key: &str) -> Self {
        self.objects.insert(key.to_string(), ObjectScript::Broken);
        self
    }

    /// Returns the keys looked up so far.
    pub fn lookups(&self) -> Vec<ObjectKey> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for ScriptedStore {
    async fn head_size(&self, key: &ObjectKey) -> Result<u64, ObjectStoreError> {
        self.lookups.lock().unwrap().push(key.clone());
        match self.objects.get(key.as_str()) {
            Some(ObjectScript::Size(size)) => Ok(*size),
            Some(ObjectScript::Broken) => {
                Err(ObjectStoreError::Backend("connection reset".to_string()))
            }
            None => Err(ObjectStoreError::NotFound(key.to_string())),
        }
    }
}

// ============================================================================
// SECTION: Reporter
// ============================================================================

/// Reporter that keeps every event in memory.
#[derive(Default)]
pub struct RecordingReporter {
    /// Events in emission order.
    events: Mutex<Vec<SweepEvent>>,
}

impl RecordingReporter {
    /// Creates an empty reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded event.
    pub fn events(&self) -> Vec<SweepEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Returns the stable names of every recorded event.
    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(SweepEvent::name).collect()
    }

    /// Returns the events at or above `level`.
    pub fn at_least(&self, level: ReportLevel) -> Vec<SweepEvent> {
        self.events.lock().unwrap().iter().filter(|event| event.level() >= level).cloned().collect()
    }
}

impl SweepReporter for RecordingReporter {
    fn report(&self, event: &SweepEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

// ============================================================================
// SECTION: Builders
// ============================================================================

/// Builds an item referencing `link` through the preferred attribute.
pub fn item(link: &str) -> VariantItem {
    VariantItem {
        play_link: Some(link.to_string()),
        ..VariantItem::default()
    }
}

/// Builds a group with `quality`, optional stored `capacity`, and item links.
pub fn group(quality: &str, capacity: Option<&str>, links: &[&str]) -> VariantGroup {
    VariantGroup {
        quality: Some(quality.to_string()),
        capacity: capacity.map(str::to_string),
        items: links.iter().map(|link| item(link)).collect(),
        ..VariantGroup::default()
    }
}

/// Builds an entry carrying `groups`.
pub fn entry(id: u64, title: &str, groups: Vec<VariantGroup>) -> CatalogEntry {
    CatalogEntry {
        id: EntryId::new(id),
        title: title.to_string(),
        meta: EntryMetadata {
            variant_groups: groups,
            ..EntryMetadata::default()
        },
    }
}
