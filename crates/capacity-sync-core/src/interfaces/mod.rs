// crates/capacity-sync-core/src/interfaces/mod.rs
// ============================================================================
// Module: Capacity Sync Interfaces
// Description: Contracts for the catalog service, object store, and reporting.
// Purpose: Define the collaborator surfaces used by the sweep runtime.
// Dependencies: crate::core, async-trait, thiserror
// ============================================================================

//! ## Overview
//! The sweep runtime talks to two remote collaborators, a paginated catalog
//! service and an object store exposing metadata lookups, and emits progress
//! through a reporter. Failures from both collaborators are classified into a
//! closed [`ErrorKind`] set; [`failure_level`] decides how loudly each kind is
//! reported for each operation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::core::CatalogEntry;
use crate::core::CatalogListing;
use crate::core::EntryId;
use crate::core::ObjectKey;
use crate::core::PageRequest;
use crate::core::SweepSummary;
use crate::core::VariantGroup;

// ============================================================================
// SECTION: Failure Policy
// ============================================================================

/// Closed classification of collaborator failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The addressed record or object does not exist.
    NotFound,
    /// Network, timeout, or server-side failure.
    TransientIo,
    /// The response or stored data is malformed.
    Validation,
}

/// Operations whose failures are subject to the reporting policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Catalog page listing.
    PageList,
    /// Catalog entry detail fetch.
    EntryFetch,
    /// Catalog metadata write-back.
    EntryPatch,
    /// Object-store metadata lookup.
    ObjectHead,
    /// Parsing of a stored capacity label.
    LabelParse,
}

/// Severity at which a sweep event is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReportLevel {
    /// Not reported at all.
    Silent,
    /// Routine progress.
    Info,
    /// Recoverable failure; the sweep continues.
    Warn,
    /// Failure that ends the sweep.
    Error,
}

/// Returns the report level for a failure of `kind` during `operation`.
#[must_use]
pub const fn failure_level(operation: Operation, kind: ErrorKind) -> ReportLevel {
    match (operation, kind) {
        (Operation::PageList, _) => ReportLevel::Error,
        (Operation::ObjectHead, ErrorKind::NotFound) => ReportLevel::Silent,
        (Operation::EntryFetch, ErrorKind::NotFound) => ReportLevel::Info,
        _ => ReportLevel::Warn,
    }
}

// ============================================================================
// SECTION: Catalog Service
// ============================================================================

/// Catalog service errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The addressed entry does not exist.
    #[error("catalog entry not found: {0}")]
    NotFound(String),
    /// The request could not be completed.
    #[error("catalog request failed: {0}")]
    Transport(String),
    /// The catalog answered with a non-success status.
    #[error("catalog returned status {status}: {body}")]
    Status {
        /// HTTP-style status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },
    /// The catalog response could not be interpreted.
    #[error("catalog response invalid: {0}")]
    Invalid(String),
}

impl CatalogError {
    /// Returns the failure classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Transport(_) | Self::Status { .. } => ErrorKind::TransientIo,
            Self::Invalid(_) => ErrorKind::Validation,
        }
    }
}

/// Remote content catalog holding the entries being reconciled.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Lists one page of entries.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the page cannot be fetched.
    async fn list_page(&self, request: &PageRequest) -> Result<Vec<CatalogListing>, CatalogError>;

    /// Fetches the full detail record of an entry.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when the entry no longer exists and
    /// another [`CatalogError`] for any other failure.
    async fn get_entry(&self, id: EntryId) -> Result<CatalogEntry, CatalogError>;

    /// Replaces the variant-group list of an entry with a partial metadata update.
    ///
    /// Only the variant-group metadata key is written; other metadata is left
    /// to the catalog's merge semantics.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the update is rejected or fails.
    async fn patch_variant_groups(
        &self,
        id: EntryId,
        groups: &[VariantGroup],
    ) -> Result<(), CatalogError>;
}

// ============================================================================
// SECTION: Object Store
// ============================================================================

/// Object store errors.
#[derive(Debug, Error)]
pub enum ObjectStoreError {
    /// The object does not exist.
    #[error("object not found: {0}")]
    NotFound(String),
    /// The lookup failed for another reason (network, access, server).
    #[error("object store backend error: {0}")]
    Backend(String),
    /// The object metadata is unusable.
    #[error("object metadata invalid: {0}")]
    Invalid(String),
}

impl ObjectStoreError {
    /// Returns the failure classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Backend(_) => ErrorKind::TransientIo,
            Self::Invalid(_) => ErrorKind::Validation,
        }
    }
}

/// Blob store exposing metadata lookups without body transfer.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Returns the byte length of the object stored under `key`.
    ///
    /// `0` stands for an empty object or one whose length is not reported;
    /// neither counts as a size sample.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectStoreError::NotFound`] when no object exists and another
    /// [`ObjectStoreError`] when the metadata cannot be obtained.
    async fn head_size(&self, key: &ObjectKey) -> Result<u64, ObjectStoreError>;
}

// ============================================================================
// SECTION: Reporting
// ============================================================================

/// Operator-facing progress and outcome event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepEvent {
    /// A sweep is starting.
    SweepStarted {
        /// Entries requested per page.
        page_size: u32,
        /// Page limit for the sweep.
        max_pages: u32,
        /// Whether write-backs are suppressed.
        dry_run: bool,
    },
    /// A page listing is being requested.
    PageRequested {
        /// Page number.
        page: u32,
        /// Page limit for the sweep.
        max_pages: u32,
    },
    /// A page listing returned entries.
    PageListed {
        /// Page number.
        page: u32,
        /// Number of entries returned.
        entries: usize,
    },
    /// A page listing failed; the sweep stops.
    PageFailed {
        /// Page number.
        page: u32,
        /// Failure description.
        error: String,
    },
    /// A page listing returned no entries; every page has been processed.
    CatalogExhausted {
        /// Page number that came back empty.
        page: u32,
    },
    /// An entry is being processed.
    EntryStarted {
        /// 1-based position of the entry within the sweep.
        ordinal: u64,
        /// Entry identifier.
        id: EntryId,
        /// Cleaned display title.
        title: String,
    },
    /// The entry detail record could not be fetched.
    EntryFetchFailed {
        /// Entry identifier.
        id: EntryId,
        /// Failure classification.
        kind: ErrorKind,
        /// Failure description.
        error: String,
    },
    /// The entry carries no variant groups.
    EntryWithoutGroups {
        /// Entry identifier.
        id: EntryId,
        /// Cleaned display title.
        title: String,
    },
    /// An object lookup failed and was dropped from the sample.
    SampleFailed {
        /// Object key.
        key: ObjectKey,
        /// Failure classification.
        kind: ErrorKind,
        /// Failure description.
        error: String,
    },
    /// A variant group's capacity label was replaced.
    GroupRelabeled {
        /// Entry identifier.
        id: EntryId,
        /// Normalized quality tag.
        quality: String,
        /// Previous label (sentinel when absent).
        previous: String,
        /// New label.
        current: String,
    },
    /// A stored capacity label could not be parsed; the group is left untouched.
    GroupLabelUnreadable {
        /// Entry identifier.
        id: EntryId,
        /// Normalized quality tag.
        quality: String,
        /// Stored label.
        label: String,
        /// Failure classification.
        kind: ErrorKind,
    },
    /// The entry's metadata was written back.
    EntryUpdated {
        /// Entry identifier.
        id: EntryId,
        /// Cleaned display title.
        title: String,
    },
    /// The write-back was rejected or failed.
    EntryPatchFailed {
        /// Entry identifier.
        id: EntryId,
        /// Failure classification.
        kind: ErrorKind,
        /// Failure description including the response body.
        error: String,
    },
    /// Changes were computed but not written because of dry-run mode.
    EntryDryRun {
        /// Entry identifier.
        id: EntryId,
        /// Cleaned display title.
        title: String,
    },
    /// No group diverged enough to warrant a write-back.
    EntryUnchanged {
        /// Entry identifier.
        id: EntryId,
        /// Cleaned display title.
        title: String,
    },
    /// The sweep finished.
    SweepFinished {
        /// Aggregate counters and termination reason.
        summary: SweepSummary,
    },
}

impl SweepEvent {
    /// Returns a stable label for the event.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SweepStarted { .. } => "sweep_started",
            Self::PageRequested { .. } => "page_requested",
            Self::PageListed { .. } => "page_listed",
            Self::PageFailed { .. } => "page_failed",
            Self::CatalogExhausted { .. } => "catalog_exhausted",
            Self::EntryStarted { .. } => "entry_started",
            Self::EntryFetchFailed { .. } => "entry_fetch_failed",
            Self::EntryWithoutGroups { .. } => "entry_without_groups",
            Self::SampleFailed { .. } => "sample_failed",
            Self::GroupRelabeled { .. } => "group_relabeled",
            Self::GroupLabelUnreadable { .. } => "group_label_unreadable",
            Self::EntryUpdated { .. } => "entry_updated",
            Self::EntryPatchFailed { .. } => "entry_patch_failed",
            Self::EntryDryRun { .. } => "entry_dry_run",
            Self::EntryUnchanged { .. } => "entry_unchanged",
            Self::SweepFinished { .. } => "sweep_finished",
        }
    }

    /// Returns the level the event is reported at.
    #[must_use]
    pub const fn level(&self) -> ReportLevel {
        match self {
            Self::PageFailed { .. } => ReportLevel::Error,
            Self::EntryFetchFailed {
                kind, ..
            } => failure_level(Operation::EntryFetch, *kind),
            Self::SampleFailed {
                kind, ..
            } => failure_level(Operation::ObjectHead, *kind),
            Self::EntryPatchFailed {
                kind, ..
            } => failure_level(Operation::EntryPatch, *kind),
            Self::GroupLabelUnreadable {
                kind, ..
            } => failure_level(Operation::LabelParse, *kind),
            Self::SweepStarted { .. }
            | Self::PageRequested { .. }
            | Self::PageListed { .. }
            | Self::CatalogExhausted { .. }
            | Self::EntryStarted { .. }
            | Self::EntryWithoutGroups { .. }
            | Self::GroupRelabeled { .. }
            | Self::EntryUpdated { .. }
            | Self::EntryDryRun { .. }
            | Self::EntryUnchanged { .. }
            | Self::SweepFinished { .. } => ReportLevel::Info,
        }
    }
}

impl fmt::Display for SweepEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SweepStarted {
                page_size,
                max_pages,
                dry_run,
            } => {
                write!(f, "starting capacity sweep (up to {max_pages} pages x {page_size})")?;
                if *dry_run {
                    f.write_str(" [dry run]")?;
                }
                Ok(())
            }
            Self::PageRequested {
                page,
                max_pages,
            } => write!(f, "page {page}/{max_pages}: requesting entry listing"),
            Self::PageListed {
                page,
                entries,
            } => write!(f, "page {page}: {entries} entries listed"),
            Self::PageFailed {
                page,
                error,
            } => write!(f, "page {page}: listing failed: {error}"),
            Self::CatalogExhausted {
                page,
            } => write!(f, "page {page} is empty; all pages processed"),
            Self::EntryStarted {
                ordinal,
                id,
                title,
            } => write!(f, "[{ordinal}] processing {title} (id {id})"),
            Self::EntryFetchFailed {
                id,
                kind: ErrorKind::NotFound,
                ..
            } => write!(f, "entry {id} no longer exists; skipped"),
            Self::EntryFetchFailed {
                id,
                error,
                ..
            } => write!(f, "entry {id} could not be fetched: {error}"),
            Self::EntryWithoutGroups {
                title, ..
            } => write!(f, "{title}: no variant groups"),
            Self::SampleFailed {
                key,
                error,
                ..
            } => write!(f, "object {key} unavailable: {error}"),
            Self::GroupRelabeled {
                quality,
                previous,
                current,
                ..
            } => write!(f, "{quality}: {previous} -> {current}"),
            Self::GroupLabelUnreadable {
                id,
                quality,
                label,
                ..
            } => write!(f, "entry {id} {quality}: stored capacity \"{label}\" is unreadable; left as is"),
            Self::EntryUpdated {
                title, ..
            } => write!(f, "updated: {title}"),
            Self::EntryPatchFailed {
                id,
                error,
                ..
            } => write!(f, "entry {id} update failed: {error}"),
            Self::EntryDryRun {
                title, ..
            } => write!(f, "dry run, not written: {title}"),
            Self::EntryUnchanged {
                title, ..
            } => write!(f, "no change: {title}"),
            Self::SweepFinished {
                summary,
            } => write!(
                f,
                "sweep finished: {} entries processed, {} entries updated",
                summary.processed, summary.updated
            ),
        }
    }
}

/// Sink for operator-facing sweep events.
pub trait SweepReporter: Send + Sync {
    /// Records a sweep event.
    fn report(&self, event: &SweepEvent);
}
