// crates/capacity-sync-core/src/runtime/walker.rs
// ============================================================================
// Module: Catalog Walker
// Description: Sequential paged sweep over the catalog.
// Purpose: Drive fetch, reconcile, and write-back for every catalog entry.
// Dependencies: crate::{core, interfaces, runtime}, tokio
// ============================================================================

//! ## Overview
//! The walker requests catalog pages in increasing order, sorted by title,
//! and processes each listed entry in listing order. Every remote call is
//! awaited before the next one starts and a fixed pause follows every entry,
//! whether or not it was updated.
//!
//! Per-entry failures are reported and skipped. A failed page listing ends
//! the sweep early; the summary keeps every counter accumulated before it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::CatalogListing;
use crate::core::PageRequest;
use crate::core::SweepOutcome;
use crate::core::SweepSummary;
use crate::interfaces::CatalogService;
use crate::interfaces::ObjectStore;
use crate::interfaces::SweepEvent;
use crate::interfaces::SweepReporter;
use crate::runtime::reconciler::GroupReconciler;
use crate::runtime::settings::SweepSettings;

// ============================================================================
// SECTION: Walker
// ============================================================================

/// Sequential catalog sweep driver.
pub struct CatalogWalker<'a, C: ?Sized, S: ?Sized, R: ?Sized> {
    /// Catalog being swept.
    catalog: &'a C,
    /// Object store used for size sampling.
    store: &'a S,
    /// Progress sink.
    reporter: &'a R,
    /// Sweep settings.
    settings: &'a SweepSettings,
}

/// Result of processing one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryResult {
    /// Metadata was written back.
    Updated,
    /// Nothing was written (skipped, unchanged, dry run, or failed).
    NotUpdated,
}

impl<'a, C, S, R> CatalogWalker<'a, C, S, R>
where
    C: CatalogService + ?Sized,
    S: ObjectStore + ?Sized,
    R: SweepReporter + ?Sized,
{
    /// Creates a walker over the given collaborators.
    #[must_use]
    pub const fn new(
        catalog: &'a C,
        store: &'a S,
        reporter: &'a R,
        settings: &'a SweepSettings,
    ) -> Self {
        Self {
            catalog,
            store,
            reporter,
            settings,
        }
    }

    /// Runs one full sweep and returns its summary.
    pub async fn run(&self) -> SweepSummary {
        let settings = self.settings;
        self.reporter.report(&SweepEvent::SweepStarted {
            page_size: settings.page_size,
            max_pages: settings.max_pages,
            dry_run: settings.dry_run,
        });
        let reconciler = GroupReconciler::new(self.store, self.reporter, settings.policy);
        let page_size = usize::try_from(settings.page_size).unwrap_or(usize::MAX);

        let mut processed: u64 = 0;
        let mut updated: u64 = 0;
        let mut pages: u32 = 0;
        let mut page: u32 = 1;

        let outcome = loop {
            if page > settings.max_pages {
                break SweepOutcome::PageLimit;
            }
            self.reporter.report(&SweepEvent::PageRequested {
                page,
                max_pages: settings.max_pages,
            });
            let request = PageRequest::by_title(page, settings.page_size);
            let listings = match self.catalog.list_page(&request).await {
                Ok(listings) => listings,
                Err(err) => {
                    let error = err.to_string();
                    self.reporter.report(&SweepEvent::PageFailed {
                        page,
                        error: error.clone(),
                    });
                    break SweepOutcome::Aborted {
                        page,
                        error,
                    };
                }
            };
            pages += 1;
            if listings.is_empty() {
                self.reporter.report(&SweepEvent::CatalogExhausted {
                    page,
                });
                break SweepOutcome::Exhausted;
            }
            self.reporter.report(&SweepEvent::PageListed {
                page,
                entries: listings.len(),
            });

            for listing in &listings {
                processed += 1;
                if self.process_entry(&reconciler, processed, listing).await == EntryResult::Updated
                {
                    updated += 1;
                }
                tokio::time::sleep(settings.entry_delay).await;
            }

            if listings.len() < page_size {
                break SweepOutcome::LastPage;
            }
            page = page.saturating_add(1);
        };

        let summary = SweepSummary {
            processed,
            updated,
            pages,
            outcome,
        };
        self.reporter.report(&SweepEvent::SweepFinished {
            summary: summary.clone(),
        });
        summary
    }

    /// Fetches, reconciles, and writes back one entry.
    async fn process_entry(
        &self,
        reconciler: &GroupReconciler<'a, S, R>,
        ordinal: u64,
        listing: &CatalogListing,
    ) -> EntryResult {
        let id = listing.id;
        let title = self.settings.titles.clean(&listing.title);
        self.reporter.report(&SweepEvent::EntryStarted {
            ordinal,
            id,
            title: title.clone(),
        });

        let entry = match self.catalog.get_entry(id).await {
            Ok(entry) => entry,
            Err(err) => {
                self.reporter.report(&SweepEvent::EntryFetchFailed {
                    id,
                    kind: err.kind(),
                    error: err.to_string(),
                });
                return EntryResult::NotUpdated;
            }
        };
        if entry.meta.variant_groups.is_empty() {
            self.reporter.report(&SweepEvent::EntryWithoutGroups {
                id,
                title,
            });
            return EntryResult::NotUpdated;
        }

        let outcome = reconciler.reconcile(id, entry.meta.variant_groups).await;
        if !outcome.changed {
            self.reporter.report(&SweepEvent::EntryUnchanged {
                id,
                title,
            });
            return EntryResult::NotUpdated;
        }
        if self.settings.dry_run {
            self.reporter.report(&SweepEvent::EntryDryRun {
                id,
                title,
            });
            return EntryResult::NotUpdated;
        }

        match self.catalog.patch_variant_groups(id, &outcome.groups).await {
            Ok(()) => {
                self.reporter.report(&SweepEvent::EntryUpdated {
                    id,
                    title,
                });
                EntryResult::Updated
            }
            Err(err) => {
                self.reporter.report(&SweepEvent::EntryPatchFailed {
                    id,
                    kind: err.kind(),
                    error: err.to_string(),
                });
                EntryResult::NotUpdated
            }
        }
    }
}
