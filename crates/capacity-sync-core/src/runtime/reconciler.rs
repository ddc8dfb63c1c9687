// crates/capacity-sync-core/src/runtime/reconciler.rs
// ============================================================================
// Module: Variant-Group Reconciler
// Description: Per-entry comparison of stored and measured capacity labels.
// Purpose: Decide which variant groups need a new capacity label.
// Dependencies: crate::{core, interfaces, runtime::estimator}
// ============================================================================

//! ## Overview
//! The reconciler walks an entry's variant groups in order and relabels each
//! group whose measured size diverges from its stored label by more than the
//! configured threshold. It performs no catalog writes; the caller decides
//! whether to persist the returned groups.
//!
//! ## Invariants
//! - Groups with an empty quality tag or no items are never sampled or changed.
//! - Groups without a size estimate keep their stored label.
//! - Only the `capacity` field of a group is ever modified.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::EntryId;
use crate::core::UNKNOWN_CAPACITY;
use crate::core::VariantGroup;
use crate::core::decode_capacity;
use crate::core::encode_capacity;
use crate::core::label_megabytes;
use crate::interfaces::ObjectStore;
use crate::interfaces::SweepEvent;
use crate::interfaces::SweepReporter;
use crate::runtime::estimator::SizeEstimator;
use crate::runtime::settings::ReconcilePolicy;

// ============================================================================
// SECTION: Outcome
// ============================================================================

/// Result of reconciling one entry's variant groups.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileOutcome {
    /// Variant groups in their original order, relabeled where needed.
    pub groups: Vec<VariantGroup>,
    /// True when at least one group was relabeled.
    pub changed: bool,
}

// ============================================================================
// SECTION: Reconciler
// ============================================================================

/// Reconciles stored capacity labels against sampled object sizes.
pub struct GroupReconciler<'a, S: ?Sized, R: ?Sized> {
    /// Estimator used for each eligible group.
    estimator: SizeEstimator<'a, S, R>,
    /// Reporter for relabels and unreadable labels.
    reporter: &'a R,
    /// Sampling and divergence policy.
    policy: ReconcilePolicy,
}

impl<'a, S, R> GroupReconciler<'a, S, R>
where
    S: ObjectStore + ?Sized,
    R: SweepReporter + ?Sized,
{
    /// Creates a reconciler over `store` using `policy`.
    #[must_use]
    pub const fn new(store: &'a S, reporter: &'a R, policy: ReconcilePolicy) -> Self {
        Self {
            estimator: SizeEstimator::new(store, reporter, policy.sample_cap),
            reporter,
            policy,
        }
    }

    /// Reconciles every group of entry `id`.
    pub async fn reconcile(&self, id: EntryId, mut groups: Vec<VariantGroup>) -> ReconcileOutcome {
        let mut changed = false;
        for group in &mut groups {
            changed |= self.reconcile_group(id, group).await;
        }
        ReconcileOutcome {
            groups,
            changed,
        }
    }

    /// Reconciles one group in place; returns true when it was relabeled.
    async fn reconcile_group(&self, id: EntryId, group: &mut VariantGroup) -> bool {
        let Some(quality) = group.normalized_quality() else {
            return false;
        };
        if group.items.is_empty() {
            return false;
        }
        let stored_mb = match decode_capacity(group.capacity.as_deref()) {
            Ok(megabytes) => megabytes,
            Err(err) => {
                self.reporter.report(&SweepEvent::GroupLabelUnreadable {
                    id,
                    quality,
                    label: group.capacity.clone().unwrap_or_default(),
                    kind: err.kind(),
                });
                return false;
            }
        };
        let keys = group.sample_keys(self.policy.sample_cap);
        let Some(estimate) = self.estimator.estimate(&keys).await else {
            return false;
        };
        let label = encode_capacity(estimate.mean_bytes);
        if (label_megabytes(&label) - stored_mb).abs() <= self.policy.divergence_threshold_mb {
            return false;
        }
        let previous = match group.capacity.as_deref() {
            Some(stored) if !stored.is_empty() => stored.to_string(),
            _ => UNKNOWN_CAPACITY.to_string(),
        };
        let current = label.into_string();
        self.reporter.report(&SweepEvent::GroupRelabeled {
            id,
            quality,
            previous,
            current: current.clone(),
        });
        group.capacity = Some(current);
        true
    }
}
