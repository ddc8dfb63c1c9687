// crates/capacity-sync-core/src/runtime/estimator.rs
// ============================================================================
// Module: Size Estimator
// Description: Sampling-based size estimation over object-store metadata.
// Purpose: Turn a bounded set of object references into one mean byte count.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Files in a release group are expected to be near-uniform in size, so the
//! estimator measures at most `sample_cap` objects and averages them instead of
//! measuring the whole group. Lookups are awaited one at a time.
//!
//! Failed lookups are dropped from the sample. Missing objects are dropped
//! without a report; other failures are reported as warnings. Zero-length
//! objects count as unmeasured.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::ObjectKey;
use crate::interfaces::ObjectStore;
use crate::interfaces::Operation;
use crate::interfaces::ReportLevel;
use crate::interfaces::SweepEvent;
use crate::interfaces::SweepReporter;
use crate::interfaces::failure_level;

// ============================================================================
// SECTION: Estimate
// ============================================================================

/// Mean size of the successfully sampled objects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeEstimate {
    /// Arithmetic mean of the sampled sizes, in bytes.
    pub mean_bytes: f64,
    /// Number of objects that contributed to the mean.
    pub samples: usize,
}

/// Sampling size estimator.
pub struct SizeEstimator<'a, S: ?Sized, R: ?Sized> {
    /// Object store queried for sizes.
    store: &'a S,
    /// Reporter for lookup failures.
    reporter: &'a R,
    /// Maximum number of lookups per estimate.
    sample_cap: usize,
}

impl<'a, S, R> SizeEstimator<'a, S, R>
where
    S: ObjectStore + ?Sized,
    R: SweepReporter + ?Sized,
{
    /// Creates an estimator bounded to `sample_cap` lookups per call.
    #[must_use]
    pub const fn new(store: &'a S, reporter: &'a R, sample_cap: usize) -> Self {
        Self {
            store,
            reporter,
            sample_cap,
        }
    }

    /// Estimates the mean object size of `keys`, sampling at most the cap.
    ///
    /// Returns `None` when no lookup succeeded.
    pub async fn estimate(&self, keys: &[ObjectKey]) -> Option<SizeEstimate> {
        let mut total: u128 = 0;
        let mut samples: usize = 0;
        for key in keys.iter().take(self.sample_cap) {
            match self.store.head_size(key).await {
                Ok(0) => {}
                Ok(size) => {
                    total += u128::from(size);
                    samples += 1;
                }
                Err(err) => {
                    if failure_level(Operation::ObjectHead, err.kind()) != ReportLevel::Silent {
                        self.reporter.report(&SweepEvent::SampleFailed {
                            key: key.clone(),
                            kind: err.kind(),
                            error: err.to_string(),
                        });
                    }
                }
            }
        }
        if samples == 0 {
            return None;
        }
        #[allow(clippy::cast_precision_loss, reason = "Sampled byte totals stay within f64 integer precision.")]
        let mean_bytes = total as f64 / samples as f64;
        Some(SizeEstimate {
            mean_bytes,
            samples,
        })
    }
}
