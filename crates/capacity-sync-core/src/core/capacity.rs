// crates/capacity-sync-core/src/core/capacity.rs
// ============================================================================
// Module: Capacity Codec
// Description: Conversion between byte counts and human-readable capacity labels.
// Purpose: Render size estimates as labels and parse stored labels for comparison.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Capacity labels come in two shapes: an integer megabyte count with an `M`
//! suffix below [`GIGABYTE_THRESHOLD_MB`], and a one-decimal gigabyte value
//! with a `GB` suffix at or above it. Labels are parsed back into megabytes so
//! stored and estimated values can be compared numerically.
//!
//! Invariants:
//! - `decode_capacity(Some(encode_capacity(b).as_str()))` recovers the megabyte
//!   value of `b` within 0.5 MB below the threshold and 0.05 GB above it.
//! - Absent labels and the unknown sentinel decode to zero.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use thiserror::Error;

use crate::interfaces::ErrorKind;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Bytes per megabyte (binary).
pub const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;
/// Megabytes per gigabyte (binary).
pub const MEGABYTES_PER_GIGABYTE: f64 = 1024.0;
/// Megabyte value at which labels switch from `M` to `GB`.
pub const GIGABYTE_THRESHOLD_MB: f64 = 950.0;
/// Sentinel stored by the catalog when a group's capacity is unknown.
pub const UNKNOWN_CAPACITY: &str = "نامشخص";
/// Suffix of megabyte labels.
const MEGABYTE_SUFFIX: &str = "M";
/// Marker of gigabyte labels.
const GIGABYTE_MARKER: &str = "GB";

// ============================================================================
// SECTION: Capacity Label
// ============================================================================

/// Formatted capacity label, e.g. `"512M"` or `"1.4GB"`.
///
/// # Invariants
/// - Produced only by [`encode_capacity`]; always one of the two label shapes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CapacityLabel(String);

impl CapacityLabel {
    /// Returns the label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when the label uses the gigabyte shape.
    #[must_use]
    pub fn is_gigabytes(&self) -> bool {
        self.0.ends_with(GIGABYTE_MARKER)
    }

    /// Consumes the label and returns the owned string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CapacityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Capacity label parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapacityError {
    /// The label carries no parsable numeral.
    #[error("capacity label has no numeric value: {0}")]
    Unparseable(String),
}

impl CapacityError {
    /// Returns the failure kind for logging policy decisions.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

// ============================================================================
// SECTION: Codec
// ============================================================================

/// Encodes a byte count as a capacity label.
#[must_use]
pub fn encode_capacity(bytes: f64) -> CapacityLabel {
    let megabytes = bytes / BYTES_PER_MEGABYTE;
    if megabytes < GIGABYTE_THRESHOLD_MB {
        CapacityLabel(format!("{:.0}{MEGABYTE_SUFFIX}", megabytes.round()))
    } else {
        let gigabytes = megabytes / MEGABYTES_PER_GIGABYTE;
        CapacityLabel(format!("{gigabytes:.1}{GIGABYTE_MARKER}"))
    }
}

/// Decodes a stored capacity label into megabytes.
///
/// Absent labels, empty labels and [`UNKNOWN_CAPACITY`] decode to zero. All
/// characters other than digits and `.` are discarded and the longest leading
/// decimal numeral is parsed; labels containing `GB` are scaled to megabytes.
///
/// # Errors
///
/// Returns [`CapacityError::Unparseable`] when no numeral can be extracted.
pub fn decode_capacity(label: Option<&str>) -> Result<f64, CapacityError> {
    let Some(label) = label else {
        return Ok(0.0);
    };
    if label.is_empty() || label == UNKNOWN_CAPACITY {
        return Ok(0.0);
    }
    let value = leading_numeral(label)
        .parse::<f64>()
        .map_err(|_| CapacityError::Unparseable(label.to_string()))?;
    if label.contains(GIGABYTE_MARKER) {
        Ok(value * MEGABYTES_PER_GIGABYTE)
    } else {
        Ok(value)
    }
}

/// Decodes an encoded label into megabytes.
#[must_use]
pub fn label_megabytes(label: &CapacityLabel) -> f64 {
    // Encoded labels always carry a numeral.
    decode_capacity(Some(label.as_str())).unwrap_or(0.0)
}

/// Extracts the longest leading decimal numeral from the digit/point characters.
fn leading_numeral(label: &str) -> String {
    let mut numeral = String::new();
    let mut seen_point = false;
    for ch in label.chars().filter(|ch| ch.is_ascii_digit() || *ch == '.') {
        if ch == '.' {
            if seen_point {
                break;
            }
            seen_point = true;
        }
        numeral.push(ch);
    }
    numeral
}
