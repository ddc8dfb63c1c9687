// crates/capacity-sync-core/src/core/title.rs
// ============================================================================
// Module: Display Titles
// Description: Cleanup rules for catalog display titles.
// Purpose: Strip promotional boilerplate from titles before reporting them.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Catalog titles are rendered for a storefront and often carry a fixed
//! promotional phrase and a trailing subtitle notice. Titles only feed
//! operator-facing reports; cleanup never affects reconciliation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Title Rules
// ============================================================================

/// Title cleanup rules.
///
/// # Invariants
/// - Empty phrases and markers are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleRules {
    /// Phrases removed wherever they occur.
    #[serde(default)]
    pub strip_phrases: Vec<String>,
    /// Markers at which the rest of the title is cut off.
    #[serde(default)]
    pub cut_markers: Vec<String>,
}

impl TitleRules {
    /// Returns the cleaned, trimmed display title.
    #[must_use]
    pub fn clean(&self, raw: &str) -> String {
        let mut title = raw.to_string();
        for marker in self.cut_markers.iter().filter(|marker| !marker.is_empty()) {
            if let Some(index) = title.find(marker.as_str()) {
                title.truncate(index);
            }
        }
        for phrase in self.strip_phrases.iter().filter(|phrase| !phrase.is_empty()) {
            title = title.replace(phrase.as_str(), "");
        }
        title.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::TitleRules;

    fn rules() -> TitleRules {
        TitleRules {
            strip_phrases: vec!["دانلود انیمه ".to_string()],
            cut_markers: vec![" با زیرنویس فارسی".to_string()],
        }
    }

    #[test]
    fn clean_strips_phrase_and_cuts_suffix() {
        let title = rules().clean("دانلود انیمه Naruto با زیرنویس فارسی چسبیده");
        assert_eq!(title, "Naruto");
    }

    #[test]
    fn clean_without_rules_only_trims() {
        assert_eq!(TitleRules::default().clean("  Monster  "), "Monster");
    }
}
