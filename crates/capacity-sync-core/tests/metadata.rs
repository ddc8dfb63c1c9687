// crates/capacity-sync-core/tests/metadata.rs
// ============================================================================
// Module: Entry Metadata Tests
// Description: Variant-group extraction and pass-through of unknown attributes.
// ============================================================================
//! ## Overview
//! Ensures entry metadata is parsed leniently and that write-back payloads keep
//! every attribute the catalog stored.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use capacity_sync_core::EntryMetadata;
use capacity_sync_core::VariantGroup;
use serde_json::json;

const KEY: &str = "series_dlbox";

#[test]
fn groups_are_extracted_from_the_configured_key() {
    let meta = json!({
        KEY: [
            {"quality": "720p", "capacity": "300M", "items": [{"play_link": "/a.mkv"}]},
            {"quality": "1080p", "items": null}
        ],
        "rating": 8.1
    });

    let parsed = EntryMetadata::from_json(Some(meta), KEY).unwrap();

    assert_eq!(parsed.variant_groups.len(), 2);
    assert_eq!(parsed.variant_groups[0].items.len(), 1);
    assert!(parsed.variant_groups[1].items.is_empty());
    assert_eq!(parsed.extra.get("rating"), Some(&json!(8.1)));
    assert!(!parsed.extra.contains_key(KEY));
}

#[test]
fn missing_or_malformed_metadata_yields_no_groups() {
    assert!(EntryMetadata::from_json(None, KEY).unwrap().variant_groups.is_empty());
    assert!(EntryMetadata::from_json(Some(json!([])), KEY).unwrap().variant_groups.is_empty());

    let parsed = EntryMetadata::from_json(Some(json!({KEY: "legacy"})), KEY).unwrap();
    assert!(parsed.variant_groups.is_empty());
    assert_eq!(parsed.extra.get(KEY), Some(&json!("legacy")));
}

#[test]
fn non_object_group_elements_are_rejected() {
    assert!(EntryMetadata::from_json(Some(json!({KEY: [1, 2]})), KEY).is_err());
}

#[test]
fn unknown_group_and_item_attributes_survive_write_back() {
    let raw = json!({
        "quality": "480p",
        "capacity": "120M",
        "subtitle": "fa",
        "items": [{"link": "/e1.mkv", "title": "Episode 1", "order": 1}]
    });

    let mut group: VariantGroup = serde_json::from_value(raw.clone()).unwrap();
    assert_eq!(group.items[0].reference(), Some("/e1.mkv"));
    group.capacity = Some("150M".to_string());

    let written = serde_json::to_value(&group).unwrap();
    let mut expected = raw;
    expected["capacity"] = json!("150M");
    assert_eq!(written, expected);
}

#[test]
fn preferred_reference_wins_over_fallback() {
    let group: VariantGroup = serde_json::from_value(json!({
        "quality": "HD",
        "items": [
            {"play_link": "/play.mkv", "link": "/dl.mkv"},
            {"play_link": "", "link": "/dl2.mkv"},
            {"title": "no links"}
        ]
    }))
    .unwrap();

    let keys: Vec<String> = group.sample_keys(8).iter().map(ToString::to_string).collect();

    assert_eq!(keys, vec!["play.mkv", "dl2.mkv"]);
}

#[test]
fn untouched_groups_keep_null_and_absent_keys() {
    let stored = json!([
        {"capacity": null, "items": null, "note": "x", "quality": "480p"},
        {"quality": null, "items": [{"play_link": null, "link": "/e1.mkv"}]},
        {"quality": "720p", "items": []}
    ]);

    let parsed = EntryMetadata::from_json(Some(json!({KEY: stored.clone()})), KEY).unwrap();
    assert!(parsed.variant_groups[0].capacity.is_none());
    assert!(parsed.variant_groups[0].items.is_empty());
    assert_eq!(parsed.variant_groups[1].items[0].reference(), Some("/e1.mkv"));

    let written = serde_json::to_value(&parsed.variant_groups).unwrap();
    assert_eq!(written, stored);
}

#[test]
fn relabeling_a_null_capacity_writes_the_value() {
    let mut group: VariantGroup =
        serde_json::from_value(json!({"quality": "480p", "capacity": null, "items": null}))
            .unwrap();
    group.capacity = Some("150M".to_string());

    let written = serde_json::to_value(&group).unwrap();

    assert_eq!(written, json!({"quality": "480p", "capacity": "150M", "items": null}));
}
