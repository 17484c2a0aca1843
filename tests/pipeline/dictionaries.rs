//! Integration tests for `dictionary build` and `dictionary sync`.
//!
//! Tests cover:
//! - Rebuilding without new input leaves every file byte-identical
//! - Rebuilding never overwrites an edited value and only adds keys
//! - Sync reports added keys, then reports the kinds as up to date

#![cfg(test)]

use std::collections::BTreeMap;
use std::fs;

use content_pipeline::PipelineError;
use content_pipeline::dictionary::{DictionaryKind, DictionarySet, persist};
use content_pipeline::pipeline::dictionaries::{build_all_dictionaries, sync_dictionaries};
use content_pipeline::report::{RecordingReporter, ReportLevel};
use content_pipeline::store::Layout;
use tempfile::TempDir;

use crate::common::{category, product, read, seed, write_scraped};

/// What: Seed two products and the scraped input that names their language.
///
/// Inputs:
/// - `layout`: Project layout
fn seed_catalog(layout: &Layout) {
    seed(
        layout,
        &[product("p1", "Hunter"), product("p2", "Ranger")],
        &[category("knives", "Knives")],
    );
    write_scraped(
        layout,
        "{\"lang\":\"en\"}\n",
        "{\"id\":\"knives\",\"name\":\"Knives\",\"lang\":\"en\"}\n{\"id\":\"knives\",\"name\":\"Noże\",\"lang\":\"pl\"}\n",
    );
}

#[test]
/// What: A second build over unchanged input rewrites identical bytes.
///
/// Inputs:
/// - Two products and one scraped category for `acme/en`.
///
/// Output:
/// - All six files equal before and after the second build.
fn rebuild_is_byte_identical() {
    let tmp = TempDir::new().expect("tempdir");
    let layout = Layout::under(tmp.path());
    seed_catalog(&layout);
    let reporter = RecordingReporter::new();

    assert_eq!(build_all_dictionaries(&layout, &reporter).expect("first build"), 1);
    let dir = layout.dictionary_dir(Some("acme"), "en");
    let first: Vec<String> = DictionaryKind::ALL
        .iter()
        .map(|k| read(&dir.join(k.file_name())))
        .collect();

    build_all_dictionaries(&layout, &reporter).expect("second build");
    let second: Vec<String> = DictionaryKind::ALL
        .iter()
        .map(|k| read(&dir.join(k.file_name())))
        .collect();
    assert_eq!(first, second);
    assert!(first[0].ends_with('\n'));
}

#[test]
/// What: Edited values survive a rebuild and new records only add keys.
///
/// Inputs:
/// - `g1` renamed by hand to "Blade (edited)", then product `p3` with group `g2` added.
///
/// Output:
/// - `g1` keeps the edit; `g2` and `p3` appear; the Polish category line is ignored.
fn rebuild_keeps_edits_and_grows() {
    let tmp = TempDir::new().expect("tempdir");
    let layout = Layout::under(tmp.path());
    seed_catalog(&layout);
    let reporter = RecordingReporter::new();
    build_all_dictionaries(&layout, &reporter).expect("build");

    let dir = layout.dictionary_dir(Some("acme"), "en");
    let mut groups: BTreeMap<String, String> =
        persist::load_required(&dir, DictionaryKind::AttributeGroups).expect("load groups");
    groups.insert("g1".into(), "Blade (edited)".into());
    persist::save(&dir, DictionaryKind::AttributeGroups, &groups).expect("save groups");

    let mut extra = product("p3", "Scout");
    extra.attribute_groups[0].id = "g2".into();
    extra.attribute_groups[0].name = "Handle".into();
    seed(&layout, &[extra], &[]);
    build_all_dictionaries(&layout, &reporter).expect("rebuild");

    let dicts = DictionarySet::load(&dir).expect("load");
    assert_eq!(dicts.attribute_groups.get("g1").map(String::as_str), Some("Blade (edited)"));
    assert_eq!(dicts.attribute_groups.get("g2").map(String::as_str), Some("Handle"));
    assert_eq!(dicts.descriptions.len(), 3);
    assert_eq!(
        dicts.attribute_values.get("p3").and_then(|v| v.get("a1")).map(String::as_str),
        Some("p3-length")
    );
    assert_eq!(dicts.categories.get("knives").map(String::as_str), Some("Knives"));
}

#[test]
/// What: Sync copies the missing key once; the second run finds nothing to add.
///
/// Inputs:
/// - A complete English set whose attribute groups are `{"g1": "Blade"}`; no Polish set.
///
/// Output:
/// - First run adds one attribute group; second run adds zero and says "up to date".
fn sync_adds_then_reports_up_to_date() {
    let tmp = TempDir::new().expect("tempdir");
    let layout = Layout::under(tmp.path());
    let source = layout.dictionary_dir(Some("acme"), "en");
    DictionarySet {
        attribute_groups: BTreeMap::from([("g1".into(), "Blade".into())]),
        ..DictionarySet::default()
    }
    .save(&source)
    .expect("save source");

    let reporter = RecordingReporter::new();
    let added = sync_dictionaries(&layout, &reporter, Some("acme"), "en", "pl").expect("first sync");
    assert_eq!(added, 1);
    assert!(
        reporter
            .messages(ReportLevel::Success)
            .contains(&"attribute-groups.json: added 1 new key(s)".to_string())
    );

    let reporter = RecordingReporter::new();
    let added = sync_dictionaries(&layout, &reporter, Some("acme"), "en", "pl").expect("second sync");
    assert_eq!(added, 0);
    assert!(
        reporter
            .messages(ReportLevel::Success)
            .contains(&"attribute-groups.json: up to date".to_string())
    );
    let target = DictionarySet::load(&layout.dictionary_dir(Some("acme"), "pl")).expect("load");
    assert_eq!(target.attribute_groups.get("g1").map(String::as_str), Some("Blade"));
}

#[test]
/// What: Sync refuses a partial source set and writes nothing.
///
/// Inputs:
/// - English directory holding only `attribute-groups.json`.
///
/// Output:
/// - `DictionaryFilesMissing` naming five files; no Polish directory.
fn sync_lists_missing_source_files() {
    let tmp = TempDir::new().expect("tempdir");
    let layout = Layout::under(tmp.path());
    let source = layout.dictionary_dir(Some("acme"), "en");
    fs::create_dir_all(&source).expect("mkdir");
    fs::write(source.join("attribute-groups.json"), "{}\n").expect("write");

    let err = sync_dictionaries(&layout, &RecordingReporter::new(), Some("acme"), "en", "pl")
        .expect_err("incomplete source");
    match err {
        PipelineError::DictionaryFilesMissing { files, .. } => assert_eq!(files.len(), 5),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!layout.dictionary_dir(Some("acme"), "pl").exists());
}
