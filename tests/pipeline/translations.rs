//! Integration tests for `translation init` and `translation update`.
//!
//! Tests cover:
//! - Build, sync and init chained over one catalog
//! - Update re-applying edited dictionaries while keeping unknown terms

#![cfg(test)]

use content_pipeline::dictionary::DictionarySet;
use content_pipeline::model::{CategoryRecord, EntityKind, ProductRecord};
use content_pipeline::pipeline::dictionaries::{build_all_dictionaries, sync_dictionaries};
use content_pipeline::pipeline::translations::{init_translations, update_translations};
use content_pipeline::report::{RecordingReporter, ReportLevel};
use content_pipeline::store::{Layout, read_record};
use tempfile::TempDir;

use crate::common::{category, product, seed, write_scraped};

/// What: Seed the English catalog, build its dictionaries and sync them to Polish.
///
/// Output:
/// - Temp root (kept alive by the caller) and its layout.
fn prepared() -> (TempDir, Layout) {
    let tmp = TempDir::new().expect("tempdir");
    let layout = Layout::under(tmp.path());
    seed(&layout, &[product("p1", "Hunter")], &[category("knives", "Knives")]);
    write_scraped(
        &layout,
        "{\"lang\":\"en\"}\n",
        "{\"id\":\"knives\",\"name\":\"Knives\",\"lang\":\"en\"}\n",
    );
    let reporter = RecordingReporter::new();
    build_all_dictionaries(&layout, &reporter).expect("build");
    sync_dictionaries(&layout, &reporter, Some("acme"), "en", "pl").expect("sync");
    (tmp, layout)
}

/// Replace selected Polish dictionary values.
fn translate_terms(layout: &Layout) {
    let dir = layout.dictionary_dir(Some("acme"), "pl");
    let mut dicts = DictionarySet::load(&dir).expect("load pl");
    dicts.attribute_groups.insert("g1".into(), "Ostrze".into());
    dicts.categories.insert("knives".into(), "Noże".into());
    dicts
        .descriptions
        .insert("p1".into(), vec!["Myśliwski.".into(), "Opis.".into()]);
    dicts.save(&dir).expect("save pl");
}

#[test]
/// What: Synced then edited dictionaries drive a strict translation.
///
/// Inputs:
/// - One product and one category, Polish dictionaries partly translated.
///
/// Output:
/// - Product and category written under `pl` with the dictionary values.
fn init_translates_from_synced_dictionaries() {
    let (_tmp, layout) = prepared();
    translate_terms(&layout);

    let reporter = RecordingReporter::new();
    let summary = init_translations(&layout, &reporter, Some("acme"), "en", "pl").expect("init");
    assert_eq!(summary.written, 2);

    let product: ProductRecord =
        read_record(&layout.record_path(EntityKind::Product, Some("acme"), "pl", "p1-slug"))
            .expect("read product");
    assert_eq!(product.lang, "pl");
    assert_eq!(product.category_name, "Noże");
    assert_eq!(product.attribute_groups[0].name, "Ostrze");
    assert_eq!(product.lead, "Myśliwski.");
    assert_eq!(product.attribute_groups[0].properties[0].value, "p1-length");

    let category: CategoryRecord =
        read_record(&layout.record_path(EntityKind::Category, Some("acme"), "pl", "knives"))
            .expect("read category");
    assert_eq!(category.name, "Noże");
    assert_eq!(category.lang, "pl");
}

#[test]
/// What: Update picks up changed terms and keeps values it cannot look up.
///
/// Inputs:
/// - Translated `pl` product; `g1` then renamed and `v1` removed from the dictionary.
///
/// Output:
/// - Group renamed, variant name kept, one warning, description untouched.
fn update_reapplies_dictionaries() {
    let (_tmp, layout) = prepared();
    translate_terms(&layout);
    let reporter = RecordingReporter::new();
    init_translations(&layout, &reporter, Some("acme"), "en", "pl").expect("init");

    let dir = layout.dictionary_dir(Some("acme"), "pl");
    let mut dicts = DictionarySet::load(&dir).expect("load pl");
    dicts.attribute_groups.insert("g1".into(), "Głownia".into());
    dicts.variants.remove("v1");
    dicts.descriptions.insert("p1".into(), vec!["Inny opis.".into()]);
    dicts.save(&dir).expect("save pl");

    let reporter = RecordingReporter::new();
    let summary = update_translations(&layout, &reporter, Some("acme"), "pl").expect("update");
    assert_eq!(summary.written, 1);
    assert_eq!(summary.warnings, 1);
    assert_eq!(summary.problems, 0);
    assert_eq!(reporter.messages(ReportLevel::Warn).len(), 1);

    let product: ProductRecord =
        read_record(&layout.record_path(EntityKind::Product, Some("acme"), "pl", "p1-slug"))
            .expect("read product");
    assert_eq!(product.attribute_groups[0].name, "Głownia");
    assert_eq!(product.variants[0].name, "Colour");
    assert_eq!(product.description, vec!["Myśliwski.".to_string(), "Opis.".to_string()]);
}
