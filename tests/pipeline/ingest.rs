//! Integration tests for `content ingest` and the manufacturer source registry.

#![cfg(test)]

use content_pipeline::PipelineError;
use content_pipeline::model::{CategoryRecord, EntityKind, ProductRecord};
use content_pipeline::pipeline::content::ingest;
use content_pipeline::report::{RecordingReporter, ReportLevel};
use content_pipeline::sources::SourceRegistry;
use content_pipeline::store::{Layout, read_record};
use tempfile::TempDir;

use crate::common::write_scraped;

#[test]
/// What: Scraped lines become per-language record files; bad lines are skipped.
///
/// Inputs:
/// - Two valid products in `en`/`pl`, one line without an id, one category.
///
/// Output:
/// - Three records written, one rejected line warned about with its line number.
fn ingest_writes_records_and_rejects_bad_lines() {
    let tmp = TempDir::new().expect("tempdir");
    let layout = Layout::under(tmp.path());
    write_scraped(
        &layout,
        concat!(
            "{\"id\":\"p1\",\"slug\":\"hunter\",\"lang\":\"en\",\"name\":\"Hunter\",\"weight_g\":120}\n",
            "{\"slug\":\"broken\",\"lang\":\"en\"}\n",
            "{\"id\":\"p1\",\"slug\":\"hunter\",\"lang\":\"pl\",\"name\":\"Myśliwski\"}\n",
        ),
        "{\"id\":\"knives\",\"slug\":\"knives\",\"lang\":\"en\",\"name\":\"Knives\"}\n",
    );

    let reporter = RecordingReporter::new();
    let summary = ingest(&layout, &reporter).expect("ingest");
    assert_eq!(summary.written, 3);
    assert_eq!(summary.problems, 1);
    let warnings = reporter.messages(ReportLevel::Warn);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains(":2:"), "unexpected warning: {}", warnings[0]);

    let en: ProductRecord =
        read_record(&layout.record_path(EntityKind::Product, Some("acme"), "en", "hunter"))
            .expect("read en");
    assert_eq!(en.manufacturer, "acme");
    assert_eq!(en.extra.get("weight_g"), Some(&serde_json::json!(120)));
    let pl: ProductRecord =
        read_record(&layout.record_path(EntityKind::Product, Some("acme"), "pl", "hunter"))
            .expect("read pl");
    assert_eq!(pl.name, "Myśliwski");
    let category: CategoryRecord =
        read_record(&layout.record_path(EntityKind::Category, Some("acme"), "en", "knives"))
            .expect("read category");
    assert_eq!(category.name, "Knives");
}

#[test]
/// What: Ingest refuses to run without scraped input.
///
/// Inputs:
/// - Empty project root.
///
/// Output:
/// - `NoManufacturers`.
fn ingest_without_input_fails() {
    let tmp = TempDir::new().expect("tempdir");
    let layout = Layout::under(tmp.path());
    let err = ingest(&layout, &RecordingReporter::new()).expect_err("no input");
    assert!(matches!(err, PipelineError::NoManufacturers(_)));
}

#[test]
/// What: Ingested manufacturers are listed and served by the registry.
///
/// Inputs:
/// - One ingested English product for `acme`.
///
/// Output:
/// - Registry lists `acme`; lookups by id hit and miss as expected.
fn registry_serves_ingested_products() {
    let tmp = TempDir::new().expect("tempdir");
    let layout = Layout::under(tmp.path());
    write_scraped(
        &layout,
        "{\"id\":\"p1\",\"slug\":\"hunter\",\"lang\":\"en\",\"name\":\"Hunter\"}\n",
        "",
    );
    ingest(&layout, &RecordingReporter::new()).expect("ingest");

    let registry = SourceRegistry::from_layout(&layout).expect("registry");
    assert_eq!(registry.manufacturers(), vec!["acme"]);
    let source = registry.get("acme").expect("acme");
    assert_eq!(source.list_all("en").expect("list").len(), 1);
    assert_eq!(
        source.get_by_id("p1", "en").expect("get").map(|p| p.name),
        Some("Hunter".to_string())
    );
    assert!(source.get_by_id("p9", "en").expect("get").is_none());
    assert!(matches!(
        registry.get("globex"),
        Err(PipelineError::UnknownManufacturer(_))
    ));
}

#[test]
/// What: Lines whose slug or language would escape the record tree are rejected.
///
/// Inputs:
/// - Line 1 with slug `../../../../escaped`, line 2 with lang `../x`, line 3 valid.
///
/// Output:
/// - One record written; two warnings carrying line numbers 1 and 2; nothing
///   written outside `content/`.
fn ingest_rejects_path_like_slug_and_lang() {
    let tmp = TempDir::new().expect("tempdir");
    let layout = Layout::under(tmp.path());
    write_scraped(
        &layout,
        concat!(
            "{\"id\":\"p1\",\"lang\":\"en\",\"slug\":\"../../../../escaped\"}\n",
            "{\"id\":\"p2\",\"lang\":\"../x\",\"slug\":\"ranger\"}\n",
            "{\"id\":\"p3\",\"lang\":\"en\",\"slug\":\"scout\"}\n",
        ),
        "",
    );

    let reporter = RecordingReporter::new();
    let summary = ingest(&layout, &reporter).expect("ingest");
    assert_eq!(summary.written, 1);
    assert_eq!(summary.problems, 2);
    let warnings = reporter.messages(ReportLevel::Warn);
    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].contains(":1:") && warnings[0].contains("`slug`"), "{}", warnings[0]);
    assert!(warnings[1].contains(":2:") && warnings[1].contains("`lang`"), "{}", warnings[1]);

    assert!(!tmp.path().join("escaped.json").exists());
    assert!(!layout.content_dir.join("escaped.json").exists());
    assert!(!layout.content_dir.join("products").join("x").exists());
    assert!(
        layout
            .record_path(EntityKind::Product, Some("acme"), "en", "scout")
            .exists()
    );
}
