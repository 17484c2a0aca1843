//! Integration tests for resumable automatic translation.
//!
//! Tests cover:
//! - A failed product is recorded and the run continues
//! - A rerun resumes from the ledger and clears it once clean
//! - `--skip-failed` leaves recorded failures alone
//! - A failed category batch stops the run

#![cfg(test)]

use content_pipeline::PipelineError;
use content_pipeline::model::{EntityKind, ProductRecord};
use content_pipeline::pipeline::translations::{AutoOptions, AutoTranslation};
use content_pipeline::report::{RecordingReporter, ReportLevel};
use content_pipeline::store::{Layout, read_record};
use content_pipeline::translate::progress::{FileProgressStore, ProgressStore, SessionKey};
use tempfile::TempDir;

use crate::common::{Scripted, category, product, seed};

/// Three English products, one category, stored for `acme`.
fn catalog() -> (TempDir, Layout) {
    let tmp = TempDir::new().expect("tempdir");
    let layout = Layout::under(tmp.path());
    seed(
        &layout,
        &[
            product("p1", "Hunter"),
            product("p2", "Ranger"),
            product("p3", "Scout"),
        ],
        &[category("knives", "Knives")],
    );
    (tmp, layout)
}

/// Ledger key of the product session under test.
fn product_key() -> SessionKey {
    SessionKey::new(EntityKind::Product, Some("acme"), "en", "pl")
}

#[tokio::test]
/// What: One failing product is recorded; the rest are translated.
///
/// Inputs:
/// - Products `p1`..`p3`; the translator rejects `p2`'s first description line.
///
/// Output:
/// - `Ok`; ledger lists `p1`, `p3` completed and `p2` failed; no `p2` target file.
async fn failed_product_is_recorded_and_run_continues() {
    let (_tmp, layout) = catalog();
    let reporter = RecordingReporter::new();
    let progress = FileProgressStore::new(layout.progress_dir.clone());
    let translator = Scripted::failing_on(&["Ranger lead."]);

    let summary = AutoTranslation::new(&layout, &reporter, &progress, &translator, AutoOptions::default())
        .run(Some("acme"), "en", "pl")
        .await
        .expect("run");
    assert_eq!(summary.written, 3);
    assert_eq!(summary.problems, 1);

    let ledger = progress.load(&product_key()).expect("load ledger");
    assert_eq!(ledger.completed, vec!["p1".to_string(), "p3".to_string()]);
    assert_eq!(ledger.failed.len(), 1);
    assert_eq!(ledger.failed[0].id, "p2");
    assert!(ledger.failed[0].error.contains("Ranger lead."));

    let p1: ProductRecord =
        read_record(&layout.record_path(EntityKind::Product, Some("acme"), "pl", "p1-slug"))
            .expect("read p1");
    assert_eq!(p1.lang, "pl");
    assert_eq!(p1.lead, "[pl] Hunter lead.");
    assert_eq!(p1.variants[0].name, "[pl] Colour");
    assert!(
        !layout
            .record_path(EntityKind::Product, Some("acme"), "pl", "p2-slug")
            .exists()
    );
    assert!(
        reporter
            .messages(ReportLevel::Warn)
            .iter()
            .any(|m| m.starts_with("1 product(s) failed"))
    );

    let category_key = SessionKey::new(EntityKind::Category, Some("acme"), "en", "pl");
    assert!(!progress.path(&category_key).exists());
}

#[tokio::test]
/// What: A rerun only sends the failed product and then clears the ledger.
///
/// Inputs:
/// - Ledger left by a run where `p2` failed; a translator that no longer fails.
///
/// Output:
/// - Resume message; no `p1`/`p3` texts sent; ledger file removed.
async fn rerun_retries_only_failed_and_clears_ledger() {
    let (_tmp, layout) = catalog();
    let progress = FileProgressStore::new(layout.progress_dir.clone());
    let translator = Scripted::failing_on(&["Ranger lead."]);
    let reporter = RecordingReporter::new();
    AutoTranslation::new(&layout, &reporter, &progress, &translator, AutoOptions::default())
        .products(Some("acme"), "en", "pl")
        .await
        .expect("first run");
    assert!(progress.path(&product_key()).exists());

    let translator = Scripted::failing_on(&[]);
    let reporter = RecordingReporter::new();
    let summary = AutoTranslation::new(&layout, &reporter, &progress, &translator, AutoOptions::default())
        .products(Some("acme"), "en", "pl")
        .await
        .expect("rerun");
    assert_eq!(summary.written, 1);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.problems, 0);

    let calls = translator.calls();
    assert!(calls.contains(&"Ranger lead.".to_string()));
    assert!(!calls.contains(&"Hunter lead.".to_string()));
    assert!(!calls.contains(&"Scout lead.".to_string()));
    assert!(
        reporter
            .messages(ReportLevel::Summary)
            .contains(&"Resuming previous translation: 2 completed, 1 failed".to_string())
    );
    assert!(!progress.path(&product_key()).exists());
    assert!(
        layout
            .record_path(EntityKind::Product, Some("acme"), "pl", "p2-slug")
            .exists()
    );
}

#[tokio::test]
/// What: With `skip_failed` the recorded failure is not retried.
///
/// Inputs:
/// - Ledger with `p2` failed; rerun with `skip_failed = true`.
///
/// Output:
/// - Nothing sent; ledger still lists `p2` as failed.
async fn skip_failed_leaves_failures_alone() {
    let (_tmp, layout) = catalog();
    let progress = FileProgressStore::new(layout.progress_dir.clone());
    let translator = Scripted::failing_on(&["Ranger lead."]);
    let reporter = RecordingReporter::new();
    AutoTranslation::new(&layout, &reporter, &progress, &translator, AutoOptions::default())
        .products(Some("acme"), "en", "pl")
        .await
        .expect("first run");

    translator.heal();
    let before = translator.calls().len();
    let options = AutoOptions {
        skip_failed: true,
        ..AutoOptions::default()
    };
    let summary = AutoTranslation::new(&layout, &reporter, &progress, &translator, options)
        .products(Some("acme"), "en", "pl")
        .await
        .expect("rerun");
    assert_eq!(summary.written, 0);
    assert_eq!(summary.skipped, 3);
    assert_eq!(translator.calls().len(), before);

    let ledger = progress.load(&product_key()).expect("load ledger");
    assert!(ledger.is_failed("p2"));
}

#[tokio::test]
/// What: A failed category batch records the whole batch and aborts.
///
/// Inputs:
/// - Categories `axes` and `knives`, batch size 1; the translator rejects "Axes".
///
/// Output:
/// - `BatchFailed` for one category; `axes` failed in the ledger; `knives` untouched.
async fn failed_category_batch_is_fatal() {
    let tmp = TempDir::new().expect("tempdir");
    let layout = Layout::under(tmp.path());
    seed(
        &layout,
        &[],
        &[category("axes", "Axes"), category("knives", "Knives")],
    );
    let progress = FileProgressStore::new(layout.progress_dir.clone());
    let translator = Scripted::failing_on(&["Axes"]);
    let reporter = RecordingReporter::new();
    let options = AutoOptions {
        category_batch_size: 1,
        ..AutoOptions::default()
    };

    let err = AutoTranslation::new(&layout, &reporter, &progress, &translator, options)
        .categories(Some("acme"), "en", "pl")
        .await
        .expect_err("batch failure");
    assert!(matches!(err, PipelineError::BatchFailed { count: 1, .. }));

    let key = SessionKey::new(EntityKind::Category, Some("acme"), "en", "pl");
    let ledger = progress.load(&key).expect("load ledger");
    assert!(ledger.is_failed("axes"));
    assert!(ledger.completed.is_empty());
    assert!(
        !layout
            .record_path(EntityKind::Category, Some("acme"), "pl", "knives")
            .exists()
    );
    assert!(!translator.calls().contains(&"Knives".to_string()));
}

#[tokio::test]
/// What: Automatic translation needs the source product directory.
///
/// Inputs:
/// - Empty project root.
///
/// Output:
/// - `SourceDirMissing`.
async fn missing_source_dir_is_reported() {
    let tmp = TempDir::new().expect("tempdir");
    let layout = Layout::under(tmp.path());
    let progress = FileProgressStore::new(layout.progress_dir.clone());
    let translator = Scripted::failing_on(&[]);
    let reporter = RecordingReporter::new();
    let err = AutoTranslation::new(&layout, &reporter, &progress, &translator, AutoOptions::default())
        .run(Some("acme"), "en", "pl")
        .await
        .expect_err("no source");
    assert!(matches!(err, PipelineError::SourceDirMissing(_)));
}
