//! Shared fixtures for the pipeline integration tests.

#![cfg(test)]
#![allow(dead_code)]

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use content_pipeline::error::TranslateError;
use content_pipeline::model::{AttributeGroup, CategoryRecord, NamedValue, ProductRecord};
use content_pipeline::store::{Layout, RecordStore, WriteMode};
use content_pipeline::translate::TextTranslator;

/// What: Build an English product with one group, one property and one variant.
///
/// Inputs:
/// - `id`: Product id, also used to derive the slug
/// - `name`: Display name
///
/// Output:
/// - Product owned by `acme`, filed under the `knives` category.
pub fn product(id: &str, name: &str) -> ProductRecord {
    ProductRecord {
        id: id.into(),
        lang: "en".into(),
        manufacturer: "acme".into(),
        slug: format!("{id}-slug"),
        name: name.into(),
        category_slug: "knives".into(),
        category_name: "Knives".into(),
        lead: format!("{name} lead."),
        description: vec![format!("{name} lead."), format!("{name} body.")],
        attribute_groups: vec![AttributeGroup {
            id: "g1".into(),
            name: "Blade".into(),
            properties: vec![NamedValue {
                id: "a1".into(),
                name: "Length".into(),
                value: format!("{id}-length"),
            }],
        }],
        variants: vec![NamedValue {
            id: "v1".into(),
            name: "Colour".into(),
            value: "black".into(),
        }],
        ..ProductRecord::default()
    }
}

/// English category record.
pub fn category(id: &str, name: &str) -> CategoryRecord {
    CategoryRecord {
        id: id.into(),
        lang: "en".into(),
        manufacturer: "acme".into(),
        name: name.into(),
        slug: id.into(),
        ..CategoryRecord::default()
    }
}

/// What: Store products and categories for `acme` in English.
///
/// Inputs:
/// - `layout`: Project layout
/// - `products`/`categories`: Records to write
pub fn seed(layout: &Layout, products: &[ProductRecord], categories: &[CategoryRecord]) {
    let store = RecordStore::new(layout.clone());
    for p in products {
        store.write(Some("acme"), p, WriteMode::Overwrite).expect("write product");
    }
    for c in categories {
        store.write(Some("acme"), c, WriteMode::Overwrite).expect("write category");
    }
}

/// What: Write scraped JSONL input for `acme`.
///
/// Inputs:
/// - `layout`: Project layout
/// - `products`/`categories`: Raw JSONL bodies
pub fn write_scraped(layout: &Layout, products: &str, categories: &str) {
    let dir = layout.scraped_dir.join("acme");
    fs::create_dir_all(&dir).expect("mkdir scraped");
    fs::write(dir.join("products.jsonl"), products).expect("write products.jsonl");
    fs::write(dir.join("categories.jsonl"), categories).expect("write categories.jsonl");
}

/// Read a file the test expects to exist.
pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

/// Translator that prefixes the target language and fails on chosen inputs.
pub struct Scripted {
    /// Texts that make the call fail.
    failing: Mutex<HashSet<String>>,
    /// Every text sent, in order.
    calls: Mutex<Vec<String>>,
}

impl Scripted {
    /// Translator that fails on every text in `failing`.
    pub fn failing_on(failing: &[&str]) -> Self {
        Self {
            failing: Mutex::new(failing.iter().map(|s| (*s).to_string()).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Stop failing on every text.
    pub fn heal(&self) {
        self.failing.lock().expect("lock").clear();
    }

    /// Texts sent so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("lock").clone()
    }
}

impl TextTranslator for Scripted {
    async fn translate(
        &self,
        text: &str,
        _source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslateError> {
        self.calls.lock().expect("lock").push(text.to_string());
        if self.failing.lock().expect("lock").contains(text) {
            return Err(TranslateError::Rejected(format!("cannot translate {text:?}")));
        }
        Ok(format!("[{target_lang}] {text}"))
    }
}
