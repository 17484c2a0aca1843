//! Machine translation of records through a [`TextTranslator`].
//!
//! Text fields are flattened into one ordered list, translated as a batch,
//! and written back by position. No I/O beyond the translator itself.

use super::{TextTranslator, translate_batch};
use crate::error::TranslateError;
use crate::model::{CategoryRecord, ProductRecord};

/// What: Flatten a product's translatable text in a fixed order.
///
/// Inputs:
/// - `product`: Source product
///
/// Output:
/// - Description lines, category name, then per group its name followed by
///   each property's name and value, then variant names.
#[must_use]
pub fn product_texts(product: &ProductRecord) -> Vec<String> {
    let mut texts = product.description.clone();
    texts.push(product.category_name.clone());
    for group in &product.attribute_groups {
        texts.push(group.name.clone());
        for property in &group.properties {
            texts.push(property.name.clone());
            texts.push(property.value.clone());
        }
    }
    texts.extend(product.variants.iter().map(|v| v.name.clone()));
    texts
}

/// What: Write translated texts back into a copy of `product`.
///
/// Inputs:
/// - `product`: Source product the texts were taken from
/// - `translated`: Texts in [`product_texts`] order
/// - `target_lang`: Language code written into the result
///
/// Output:
/// - Translated product; missing positions keep the source text.
///
/// Details:
/// - The first description line also becomes `lead`.
#[must_use]
pub fn rebuild_product(product: &ProductRecord, translated: Vec<String>, target_lang: &str) -> ProductRecord {
    let mut out = product.clone();
    let mut it = translated.into_iter();
    let mut fill = |slot: &mut String| {
        if let Some(text) = it.next() {
            *slot = text;
        }
    };

    for line in &mut out.description {
        fill(line);
    }
    fill(&mut out.category_name);
    for group in &mut out.attribute_groups {
        fill(&mut group.name);
        for property in &mut group.properties {
            fill(&mut property.name);
            fill(&mut property.value);
        }
    }
    for variant in &mut out.variants {
        fill(&mut variant.name);
    }

    if let Some(first) = out.description.first() {
        out.lead.clone_from(first);
    }
    out.lang = target_lang.to_string();
    out
}

/// What: Machine-translate one product with a single batch of calls.
///
/// Inputs:
/// - `translator`: Text-translation primitive
/// - `product`: Source product
/// - `source_lang`/`target_lang`: Language pair
///
/// Output:
/// - The translated product.
///
/// # Errors
/// - Returns the first `TranslateError`; nothing of the product is kept.
pub async fn translate_product_auto<T: TextTranslator>(
    translator: &T,
    product: &ProductRecord,
    source_lang: &str,
    target_lang: &str,
) -> Result<ProductRecord, TranslateError> {
    let texts = product_texts(product);
    let translated = translate_batch(translator, &texts, source_lang, target_lang).await?;
    Ok(rebuild_product(product, translated, target_lang))
}

/// What: Machine-translate the names of a batch of categories.
///
/// Inputs:
/// - `translator`: Text-translation primitive
/// - `categories`: Source categories, one batch
/// - `source_lang`/`target_lang`: Language pair
///
/// Output:
/// - Translated categories in input order.
///
/// # Errors
/// - Returns the first `TranslateError`; the whole batch fails with it.
pub async fn translate_categories_auto<T: TextTranslator>(
    translator: &T,
    categories: &[CategoryRecord],
    source_lang: &str,
    target_lang: &str,
) -> Result<Vec<CategoryRecord>, TranslateError> {
    let names: Vec<String> = categories.iter().map(|c| c.name.clone()).collect();
    let translated = translate_batch(translator, &names, source_lang, target_lang).await?;
    Ok(categories
        .iter()
        .zip(translated)
        .map(|(category, name)| CategoryRecord {
            name,
            lang: target_lang.to_string(),
            ..category.clone()
        })
        .collect())
}
