//! Pure dictionary builders. No I/O: the caller loads the existing
//! dictionaries and the scanned records, then persists the result.
//!
//! Every builder starts from the existing dictionary and only fills keys that
//! are missing (see [`crate::presence`]). Existing values are never replaced,
//! so a build pass can only grow a dictionary.

use std::collections::BTreeMap;

use super::{AttributeValuesDictionary, DescriptionsDictionary, DictionarySet, TermDictionary};
use crate::model::ProductRecord;
use crate::presence::insert_if_absent;
use crate::store::scraped::ScrapedCategory;

/// What: Fill attribute group names from products.
///
/// Inputs:
/// - `products`: Records of one language
/// - `existing`: Current dictionary
///
/// Output:
/// - `existing` plus every group id not yet present.
#[must_use]
pub fn build_attribute_groups(products: &[ProductRecord], existing: TermDictionary) -> TermDictionary {
    let mut dict = existing;
    for group in products.iter().flat_map(|p| &p.attribute_groups) {
        if !group.id.is_empty() && !group.name.is_empty() {
            insert_if_absent(&mut dict, &group.id, group.name.clone());
        }
    }
    dict
}

/// What: Fill attribute (property) names from products.
///
/// Inputs:
/// - `products`: Records of one language
/// - `existing`: Current dictionary
///
/// Output:
/// - `existing` plus every property id not yet present.
#[must_use]
pub fn build_attributes(products: &[ProductRecord], existing: TermDictionary) -> TermDictionary {
    let mut dict = existing;
    let properties = products
        .iter()
        .flat_map(|p| &p.attribute_groups)
        .flat_map(|g| &g.properties);
    for property in properties {
        if !property.id.is_empty() && !property.name.is_empty() {
            insert_if_absent(&mut dict, &property.id, property.name.clone());
        }
    }
    dict
}

/// Fill variant names from products.
#[must_use]
pub fn build_variants(products: &[ProductRecord], existing: TermDictionary) -> TermDictionary {
    let mut dict = existing;
    for variant in products.iter().flat_map(|p| &p.variants) {
        if !variant.id.is_empty() && !variant.name.is_empty() {
            insert_if_absent(&mut dict, &variant.id, variant.name.clone());
        }
    }
    dict
}

/// What: Fill description paragraphs keyed by product id.
///
/// Details:
/// - A product with no paragraphs still records an empty list, so strict
///   translation of that product does not fail on its description.
#[must_use]
pub fn build_descriptions(
    products: &[ProductRecord],
    existing: DescriptionsDictionary,
) -> DescriptionsDictionary {
    let mut dict = existing;
    for product in products {
        if !product.id.is_empty() {
            insert_if_absent(&mut dict, &product.id, product.description.clone());
        }
    }
    dict
}

/// Fill category names from the scraped category list.
#[must_use]
pub fn build_categories(categories: &[ScrapedCategory], existing: TermDictionary) -> TermDictionary {
    let mut dict = existing;
    for category in categories {
        if !category.id.is_empty() && !category.name.is_empty() {
            insert_if_absent(&mut dict, &category.id, category.name.clone());
        }
    }
    dict
}

/// What: Fill per-product attribute values.
///
/// Inputs:
/// - `products`: Records of one language
/// - `existing`: Current dictionary
///
/// Output:
/// - `existing` plus an entry for every product id not yet present.
///
/// Details:
/// - A product already in the dictionary is left whole; new properties on
///   that product are not merged in.
/// - Products without any non-empty property value get no entry.
/// - Within one product the first property carrying an id wins.
#[must_use]
pub fn build_attribute_values(
    products: &[ProductRecord],
    existing: AttributeValuesDictionary,
) -> AttributeValuesDictionary {
    let mut dict = existing;
    for product in products {
        if product.id.is_empty() || dict.contains_key(&product.id) {
            continue;
        }
        let mut values: BTreeMap<String, String> = BTreeMap::new();
        for property in product.attribute_groups.iter().flat_map(|g| &g.properties) {
            if !property.id.is_empty() && !property.value.is_empty() {
                insert_if_absent(&mut values, &property.id, property.value.clone());
            }
        }
        if !values.is_empty() {
            dict.insert(product.id.clone(), values);
        }
    }
    dict
}

/// What: Run every builder over one language's records.
///
/// Inputs:
/// - `products`: Records of one language
/// - `categories`: Scraped categories for that language
/// - `existing`: Dictionaries currently on disk (empty maps where absent)
///
/// Output:
/// - The grown dictionary set.
#[must_use]
pub fn build_all(
    products: &[ProductRecord],
    categories: &[ScrapedCategory],
    existing: DictionarySet,
) -> DictionarySet {
    DictionarySet {
        attribute_groups: build_attribute_groups(products, existing.attribute_groups),
        attributes: build_attributes(products, existing.attributes),
        variants: build_variants(products, existing.variants),
        descriptions: build_descriptions(products, existing.descriptions),
        categories: build_categories(categories, existing.categories),
        attribute_values: build_attribute_values(products, existing.attribute_values),
    }
}
