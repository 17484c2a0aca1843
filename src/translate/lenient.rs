//! Lenient re-application of dictionaries onto already translated records.

use crate::dictionary::DictionarySet;
use crate::error::MissingTranslation;
use crate::model::{AttributeGroup, NamedValue, ProductRecord};
use crate::presence::lookup;

/// Result of a lenient pass over one product.
#[derive(Clone, Debug, PartialEq)]
pub struct LenientOutcome {
    /// Product with every available term applied.
    pub product: ProductRecord,
    /// Lookups that missed, in walk order; the old value was kept for each.
    pub missing: Vec<MissingTranslation>,
}

/// What: Re-apply dictionaries to a target-language product, tolerating gaps.
///
/// Inputs:
/// - `product`: Existing target-language product
/// - `dicts`: Target-language dictionaries
///
/// Output:
/// - `LenientOutcome` with the updated product and every missed lookup.
///
/// Details:
/// - `lead` and `description` are never touched. They are set by the initial
///   translation and may have been edited by hand since.
/// - `lang` is not changed; the record is already in the target language.
#[must_use]
pub fn apply_translations_to_product(product: &ProductRecord, dicts: &DictionarySet) -> LenientOutcome {
    let mut missing = Vec::new();
    let mut updated = product.clone();

    match lookup(&dicts.categories, &product.category_slug) {
        Some(name) => updated.category_name.clone_from(name),
        None => missing.push(MissingTranslation::CategorySlug(product.category_slug.clone())),
    }

    updated.attribute_groups = product
        .attribute_groups
        .iter()
        .map(|group| apply_group(&product.id, group, dicts, &mut missing))
        .collect();

    updated.variants = product
        .variants
        .iter()
        .map(|variant| {
            let mut out = variant.clone();
            match lookup(&dicts.variants, &variant.id) {
                Some(name) => out.name.clone_from(name),
                None => missing.push(MissingTranslation::Variant(variant.id.clone())),
            }
            out
        })
        .collect();

    LenientOutcome {
        product: updated,
        missing,
    }
}

/// Apply group and property terms, recording misses.
fn apply_group(
    product_id: &str,
    group: &AttributeGroup,
    dicts: &DictionarySet,
    missing: &mut Vec<MissingTranslation>,
) -> AttributeGroup {
    let mut out = group.clone();
    match lookup(&dicts.attribute_groups, &group.id) {
        Some(name) => out.name.clone_from(name),
        None => missing.push(MissingTranslation::AttributeGroup(group.id.clone())),
    }
    out.properties = group
        .properties
        .iter()
        .map(|property| {
            let mut prop: NamedValue = property.clone();
            match lookup(&dicts.attributes, &property.id) {
                Some(name) => prop.name.clone_from(name),
                None => missing.push(MissingTranslation::Attribute(property.id.clone())),
            }
            let value = lookup(&dicts.attribute_values, product_id)
                .and_then(|values| lookup(values, &property.id));
            match value {
                Some(v) => prop.value.clone_from(v),
                None => missing.push(MissingTranslation::AttributeValue {
                    attribute: property.id.clone(),
                    product: product_id.to_string(),
                }),
            }
            prop
        })
        .collect();
    out
}
