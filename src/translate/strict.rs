//! Strict dictionary-driven translation: any missing term aborts the record.

use crate::dictionary::{DictionarySet, TermDictionary};
use crate::error::MissingTranslation;
use crate::model::{AttributeGroup, CategoryRecord, NamedValue, ProductRecord};
use crate::presence::lookup;

/// What: Translate a product into `target_lang` using a complete dictionary set.
///
/// Inputs:
/// - `product`: Source-language product
/// - `target_lang`: Language code written into the result
/// - `dicts`: Target-language dictionaries
///
/// Output:
/// - The translated product.
///
/// # Errors
/// - Returns the first `MissingTranslation` met while walking, in order: the
///   category slug, the description, then each group (group name, then each
///   property's name and value), then each variant.
///
/// Details:
/// - `lead` becomes the first translated description paragraph when there is one.
pub fn translate_product(
    product: &ProductRecord,
    target_lang: &str,
    dicts: &DictionarySet,
) -> Result<ProductRecord, MissingTranslation> {
    let category_name = lookup(&dicts.categories, &product.category_slug)
        .ok_or_else(|| MissingTranslation::CategorySlug(product.category_slug.clone()))?;
    let description = lookup(&dicts.descriptions, &product.id)
        .ok_or_else(|| MissingTranslation::Description(product.id.clone()))?;

    let attribute_groups = product
        .attribute_groups
        .iter()
        .map(|group| translate_group(&product.id, group, dicts))
        .collect::<Result<Vec<_>, _>>()?;

    let variants = product
        .variants
        .iter()
        .map(|variant| {
            lookup(&dicts.variants, &variant.id)
                .map(|name| NamedValue {
                    name: name.clone(),
                    ..variant.clone()
                })
                .ok_or_else(|| MissingTranslation::Variant(variant.id.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ProductRecord {
        lang: target_lang.to_string(),
        category_name: category_name.clone(),
        lead: description.first().cloned().unwrap_or_else(|| product.lead.clone()),
        description: description.clone(),
        attribute_groups,
        variants,
        ..product.clone()
    })
}

/// Translate one attribute group and its properties.
fn translate_group(
    product_id: &str,
    group: &AttributeGroup,
    dicts: &DictionarySet,
) -> Result<AttributeGroup, MissingTranslation> {
    let name = lookup(&dicts.attribute_groups, &group.id)
        .ok_or_else(|| MissingTranslation::AttributeGroup(group.id.clone()))?;
    let properties = group
        .properties
        .iter()
        .map(|property| {
            let prop_name = lookup(&dicts.attributes, &property.id)
                .ok_or_else(|| MissingTranslation::Attribute(property.id.clone()))?;
            let values = lookup(&dicts.attribute_values, product_id)
                .ok_or_else(|| MissingTranslation::AttributeValues(product_id.to_string()))?;
            let value = lookup(values, &property.id).ok_or_else(|| {
                MissingTranslation::AttributeValue {
                    attribute: property.id.clone(),
                    product: product_id.to_string(),
                }
            })?;
            Ok(NamedValue {
                id: property.id.clone(),
                name: prop_name.clone(),
                value: value.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(AttributeGroup {
        id: group.id.clone(),
        name: name.clone(),
        properties,
    })
}

/// What: Translate a category record by its id.
///
/// Inputs:
/// - `category`: Source-language category
/// - `target_lang`: Language code written into the result
/// - `categories`: Target-language categories dictionary
///
/// Output:
/// - The translated category.
///
/// # Errors
/// - Returns `MissingTranslation::Category` when the id has no entry.
pub fn translate_category(
    category: &CategoryRecord,
    target_lang: &str,
    categories: &TermDictionary,
) -> Result<CategoryRecord, MissingTranslation> {
    let name = lookup(categories, &category.id)
        .ok_or_else(|| MissingTranslation::Category(category.id.clone()))?;
    Ok(CategoryRecord {
        lang: target_lang.to_string(),
        name: name.clone(),
        ..category.clone()
    })
}
