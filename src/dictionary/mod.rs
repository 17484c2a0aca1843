//! Term dictionaries: per (manufacturer, language) id → localized value maps.
//!
//! Six kinds are persisted independently, one JSON file each. Maps are
//! `BTreeMap`s so keys serialize sorted at every depth.

pub mod build;
pub mod persist;
pub mod sync;

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;

/// id → localized name.
pub type TermDictionary = BTreeMap<String, String>;
/// product id → localized description paragraphs.
pub type DescriptionsDictionary = BTreeMap<String, Vec<String>>;
/// product id → (attribute id → localized value).
pub type AttributeValuesDictionary = BTreeMap<String, BTreeMap<String, String>>;

/// The six dictionary kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DictionaryKind {
    /// Attribute group id → name.
    AttributeGroups,
    /// Attribute (property) id → name.
    Attributes,
    /// Variant id → name.
    Variants,
    /// Product id → description paragraphs.
    Descriptions,
    /// Category id → name.
    Categories,
    /// Product id → attribute id → value.
    AttributeValues,
}

impl DictionaryKind {
    /// Every kind, in the order they are built and synchronized.
    pub const ALL: [Self; 6] = [
        Self::AttributeGroups,
        Self::Attributes,
        Self::Variants,
        Self::Descriptions,
        Self::Categories,
        Self::AttributeValues,
    ];

    /// File name inside a dictionary directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::AttributeGroups => "attribute-groups.json",
            Self::Attributes => "attributes.json",
            Self::Variants => "variants.json",
            Self::Descriptions => "descriptions.json",
            Self::Categories => "categories.json",
            Self::AttributeValues => "attribute-values.json",
        }
    }
}

/// All six dictionaries of one (manufacturer, language).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DictionarySet {
    /// Attribute group names.
    pub attribute_groups: TermDictionary,
    /// Attribute names.
    pub attributes: TermDictionary,
    /// Variant names.
    pub variants: TermDictionary,
    /// Description paragraphs per product.
    pub descriptions: DescriptionsDictionary,
    /// Category names.
    pub categories: TermDictionary,
    /// Attribute values per product.
    pub attribute_values: AttributeValuesDictionary,
}

impl DictionarySet {
    /// What: Load a complete set, failing on the first missing file.
    ///
    /// Inputs:
    /// - `dir`: Dictionary directory
    ///
    /// Output:
    /// - Every dictionary decoded.
    ///
    /// # Errors
    /// - Returns `DictionaryMissing` naming the first absent file.
    /// - Returns `Err` on unreadable or malformed files.
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(Self {
            attribute_groups: persist::load_required(dir, DictionaryKind::AttributeGroups)?,
            attributes: persist::load_required(dir, DictionaryKind::Attributes)?,
            variants: persist::load_required(dir, DictionaryKind::Variants)?,
            descriptions: persist::load_required(dir, DictionaryKind::Descriptions)?,
            categories: persist::load_required(dir, DictionaryKind::Categories)?,
            attribute_values: persist::load_required(dir, DictionaryKind::AttributeValues)?,
        })
    }

    /// What: Load whatever exists, using empty maps for absent files.
    ///
    /// # Errors
    /// - Returns `Err` on unreadable or malformed files.
    pub fn load_existing(dir: &Path) -> Result<Self> {
        Ok(Self {
            attribute_groups: persist::load_or_default(dir, DictionaryKind::AttributeGroups)?,
            attributes: persist::load_or_default(dir, DictionaryKind::Attributes)?,
            variants: persist::load_or_default(dir, DictionaryKind::Variants)?,
            descriptions: persist::load_or_default(dir, DictionaryKind::Descriptions)?,
            categories: persist::load_or_default(dir, DictionaryKind::Categories)?,
            attribute_values: persist::load_or_default(dir, DictionaryKind::AttributeValues)?,
        })
    }

    /// What: Write all six files into `dir`.
    ///
    /// # Errors
    /// - Returns `Err` when a file cannot be written.
    pub fn save(&self, dir: &Path) -> Result<()> {
        persist::save(dir, DictionaryKind::AttributeGroups, &self.attribute_groups)?;
        persist::save(dir, DictionaryKind::Attributes, &self.attributes)?;
        persist::save(dir, DictionaryKind::Variants, &self.variants)?;
        persist::save(dir, DictionaryKind::Descriptions, &self.descriptions)?;
        persist::save(dir, DictionaryKind::Categories, &self.categories)?;
        persist::save(dir, DictionaryKind::AttributeValues, &self.attribute_values)?;
        Ok(())
    }
}

/// What: List the dictionary files absent from `dir`.
///
/// Inputs:
/// - `dir`: Dictionary directory
///
/// Output:
/// - File names of missing kinds in `DictionaryKind::ALL` order.
#[must_use]
pub fn missing_files(dir: &Path) -> Vec<&'static str> {
    DictionaryKind::ALL
        .iter()
        .map(|k| k.file_name())
        .filter(|name| !dir.join(name).is_file())
        .collect()
}
