//! Product record shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{list, path_safe, require, text};

/// One `{id, name, value}` entry: an attribute property, a variant, or an extra datum.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedValue {
    /// Language-invariant id used as the dictionary key.
    #[serde(default, deserialize_with = "text")]
    pub id: String,
    /// Localized display name.
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    /// Localized value.
    #[serde(default, deserialize_with = "text")]
    pub value: String,
}

/// A named group of attribute properties.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeGroup {
    /// Language-invariant group id.
    #[serde(default, deserialize_with = "text")]
    pub id: String,
    /// Localized group name.
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    /// Properties in display order.
    #[serde(default, deserialize_with = "list")]
    pub properties: Vec<NamedValue>,
}

/// What: A product in one language.
///
/// Details:
/// - `id` and `category_slug` are language-invariant; every human-readable
///   field is a per-language copy.
/// - Fields the pipeline does not interpret are kept in `extra` and written
///   back unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Stable identifier shared by all language copies.
    #[serde(deserialize_with = "text")]
    pub id: String,
    /// Language code of this copy.
    #[serde(default, deserialize_with = "text")]
    pub lang: String,
    /// Source page URL.
    #[serde(default, deserialize_with = "text")]
    pub url: String,
    /// Manufacturer slug.
    #[serde(default, deserialize_with = "text")]
    pub manufacturer: String,
    /// Category slug; also the key into the categories dictionary.
    #[serde(default, deserialize_with = "text")]
    pub category_slug: String,
    /// Localized category name.
    #[serde(default, deserialize_with = "text")]
    pub category_name: String,
    /// Full product name.
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    /// Short product name.
    #[serde(default, deserialize_with = "text")]
    pub name_short: String,
    /// File-name slug.
    #[serde(deserialize_with = "text")]
    pub slug: String,
    /// Model name.
    #[serde(default, deserialize_with = "text")]
    pub model_name: String,
    /// Lead paragraph.
    #[serde(default, deserialize_with = "text")]
    pub lead: String,
    /// Description paragraphs in order.
    #[serde(default, deserialize_with = "list")]
    pub description: Vec<String>,
    /// Attribute groups in display order.
    #[serde(default, deserialize_with = "list")]
    pub attribute_groups: Vec<AttributeGroup>,
    /// Variants in display order.
    #[serde(default, deserialize_with = "list")]
    pub variants: Vec<NamedValue>,
    /// Extra data in display order.
    #[serde(default, deserialize_with = "list")]
    pub extra_data: Vec<NamedValue>,
    /// Image references.
    #[serde(default, deserialize_with = "list")]
    pub images: Vec<String>,
    /// Fields not interpreted by the pipeline.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProductRecord {
    /// What: Check the fields every stage relies on.
    ///
    /// Output:
    /// - `Err(reason)` naming the first missing required field.
    ///
    /// # Errors
    /// - Returns `Err` when `id`, `slug`, or `lang` is empty, or when `slug` or
    ///   `lang` is not a plain file name.
    pub fn validate(&self) -> Result<(), String> {
        require(&[("id", &self.id), ("slug", &self.slug), ("lang", &self.lang)])?;
        path_safe(&[("slug", &self.slug), ("lang", &self.lang)])
    }

    /// Label for console output: the name when known, else the id.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}
