//! Category record shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{path_safe, require, text};

/// A category in one language. Dictionary lookups use `id`, never `slug`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// Stable identifier shared by all language copies.
    #[serde(deserialize_with = "text")]
    pub id: String,
    /// Language code of this copy.
    #[serde(default, deserialize_with = "text")]
    pub lang: String,
    /// Manufacturer slug.
    #[serde(default, deserialize_with = "text")]
    pub manufacturer: String,
    /// Localized display name.
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    /// File-name slug.
    #[serde(deserialize_with = "text")]
    pub slug: String,
    /// Fields not interpreted by the pipeline.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CategoryRecord {
    /// What: Check the fields every stage relies on.
    ///
    /// # Errors
    /// - Returns `Err` naming the first empty field among `id`, `slug`, `lang`,
    ///   or a `slug`/`lang` that is not a plain file name.
    pub fn validate(&self) -> Result<(), String> {
        require(&[("id", &self.id), ("slug", &self.slug), ("lang", &self.lang)])?;
        path_safe(&[("slug", &self.slug), ("lang", &self.lang)])
    }
}
