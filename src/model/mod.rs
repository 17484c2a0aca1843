//! Typed catalog records validated at the record-store boundary.

mod category;
mod product;

pub use category::CategoryRecord;
pub use product::{AttributeGroup, NamedValue, ProductRecord};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Entity kinds kept in the record store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Product records (`content/products/...`).
    Product,
    /// Category records (`content/categories/...`).
    Category,
}

impl EntityKind {
    /// Directory name under the content root.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Product => "products",
            Self::Category => "categories",
        }
    }

    /// Name used in progress session keys.
    #[must_use]
    pub const fn session_name(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Category => "category",
        }
    }
}

/// Common surface of records kept in the store.
pub trait Record: serde::Serialize + serde::de::DeserializeOwned {
    /// Kind used to pick the store directory.
    const KIND: EntityKind;

    /// Stable identifier.
    fn id(&self) -> &str;

    /// Language code of this copy.
    fn lang(&self) -> &str;

    /// File-name slug.
    fn slug(&self) -> &str;

    /// What: Check required fields.
    ///
    /// # Errors
    /// - Returns `Err(reason)` naming the first missing required field.
    fn validate(&self) -> Result<(), String>;
}

impl Record for ProductRecord {
    const KIND: EntityKind = EntityKind::Product;

    fn id(&self) -> &str {
        &self.id
    }

    fn lang(&self) -> &str {
        &self.lang
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn validate(&self) -> Result<(), String> {
        Self::validate(self)
    }
}

impl Record for CategoryRecord {
    const KIND: EntityKind = EntityKind::Category;

    fn id(&self) -> &str {
        &self.id
    }

    fn lang(&self) -> &str {
        &self.lang
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn validate(&self) -> Result<(), String> {
        Self::validate(self)
    }
}

/// What: Deserialize a scalar JSON field as text.
///
/// Inputs:
/// - `deserializer`: Serde deserializer positioned at the field
///
/// Output:
/// - The string itself, the decimal rendering of a number or bool, or `""` for `null`.
///
/// # Errors
/// - Returns `Err` when the field is an array or an object.
///
/// Details:
/// - Scraped feeds are not consistent about ids (`"123"` vs `123`) and
///   sometimes emit `null` for optional text such as `lead`.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other @ (Value::Array(_) | Value::Object(_)) => Err(serde::de::Error::custom(format!(
            "expected a string, found {other}"
        ))),
    }
}

/// What: Deserialize a list field, mapping `null` to an empty list.
///
/// Inputs:
/// - `deserializer`: Serde deserializer positioned at the field
///
/// Output:
/// - The decoded list, or an empty one for `null`.
///
/// # Errors
/// - Returns `Err` when the field is neither `null` nor a list of `T`.
pub(crate) fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// What: Report the first empty required field.
///
/// Inputs:
/// - `fields`: `(name, value)` pairs in check order
///
/// Output:
/// - `Err(reason)` naming the first empty field, `Ok(())` otherwise.
pub(crate) fn require(fields: &[(&str, &str)]) -> Result<(), String> {
    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(format!("missing required field `{name}`"));
        }
    }
    Ok(())
}

/// What: Report the first field that cannot be used as a single path segment.
///
/// Inputs:
/// - `fields`: `(name, value)` pairs in check order
///
/// Output:
/// - `Err(reason)` for a value containing `/`, `\` or NUL, or equal to `.` or
///   `..`; `Ok(())` otherwise.
pub(crate) fn path_safe(fields: &[(&str, &str)]) -> Result<(), String> {
    for (name, value) in fields {
        let bad = matches!(*value, "." | "..") || value.contains(['/', '\\', '\0']);
        if bad {
            return Err(format!("field `{name}` is not a valid file name: {value:?}"));
        }
    }
    Ok(())
}

