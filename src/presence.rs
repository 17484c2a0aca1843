//! Explicit "present vs missing" semantics for dictionary values.
//!
//! Dictionaries are merged first-write-wins. A key whose current value is not
//! [`Presence::is_present`] counts as missing and may be filled in.

use std::collections::BTreeMap;

/// What: Decide whether a stored dictionary value counts as filled in.
///
/// Details:
/// - Strings are present only when non-empty; `""` is treated as a gap that a
///   later build or sync pass may fill.
/// - Description lists and per-product attribute-value maps are present as soon
///   as the key exists, even when empty.
pub trait Presence {
    /// Whether this value occupies its key.
    fn is_present(&self) -> bool;
}

impl Presence for String {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for Vec<String> {
    fn is_present(&self) -> bool {
        true
    }
}

impl Presence for BTreeMap<String, String> {
    fn is_present(&self) -> bool {
        true
    }
}

/// What: Look up `key` and return the value only when it is present.
///
/// Inputs:
/// - `map`: Dictionary to search
/// - `key`: Key to look up
///
/// Output:
/// - `Some(&V)` when the key exists and its value is present, `None` otherwise.
#[must_use]
pub fn lookup<'a, V: Presence>(map: &'a BTreeMap<String, V>, key: &str) -> Option<&'a V> {
    map.get(key).filter(|v| v.is_present())
}

/// What: Insert `value` under `key` unless the key already holds a present value.
///
/// Inputs:
/// - `map`: Accumulator dictionary
/// - `key`: Key to fill
/// - `value`: Candidate value
///
/// Output:
/// - `true` when the value was written, `false` when the existing value won.
///
/// Details:
/// - First write wins; later candidates for the same key are dropped silently.
pub fn insert_if_absent<V: Presence>(map: &mut BTreeMap<String, V>, key: &str, value: V) -> bool {
    if lookup(map, key).is_some() {
        return false;
    }
    map.insert(key.to_string(), value);
    true
}
