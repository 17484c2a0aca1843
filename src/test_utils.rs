//! Test utilities for common test setup.
//!
//! Shared fixtures for the translator and pipeline unit tests.

#[cfg(test)]
use std::collections::BTreeMap;

#[cfg(test)]
use crate::dictionary::DictionarySet;
#[cfg(test)]
use crate::model::{AttributeGroup, NamedValue, ProductRecord};

#[cfg(test)]
/// What: Provide the English `p1` knife used across translator tests.
///
/// Inputs: None
///
/// Output: Product with one group (`g1`), one property (`a1 = v1`), no variants.
pub fn knife() -> ProductRecord {
    ProductRecord {
        id: "p1".into(),
        lang: "en".into(),
        slug: "hunter".into(),
        name: "Hunter".into(),
        category_slug: "knives".into(),
        category_name: "Knives".into(),
        lead: "Sharp.".into(),
        description: vec!["d1".into()],
        attribute_groups: vec![AttributeGroup {
            id: "g1".into(),
            name: "Blade".into(),
            properties: vec![NamedValue {
                id: "a1".into(),
                name: "Length".into(),
                value: "v1".into(),
            }],
        }],
        ..ProductRecord::default()
    }
}

#[cfg(test)]
/// What: Provide Polish dictionaries that fully cover `knife()`.
///
/// Inputs: None
///
/// Output: Dictionary set with every lookup `knife()` needs, plus variant `v1`.
pub fn full_pl() -> DictionarySet {
    DictionarySet {
        attribute_groups: BTreeMap::from([("g1".into(), "Ostrze".into())]),
        attributes: BTreeMap::from([("a1".into(), "Długość".into())]),
        variants: BTreeMap::from([("v1".into(), "Kolor".into())]),
        descriptions: BTreeMap::from([("p1".into(), vec!["o1".into(), "o2".into()])]),
        categories: BTreeMap::from([("knives".into(), "Noże".into())]),
        attribute_values: BTreeMap::from([(
            "p1".into(),
            BTreeMap::from([("a1".into(), "w1".into())]),
        )]),
    }
}
