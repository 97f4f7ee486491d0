//! Display-side derivations over a [`Collection`]: grouping by top-level key
//! and human-readable section labels. Nothing here is cached or persisted;
//! callers recompute from the collection whenever it changes.

use crate::{Collection, Entry, statics};
use indexmap::IndexMap;

/// A jump-to-section target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub key: String,
    pub label: String,
}

/// The first dot-delimited segment of `key`, or the whole key.
pub fn top_level_key(key: &str) -> &str {
    key.split_once(statics::KEY_SEPARATOR)
        .map_or(key, |(head, _)| head)
}

/// Groups entries by top-level key. Groups appear in first-seen order and
/// keep collection order internally.
pub fn group(collection: &Collection) -> IndexMap<&str, Vec<&Entry>> {
    let mut groups: IndexMap<&str, Vec<&Entry>> = IndexMap::new();
    for entry in collection {
        groups
            .entry(top_level_key(&entry.key))
            .or_default()
            .push(entry);
    }
    groups
}

/// Splits camelCase boundaries (lowercase then uppercase) with a space and
/// turns underscores into spaces.
pub fn labelize(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut prev: Option<char> = None;
    for ch in key.chars() {
        if ch.is_ascii_uppercase() && prev.is_some_and(|p| p.is_ascii_lowercase()) {
            out.push(' ');
        }
        out.push(if ch == '_' { ' ' } else { ch });
        prev = Some(ch);
    }
    out
}

/// Section targets in group order.
pub fn sections(collection: &Collection) -> Vec<Section> {
    group(collection)
        .keys()
        .map(|key| Section {
            key: key.to_string(),
            label: labelize(key),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{Section, group, labelize, sections, top_level_key};
    use crate::Collection;

    #[test]
    fn top_level_key_is_first_segment() {
        assert_eq!(top_level_key("a.b.c"), "a");
        assert_eq!(top_level_key("plain"), "plain");
        assert_eq!(top_level_key(".leading"), "");
    }

    #[test]
    fn labels() {
        assert_eq!(labelize("userName"), "user Name");
        assert_eq!(labelize("top_level_key"), "top level key");
        assert_eq!(labelize("plain"), "plain");
        assert_eq!(labelize("someHTTPThing"), "some HTTPThing");
        assert_eq!(labelize("mixed_caseKey"), "mixed case Key");
        assert_eq!(labelize("ABC"), "ABC");
    }

    #[test]
    fn underscore_before_uppercase_is_not_a_camel_boundary() {
        assert_eq!(labelize("a_B"), "a B");
    }

    #[test]
    fn groups_keep_first_seen_order_and_member_order() {
        let c = Collection::from_entries([
            ("b.one", "1"),
            ("a.one", "2"),
            ("b.two", "3"),
            ("c", "4"),
            ("a.two", "5"),
        ]);
        let groups = group(&c);

        let order: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(order, vec!["b", "a", "c"]);

        let b: Vec<&str> = groups["b"].iter().map(|e| e.key.as_str()).collect();
        assert_eq!(b, vec!["b.one", "b.two"]);
        let a: Vec<&str> = groups["a"].iter().map(|e| e.key.as_str()).collect();
        assert_eq!(a, vec!["a.one", "a.two"]);
        assert_eq!(groups["c"].len(), 1);
    }

    #[test]
    fn sections_follow_groups() {
        let c = Collection::from_entries([("userName.first", "x"), ("top_level", "y")]);
        assert_eq!(
            sections(&c),
            vec![
                Section {
                    key: "userName".to_string(),
                    label: "user Name".to_string(),
                },
                Section {
                    key: "top_level".to_string(),
                    label: "top level".to_string(),
                },
            ]
        );
    }

    #[test]
    fn empty_collection_has_no_groups() {
        let c = Collection::new();
        assert!(group(&c).is_empty());
        assert!(sections(&c).is_empty());
    }
}
