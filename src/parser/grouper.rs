//! Key grouping for flat tag namespaces.
//!
//! The footer stores everything in one flat namespace: `FILE_FEATURE`,
//! `COVER_0`, `KEYWORD_xxx`, `PAGE1`, ... Grouping splits each key into a
//! (group, sub-key) pair, first by delimiter and then by prefix matching for
//! keys like `PAGE1` that carry no delimiter.

use super::tagged_text::{TagMap, TagValue};
use serde::{Deserialize, Serialize};

/// A two-level, insertion-ordered mapping: group -> sub-key -> value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedTags {
    groups: Vec<(String, TagMap)>,
}

impl GroupedTags {
    /// Create an empty grouped map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a group by name.
    pub fn get(&self, group: &str) -> Option<&TagMap> {
        self.groups
            .iter()
            .find(|(g, _)| g == group)
            .map(|(_, m)| m)
    }

    /// The named group, or an empty map if it does not exist.
    pub fn get_or_empty(&self, group: &str) -> &TagMap {
        static EMPTY: TagMap = TagMap::new_const();
        self.get(group).unwrap_or(&EMPTY)
    }

    /// Insert a value under (group, sub-key), creating the group on first use.
    pub fn insert(
        &mut self,
        group: impl Into<String>,
        sub_key: impl Into<String>,
        value: impl Into<String>,
    ) {
        let group = group.into();
        match self.groups.iter_mut().find(|(g, _)| *g == group) {
            Some((_, map)) => map.insert(sub_key, value),
            None => {
                let mut map = TagMap::new();
                map.insert(sub_key, value);
                self.groups.push((group, map));
            }
        }
    }

    /// Ensure a (possibly empty) group exists, preserving insertion order.
    pub fn ensure_group(&mut self, group: impl Into<String>) {
        let group = group.into();
        if self.get(&group).is_none() {
            self.groups.push((group, TagMap::new()));
        }
    }

    /// Iterate groups in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagMap)> {
        self.groups.iter().map(|(g, m)| (g.as_str(), m))
    }
}

/// Split a flat tag map into a two-level grouped map.
///
/// Only scalar entries participate; list-valued entries are skipped and
/// remain reachable through the flat map. For each key, a delimiter split at
/// the first occurrence wins; failing that, the first matching prefix from
/// `known_prefixes` (in caller order) becomes the group and the remainder the
/// sub-key. Keys matching neither rule are dropped.
pub fn group(flat: &TagMap, delimiter: char, known_prefixes: &[&str]) -> GroupedTags {
    let mut grouped = GroupedTags::new();

    for (key, value) in flat.iter() {
        let TagValue::Single(value) = value else {
            continue;
        };

        if let Some((group_name, sub_key)) = key.split_once(delimiter) {
            grouped.insert(group_name, sub_key, value.clone());
            continue;
        }

        if let Some(prefix) = known_prefixes.iter().find(|p| key.starts_with(*p)) {
            grouped.insert(*prefix, &key[prefix.len()..], value.clone());
        }
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tagged_text::extract;

    #[test]
    fn test_group_by_delimiter() {
        let mut flat = TagMap::new();
        flat.insert("STYLE_NAME", "x");
        let grouped = group(&flat, '_', &[]);
        assert_eq!(
            grouped.get("STYLE").unwrap().get_single("NAME"),
            Some("x")
        );
    }

    #[test]
    fn test_group_by_prefix() {
        let mut flat = TagMap::new();
        flat.insert("PAGE1", "10");
        flat.insert("PAGE2", "20");
        let grouped = group(&flat, '_', &["PAGE"]);
        let page = grouped.get("PAGE").unwrap();
        assert_eq!(page.get_single("1"), Some("10"));
        assert_eq!(page.get_single("2"), Some("20"));
    }

    #[test]
    fn test_group_delimiter_splits_at_first_occurrence() {
        let mut flat = TagMap::new();
        flat.insert("FILE_PARSE_TYPE", "0");
        let grouped = group(&flat, '_', &[]);
        assert_eq!(
            grouped.get("FILE").unwrap().get_single("PARSE_TYPE"),
            Some("0")
        );
    }

    #[test]
    fn test_group_drops_unmatched_keys() {
        let mut flat = TagMap::new();
        flat.insert("ORPHAN", "1");
        let grouped = group(&flat, '_', &["PAGE"]);
        assert!(grouped.iter().next().is_none());
    }

    #[test]
    fn test_group_skips_list_values() {
        let flat = extract("<KEYWORD_A:1><KEYWORD_A:2><KEYWORD_B:3>");
        let grouped = group(&flat, '_', &[]);
        let keyword = grouped.get("KEYWORD").unwrap();
        assert_eq!(keyword.get("A"), None);
        assert_eq!(keyword.get_single("B"), Some("3"));
    }

    #[test]
    fn test_group_prefix_order_first_match_wins() {
        let mut flat = TagMap::new();
        flat.insert("PAGEX", "1");
        let grouped = group(&flat, '_', &["PAGEX", "PAGE"]);
        assert_eq!(grouped.get("PAGEX").unwrap().get_single(""), Some("1"));
        assert!(grouped.get("PAGE").is_none());
    }

    #[test]
    fn test_groups_accumulate_in_discovery_order() {
        let flat = extract("<COVER_0:0><FILE_FEATURE:24><COVER_1:5>");
        let grouped = group(&flat, '_', &[]);
        let names: Vec<&str> = grouped.iter().map(|(g, _)| g).collect();
        assert_eq!(names, vec!["COVER", "FILE"]);
        assert_eq!(grouped.get("COVER").unwrap().len(), 2);
    }
}
