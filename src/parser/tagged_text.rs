//! Tagged-text extraction.
//!
//! Decoded blocks carry their metadata as runs of `<KEY:VALUE>` pairs. The
//! scanner below collects every well-formed pair in document order into an
//! ordered map; repeated keys accumulate into an ordered list. Keys and
//! values may not contain `<`, `>`, or `:`, and anything that fails to match
//! is skipped rather than reported — a missing key is the normal "no value"
//! case and callers fill in defaults.

use serde::{Deserialize, Serialize};

/// Value of a tag key: a single string or an ordered list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    /// The key occurred exactly once.
    Single(String),
    /// The key occurred multiple times; values in document order.
    Many(Vec<String>),
}

impl TagValue {
    /// The value if this key occurred exactly once.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            TagValue::Single(v) => Some(v),
            TagValue::Many(_) => None,
        }
    }

    /// All values in document order, regardless of arity.
    pub fn values(&self) -> &[String] {
        match self {
            TagValue::Single(v) => std::slice::from_ref(v),
            TagValue::Many(vs) => vs,
        }
    }

    fn push(&mut self, value: String) {
        match self {
            TagValue::Single(first) => {
                let first = std::mem::take(first);
                *self = TagValue::Many(vec![first, value]);
            }
            TagValue::Many(vs) => vs.push(value),
        }
    }
}

/// An insertion-ordered map from tag key to [`TagValue`].
///
/// Blocks are small, so lookups scan linearly; what matters is that
/// iteration preserves the order keys first appeared in the text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagMap {
    entries: Vec<(String, TagValue)>,
}

impl TagMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Const-context empty map, for use as a shared static fallback.
    pub(crate) const fn new_const() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Look up a key.
    pub fn get(&self, key: &str) -> Option<&TagValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Look up a key that occurred exactly once.
    pub fn get_single(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(TagValue::as_single)
    }

    /// Insert a value, accumulating repeats into an ordered list.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => existing.push(value),
            None => self.entries.push((key, TagValue::Single(value))),
        }
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Extract all `<KEY:VALUE>` pairs from `text` in document order.
///
/// The scanner is deliberately forgiving about surrounding bytes: content
/// between or inside malformed brackets is skipped, matching the non-
/// overlapping left-to-right semantics of the format.
pub fn extract(text: &str) -> TagMap {
    let mut tags = TagMap::new();
    let bytes = text.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'<' {
            pos += 1;
            continue;
        }
        match scan_pair(bytes, pos) {
            Some((key, value, end)) => {
                tags.insert(key, value);
                pos = end;
            }
            // Not a well-formed pair; resume after this '<'
            None => pos += 1,
        }
    }

    tags
}

/// Try to match `<KEY:VALUE>` starting at the `<` at `start`.
///
/// Returns the key, value, and the position just past the closing `>`.
fn scan_pair(bytes: &[u8], start: usize) -> Option<(String, String, usize)> {
    let key_start = start + 1;
    let colon = scan_run(bytes, key_start)?;
    if bytes.get(colon) != Some(&b':') {
        return None;
    }
    let value_start = colon + 1;
    let close = scan_run(bytes, value_start)?;
    if bytes.get(close) != Some(&b'>') {
        return None;
    }
    if colon == key_start {
        // Empty keys are not part of the grammar
        return None;
    }

    let key = String::from_utf8_lossy(&bytes[key_start..colon]).into_owned();
    let value = String::from_utf8_lossy(&bytes[value_start..close]).into_owned();
    Some((key, value, close + 1))
}

/// Advance from `start` over bytes allowed inside a key or value, stopping
/// at the first `<`, `>`, or `:` (or end of input).
fn scan_run(bytes: &[u8], start: usize) -> Option<usize> {
    let mut pos = start;
    while pos < bytes.len() {
        match bytes[pos] {
            b'<' | b'>' | b':' => return Some(pos),
            _ => pos += 1,
        }
    }
    None
}
