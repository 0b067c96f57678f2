//! Layer-info grammar parsing.
//!
//! A page's LAYERINFO block uses a denser embedded grammar than tagged text:
//! a sequence of brace-delimited groups, each holding `"key"#value` pairs.
//! Values may be quoted or bare; bare values end at `"`, `[`, `{`, `}`, `]`,
//! or `,`. One [`LayerInfo`] record is produced per group.
//!
//! Unlike tagged text, this grammar is strict: once the outer braces have
//! matched, an interior that cannot be tokenized means the file is corrupt
//! and the whole decode aborts.

use crate::error::{Error, Result};
use crate::model::LayerInfo;

const VALUE_TERMINATORS: &[char] = &['"', '[', '{', '}', ']', ','];

/// Parse a LAYERINFO text into one record per brace group.
pub fn parse_layers(text: &str) -> Result<Vec<LayerInfo>> {
    let mut layers = Vec::new();
    let mut rest = text;
    let mut group_index = 0;

    while let Some(open) = rest.find('{') {
        let interior_start = open + 1;
        let close_rel = rest[interior_start..]
            .find('}')
            .ok_or_else(|| Error::MalformedLayerInfo {
                group: group_index,
                detail: "unclosed brace group".to_string(),
            })?;
        let interior = &rest[interior_start..interior_start + close_rel];

        layers.push(parse_group(interior, group_index)?);
        group_index += 1;
        rest = &rest[interior_start + close_rel + 1..];
    }

    Ok(layers)
}

/// Parse one group interior into a [`LayerInfo`], applying defaults for
/// fields the group does not mention.
fn parse_group(interior: &str, group_index: usize) -> Result<LayerInfo> {
    let mut info = LayerInfo::default();

    for (key, value) in pairs(interior, group_index)? {
        match key.as_str() {
            "layerId" => info.layer_id = value.parse().unwrap_or(0),
            "name" => info.name = value,
            "isBackgroundLayer" => info.is_background_layer = is_true(&value),
            "isAllowAdd" => info.is_allow_add = is_true(&value),
            "isCurrentLayer" => info.is_current_layer = is_true(&value),
            "isVisible" => info.is_visible = is_true(&value),
            "isDeleted" => info.is_deleted = is_true(&value),
            "isAllowUp" => info.is_allow_up = is_true(&value),
            "isAllowDown" => info.is_allow_down = is_true(&value),
            // Unknown keys are ignored; newer firmware adds fields freely
            _ => {}
        }
    }

    Ok(info)
}

/// A boolean field is true iff its raw value is exactly "true".
fn is_true(value: &str) -> bool {
    value == "true"
}

/// Tokenize a group interior into `(key, value)` pairs.
///
/// Grammar per pair: `"key"#value` where value is either `"..."` or a bare
/// run ending at a terminator character. Pairs are separated by `,` and
/// whitespace. Any other shape is a fatal corrupt-file condition.
fn pairs(interior: &str, group_index: usize) -> Result<Vec<(String, String)>> {
    let mut out = Vec::new();
    let mut chars = interior.char_indices().peekable();

    loop {
        // Skip separators between pairs
        while let Some(&(_, c)) = chars.peek() {
            if c == ',' || c.is_whitespace() {
                chars.next();
            } else {
                break;
            }
        }
        let Some(&(start, c)) = chars.peek() else {
            break;
        };
        if c != '"' {
            return Err(Error::MalformedLayerInfo {
                group: group_index,
                detail: format!("expected '\"' to open a key, found {:?}", c),
            });
        }
        chars.next();

        let key_end = interior[start + 1..]
            .find('"')
            .ok_or_else(|| Error::MalformedLayerInfo {
                group: group_index,
                detail: "unterminated key".to_string(),
            })?;
        let key = interior[start + 1..start + 1 + key_end].to_string();
        // Consume up to and including the closing quote
        while let Some((i, _)) = chars.next() {
            if i == start + 1 + key_end {
                break;
            }
        }

        match chars.next() {
            Some((_, '#')) => {}
            other => {
                return Err(Error::MalformedLayerInfo {
                    group: group_index,
                    detail: format!(
                        "expected '#' after key {:?}, found {:?}",
                        key,
                        other.map(|(_, c)| c)
                    ),
                });
            }
        }

        let value = match chars.peek() {
            Some(&(vstart, '"')) => {
                chars.next();
                let vend = interior[vstart + 1..].find('"').ok_or_else(|| {
                    Error::MalformedLayerInfo {
                        group: group_index,
                        detail: format!("unterminated value for key {:?}", key),
                    }
                })?;
                let value = interior[vstart + 1..vstart + 1 + vend].to_string();
                while let Some((i, _)) = chars.next() {
                    if i == vstart + 1 + vend {
                        break;
                    }
                }
                value
            }
            Some(&(vstart, _)) => {
                let mut vend = interior.len();
                while let Some(&(i, c)) = chars.peek() {
                    if VALUE_TERMINATORS.contains(&c) {
                        vend = i;
                        break;
                    }
                    chars.next();
                }
                interior[vstart..vend].trim().to_string()
            }
            None => {
                return Err(Error::MalformedLayerInfo {
                    group: group_index,
                    detail: format!("missing value for key {:?}", key),
                });
            }
        };

        out.push((key, value));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_group_quoted_values() {
        let layers =
            parse_layers(r##"{"layerId"#"1","name"#"Background","isVisible"#"true"}"##).unwrap();
        assert_eq!(layers.len(), 1);
        let layer = &layers[0];
        assert_eq!(layer.layer_id, 1);
        assert_eq!(layer.name, "Background");
        assert!(layer.is_visible);
        assert!(!layer.is_background_layer);
        assert!(!layer.is_allow_add);
        assert!(!layer.is_current_layer);
        assert!(!layer.is_deleted);
        assert!(!layer.is_allow_up);
        assert!(!layer.is_allow_down);
    }

    #[test]
    fn test_parse_bare_values() {
        let layers = parse_layers(r##"{"layerId"#3,"isVisible"#true,"isDeleted"#false}"##).unwrap();
        assert_eq!(layers[0].layer_id, 3);
        assert!(layers[0].is_visible);
        assert!(!layers[0].is_deleted);
    }

    #[test]
    fn test_parse_multiple_groups_in_order() {
        let text = r##"[{"layerId"#0,"name"#"Main layer"},{"layerId"#1,"name"#"Layer 1"}]"##;
        let layers = parse_layers(text).unwrap();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].name, "Main layer");
        assert_eq!(layers[1].name, "Layer 1");
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let layers = parse_layers("{}").unwrap();
        let layer = &layers[0];
        assert_eq!(layer.layer_id, 0);
        assert_eq!(layer.name, "Main layer");
        assert!(!layer.is_visible);
    }

    #[test]
    fn test_empty_text_yields_no_layers() {
        assert!(parse_layers("").unwrap().is_empty());
    }

    #[test]
    fn test_boolean_requires_exact_literal() {
        let layers = parse_layers(r##"{"isVisible"#"True"}"##).unwrap();
        assert!(!layers[0].is_visible);
        let layers = parse_layers(r##"{"isVisible"#"1"}"##).unwrap();
        assert!(!layers[0].is_visible);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let layers = parse_layers(r##"{"futureField"#"x","layerId"#"2"}"##).unwrap();
        assert_eq!(layers[0].layer_id, 2);
    }

    #[test]
    fn test_malformed_interior_is_fatal() {
        let result = parse_layers(r#"{layerId#"1"}"#);
        assert!(matches!(result, Err(Error::MalformedLayerInfo { .. })));
    }

    #[test]
    fn test_unclosed_group_is_fatal() {
        let result = parse_layers(r##"{"layerId"#"1""##);
        assert!(matches!(result, Err(Error::MalformedLayerInfo { .. })));
    }

    #[test]
    fn test_missing_hash_is_fatal() {
        let result = parse_layers(r#"{"layerId":"1"}"#);
        assert!(matches!(result, Err(Error::MalformedLayerInfo { .. })));
    }
}
