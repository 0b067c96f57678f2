//! Cover, keyword, and title types.
//!
//! Keywords and titles are indexed, positioned annotations over page
//! content. Each entry may carry a raw bitmap snippet; the bytes are kept
//! exactly as stored, undecoded.

use serde::{Deserialize, Serialize};

/// The document cover bitmap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cover {
    /// Absolute offset of the cover block in the source file.
    pub address: u64,

    /// Raw cover bitmap bytes.
    #[serde(skip_serializing, default)]
    pub bitmap: Vec<u8>,
}

/// A recognized keyword annotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keyword {
    /// The keyword text (`KEYWORD`).
    pub keyword: String,

    /// Sequence number within the document (`KEYWORDSEQNO`).
    pub seq_no: String,

    /// Page the keyword belongs to (`KEYWORDPAGE`).
    pub page: String,

    /// Bounding rectangle as stored: x, y, width, height (`KEYWORDRECT`).
    pub rect: [String; 4],

    /// Original-orientation rectangle (`KEYWORDRECTORI`).
    pub rect_ori: [String; 4],

    /// Raw bitmap snippet (`KEYWORDSITE`), undecoded.
    #[serde(skip_serializing, default)]
    pub bitmap: Option<Vec<u8>>,
}

impl Default for Keyword {
    fn default() -> Self {
        Self {
            keyword: "0".to_string(),
            seq_no: "0".to_string(),
            page: "0".to_string(),
            rect: zero_rect(),
            rect_ori: zero_rect(),
            bitmap: None,
        }
    }
}

/// A recognized title annotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Title {
    /// Sequence number within the document (`TITLESEQNO`).
    pub seq_no: String,

    /// Outline nesting level (`TITLELEVEL`).
    pub level: String,

    /// Title style name (`TITLESTYLE`).
    pub style: String,

    /// Bounding rectangle as stored: x, y, width, height (`TITLERECT`).
    pub rect: [String; 4],

    /// Original-orientation rectangle (`TITLERECTORI`).
    pub rect_ori: [String; 4],

    /// Raw bitmap snippet (`TITLEBITMAP`), undecoded.
    #[serde(skip_serializing, default)]
    pub bitmap: Option<Vec<u8>>,
}

impl Default for Title {
    fn default() -> Self {
        Self {
            seq_no: "0".to_string(),
            level: "0".to_string(),
            style: "0".to_string(),
            rect: zero_rect(),
            rect_ori: zero_rect(),
            bitmap: None,
        }
    }
}

/// The default rectangle: four "0" strings.
pub(crate) fn zero_rect() -> [String; 4] {
    ["0".to_string(), "0".to_string(), "0".to_string(), "0".to_string()]
}

/// Parse a stored `x,y,w,h` rectangle value, padding missing components
/// with "0".
pub(crate) fn parse_rect(value: &str) -> [String; 4] {
    let mut rect = zero_rect();
    for (slot, part) in rect.iter_mut().zip(value.split(',')) {
        let part = part.trim();
        if !part.is_empty() {
            *slot = part.to_string();
        }
    }
    rect
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_defaults() {
        let keyword = Keyword::default();
        assert_eq!(keyword.seq_no, "0");
        assert_eq!(keyword.rect, zero_rect());
        assert!(keyword.bitmap.is_none());
    }

    #[test]
    fn test_parse_rect_full() {
        let rect = parse_rect("10,20,300,40");
        assert_eq!(rect, ["10", "20", "300", "40"].map(String::from));
    }

    #[test]
    fn test_parse_rect_partial_pads_with_zero() {
        let rect = parse_rect("10,20");
        assert_eq!(rect, ["10", "20", "0", "0"].map(String::from));
    }

    #[test]
    fn test_parse_rect_extra_components_ignored() {
        let rect = parse_rect("1,2,3,4,5,6");
        assert_eq!(rect, ["1", "2", "3", "4"].map(String::from));
    }

    #[test]
    fn test_parse_rect_empty() {
        assert_eq!(parse_rect(""), zero_rect());
    }
}
