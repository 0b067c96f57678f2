//! Fixed binary-layout constants for the note-file format.
//!
//! All integers in the format are unsigned little-endian. Most structures are
//! reached through absolute byte offsets: a "block" at offset `O` is a
//! [`LENGTH_FIELD_WIDTH`]-byte length `n` followed by `n` content bytes, and
//! the last [`ADDRESS_SIZE`] bytes of the file hold the footer block's own
//! offset. These values are fixed per format variant and are not call-time
//! configurable.

use serde::{Deserialize, Serialize};

/// Signature prefix at the very start of the file.
pub const SIGNATURE_PREFIX: &[u8] = b"noteSN_FILE_VER_";

/// Number of digits following the signature prefix (a YYYYMMDD version).
pub const SIGNATURE_VERSION_DIGITS: usize = 8;

/// Total signature length: prefix plus version digits.
pub const SIGNATURE_LEN: usize = 24;

/// Width in bytes of the trailing footer address.
pub const ADDRESS_SIZE: usize = 4;

/// Width in bytes of a block's length prefix.
pub const LENGTH_FIELD_WIDTH: usize = 4;

/// Default header block offset when the footer carries no FILE.FEATURE.
pub const DEFAULT_HEADER_OFFSET: u64 = 24;

/// Page width in pixels for this format variant.
pub const PAGE_WIDTH: u32 = 1404;

/// Page height in pixels for this format variant.
pub const PAGE_HEIGHT: u32 = 1872;

/// The five fixed layer identities every page carries.
///
/// Absent layers still occupy their slot as placeholder records, so code
/// indexing by `LayerName` never deals with a missing slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LayerName {
    /// The main ink layer (`MAINLAYER`).
    Main,
    /// Extra layer 1 (`LAYER1`).
    Layer1,
    /// Extra layer 2 (`LAYER2`).
    Layer2,
    /// Extra layer 3 (`LAYER3`).
    Layer3,
    /// The background/template layer (`BGLAYER`).
    Background,
}

impl LayerName {
    /// All five layer names in slot order.
    pub const ALL: [LayerName; 5] = [
        LayerName::Main,
        LayerName::Layer1,
        LayerName::Layer2,
        LayerName::Layer3,
        LayerName::Background,
    ];

    /// The tag key used for this layer in page metadata and LAYERSEQ.
    pub fn token(&self) -> &'static str {
        match self {
            LayerName::Main => "MAINLAYER",
            LayerName::Layer1 => "LAYER1",
            LayerName::Layer2 => "LAYER2",
            LayerName::Layer3 => "LAYER3",
            LayerName::Background => "BGLAYER",
        }
    }

    /// Look up a layer name from its tag token.
    pub fn from_token(token: &str) -> Option<LayerName> {
        match token {
            "MAINLAYER" => Some(LayerName::Main),
            "LAYER1" => Some(LayerName::Layer1),
            "LAYER2" => Some(LayerName::Layer2),
            "LAYER3" => Some(LayerName::Layer3),
            "BGLAYER" => Some(LayerName::Background),
            _ => None,
        }
    }

    /// Slot index of this layer within a page's fixed layer array.
    pub fn index(&self) -> usize {
        match self {
            LayerName::Main => 0,
            LayerName::Layer1 => 1,
            LayerName::Layer2 => 2,
            LayerName::Layer3 => 3,
            LayerName::Background => 4,
        }
    }
}

impl std::fmt::Display for LayerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_lengths_agree() {
        assert_eq!(
            SIGNATURE_PREFIX.len() + SIGNATURE_VERSION_DIGITS,
            SIGNATURE_LEN
        );
    }

    #[test]
    fn test_layer_name_token_round_trip() {
        for name in LayerName::ALL {
            assert_eq!(LayerName::from_token(name.token()), Some(name));
        }
        assert_eq!(LayerName::from_token("NOPE"), None);
    }

    #[test]
    fn test_layer_name_index_matches_slot_order() {
        for (i, name) in LayerName::ALL.iter().enumerate() {
            assert_eq!(name.index(), i);
        }
    }
}
