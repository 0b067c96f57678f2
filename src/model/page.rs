//! Page-level types.

use crate::format::LayerName;
use serde::{Deserialize, Serialize};

/// A single page in the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed, in footer order).
    pub number: u32,

    /// Page style name (`PAGESTYLE`).
    pub style: String,

    /// Page style content hash (`PAGESTYLEMD5`).
    pub style_md5: String,

    /// Thumbnail type marker (`THUMBNAILTYPE`).
    pub thumbnail_type: String,

    /// Handwriting recognition status (`RECOGNSTATUS`).
    pub recogn_status: String,

    /// The five fixed layer slots.
    pub layers: Layers,

    /// Per-layer display metadata, one record per declared layer.
    pub layer_info: Vec<LayerInfo>,

    /// Layer names in paint order (`LAYERSEQ`).
    pub layer_seq: Vec<String>,

    /// Raw vector path data (`TOTALPATH`), undecoded.
    #[serde(skip_serializing, default)]
    pub total_path: Option<Vec<u8>>,
}

impl Page {
    /// Layer slot for a given name.
    pub fn layer(&self, name: LayerName) -> &Layer {
        self.layers.get(name)
    }

    /// Paint order resolved to layer names; tokens that are not one of the
    /// five fixed names are skipped.
    pub fn paint_order(&self) -> impl Iterator<Item = LayerName> + '_ {
        self.layer_seq
            .iter()
            .filter_map(|token| LayerName::from_token(token))
    }

    /// Whether any layer slot carries a bitmap payload.
    pub fn has_content(&self) -> bool {
        self.layers.iter().any(|(_, layer)| layer.bitmap.is_some())
    }
}

/// The five fixed layer slots of a page, indexed by [`LayerName`].
///
/// Every page always has all five slots; a layer absent from the file sits
/// in its slot as a placeholder record with defaults and no bitmap.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Layers {
    slots: [Layer; 5],
}

impl Layers {
    /// Build from one layer per slot, in [`LayerName::ALL`] order.
    pub fn from_slots(slots: [Layer; 5]) -> Self {
        Self { slots }
    }

    /// The layer in a named slot.
    pub fn get(&self, name: LayerName) -> &Layer {
        &self.slots[name.index()]
    }

    /// Iterate all five slots in order.
    pub fn iter(&self) -> impl Iterator<Item = (LayerName, &Layer)> {
        LayerName::ALL.iter().map(|&name| (name, self.get(name)))
    }
}

/// One named ink/drawing plane within a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    /// Layer type (`LAYERTYPE`).
    pub layer_type: String,

    /// Bitmap encoding protocol (`LAYERPROTOCOL`).
    pub protocol: String,

    /// Layer name (`LAYERNAME`).
    pub name: String,

    /// Layer path field (`LAYERPATH`).
    pub path: String,

    /// Raw bitmap payload (`LAYERBITMAP`), undecoded RLE bytes.
    #[serde(skip_serializing, default)]
    pub bitmap: Option<Vec<u8>>,
}

impl Default for Layer {
    fn default() -> Self {
        Self {
            layer_type: "NOTE".to_string(),
            protocol: "RATTA_RLE".to_string(),
            name: "MAINLAYER".to_string(),
            path: "0".to_string(),
            bitmap: None,
        }
    }
}

impl Layer {
    /// Whether this slot is a placeholder with no stored content.
    pub fn is_placeholder(&self) -> bool {
        self.bitmap.is_none()
    }
}

/// Per-layer display and visibility metadata, parsed from the page's
/// LAYERINFO grammar. Matched to a [`Layer`] by name/position, not identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerInfo {
    /// Numeric layer id.
    pub layer_id: u32,
    /// Display name.
    pub name: String,
    /// Whether this is the background layer.
    pub is_background_layer: bool,
    /// Whether content may be added to this layer.
    pub is_allow_add: bool,
    /// Whether this is the currently selected layer.
    pub is_current_layer: bool,
    /// Whether the layer is visible.
    pub is_visible: bool,
    /// Whether the layer is deleted.
    pub is_deleted: bool,
    /// Whether the layer may move up in paint order.
    pub is_allow_up: bool,
    /// Whether the layer may move down in paint order.
    pub is_allow_down: bool,
}

impl Default for LayerInfo {
    fn default() -> Self {
        Self {
            layer_id: 0,
            name: "Main layer".to_string(),
            is_background_layer: false,
            is_allow_add: false,
            is_current_layer: false,
            is_visible: false,
            is_deleted: false,
            is_allow_up: false,
            is_allow_down: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_page() -> Page {
        Page {
            number: 1,
            style: "style_white".to_string(),
            style_md5: "0".to_string(),
            thumbnail_type: "0".to_string(),
            recogn_status: "0".to_string(),
            layers: Layers::default(),
            layer_info: Vec::new(),
            layer_seq: vec!["MAINLAYER".to_string(), "BGLAYER".to_string()],
            total_path: None,
        }
    }

    #[test]
    fn test_all_five_slots_always_present() {
        let page = empty_page();
        assert_eq!(page.layers.iter().count(), 5);
        for (_, layer) in page.layers.iter() {
            assert!(layer.is_placeholder());
        }
    }

    #[test]
    fn test_paint_order_skips_unknown_tokens() {
        let mut page = empty_page();
        page.layer_seq.push("MYSTERY".to_string());
        let order: Vec<LayerName> = page.paint_order().collect();
        assert_eq!(order, vec![LayerName::Main, LayerName::Background]);
    }

    #[test]
    fn test_layer_defaults() {
        let layer = Layer::default();
        assert_eq!(layer.layer_type, "NOTE");
        assert_eq!(layer.protocol, "RATTA_RLE");
        assert_eq!(layer.name, "MAINLAYER");
        assert!(layer.is_placeholder());
    }

    #[test]
    fn test_has_content() {
        let mut page = empty_page();
        assert!(!page.has_content());
        let mut slots: [Layer; 5] = Default::default();
        slots[0].bitmap = Some(vec![1, 2, 3]);
        page.layers = Layers::from_slots(slots);
        assert!(page.has_content());
    }
}
