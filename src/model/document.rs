//! Document-level types.

use super::{Cover, Keyword, Page, Title};
use crate::format::DEFAULT_HEADER_OFFSET;
use crate::parser::{GroupedTags, TagMap, TagValue};
use serde::{Deserialize, Serialize};

/// A fully decoded note file.
///
/// Constructed in one pass from a single source buffer and read-only
/// thereafter; the document exclusively owns every nested entity, including
/// all raw bitmap payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// The full 24-byte file signature, e.g. `noteSN_FILE_VER_20230101`.
    pub signature: String,

    /// Format version digits from the signature.
    pub version: String,

    /// Header metadata fields.
    pub header: Header,

    /// Footer address table, grouped by namespace.
    pub footer: Footer,

    /// Pages in footer order.
    pub pages: Vec<Page>,

    /// Cover bitmap, when the footer carries a positive cover address.
    pub cover: Option<Cover>,

    /// Recognized keywords, grouped by footer category in footer order.
    pub keywords: Vec<(String, Vec<Keyword>)>,

    /// Recognized titles, grouped by footer category in footer order.
    pub titles: Vec<(String, Vec<Title>)>,
}

impl Document {
    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&Page> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Keywords for one category, if present.
    pub fn keywords_in(&self, category: &str) -> Option<&[Keyword]> {
        self.keywords
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, ks)| ks.as_slice())
    }

    /// Titles for one category, if present.
    pub fn titles_in(&self, category: &str) -> Option<&[Title]> {
        self.titles
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, ts)| ts.as_slice())
    }

    /// Total number of keywords across all categories.
    pub fn keyword_count(&self) -> usize {
        self.keywords.iter().map(|(_, ks)| ks.len()).sum()
    }

    /// Total number of titles across all categories.
    pub fn title_count(&self) -> usize {
        self.titles.iter().map(|(_, ts)| ts.len()).sum()
    }
}

/// Header metadata.
///
/// Every field is a string taken from the header block's tagged text; fields
/// absent from the block keep the default `"0"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Header {
    /// Module label (`MODULE_LABEL`).
    pub module_label: String,
    /// File type, e.g. `NOTE` (`FILE_TYPE`).
    pub file_type: String,
    /// Device model the file was written on (`APPLY_EQUIPMENT`).
    pub apply_equipment: String,
    /// Page of the last editing operation (`FINALOPERATION_PAGE`).
    pub final_operation_page: String,
    /// Layer of the last editing operation (`FINALOPERATION_LAYER`).
    pub final_operation_layer: String,
    /// Original style name (`ORIGINAL_STYLE`).
    pub original_style: String,
    /// Original style content hash (`ORIGINAL_STYLEMD5`).
    pub original_style_md5: String,
    /// Device DPI (`DEVICE_DPI`).
    pub device_dpi: String,
    /// Software DPI (`SOFT_DPI`).
    pub soft_dpi: String,
    /// File parse type (`FILE_PARSE_TYPE`).
    pub file_parse_type: String,
    /// Recognition engine marker (`RATTA_ETMD`).
    pub ratta_etmd: String,
    /// Writing application version (`APP_VERSION`).
    pub app_version: String,
}

impl Header {
    /// Build a header from extracted tags: start from the defaults, then
    /// overwrite only the fields actually present.
    pub fn from_tags(tags: &TagMap) -> Self {
        let mut header = Header::default();
        let Header {
            module_label,
            file_type,
            apply_equipment,
            final_operation_page,
            final_operation_layer,
            original_style,
            original_style_md5,
            device_dpi,
            soft_dpi,
            file_parse_type,
            ratta_etmd,
            app_version,
        } = &mut header;

        let fields: [(&str, &mut String); 12] = [
            ("MODULE_LABEL", module_label),
            ("FILE_TYPE", file_type),
            ("APPLY_EQUIPMENT", apply_equipment),
            ("FINALOPERATION_PAGE", final_operation_page),
            ("FINALOPERATION_LAYER", final_operation_layer),
            ("ORIGINAL_STYLE", original_style),
            ("ORIGINAL_STYLEMD5", original_style_md5),
            ("DEVICE_DPI", device_dpi),
            ("SOFT_DPI", soft_dpi),
            ("FILE_PARSE_TYPE", file_parse_type),
            ("RATTA_ETMD", ratta_etmd),
            ("APP_VERSION", app_version),
        ];
        for (key, field) in fields {
            if let Some(value) = tags.get_single(key) {
                *field = value.to_string();
            }
        }

        header
    }
}

impl Default for Header {
    fn default() -> Self {
        let zero = || "0".to_string();
        Self {
            module_label: zero(),
            file_type: zero(),
            apply_equipment: zero(),
            final_operation_page: zero(),
            final_operation_layer: zero(),
            original_style: zero(),
            original_style_md5: zero(),
            device_dpi: zero(),
            soft_dpi: zero(),
            file_parse_type: zero(),
            ratta_etmd: zero(),
            app_version: zero(),
        }
    }
}

/// The footer's address table.
///
/// The footer is one flat tagged-text namespace grouped into FILE, COVER,
/// KEYWORD, TITLE, STYLE, and PAGE sections. Both views are kept: the flat
/// map retains keys (and list values) that grouping drops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Footer {
    /// The flat extracted tag map.
    pub tags: TagMap,
    /// The grouped view, merged over the default skeleton.
    pub groups: GroupedTags,
}

/// Groups guaranteed present in every footer, in skeleton order.
const FOOTER_GROUPS: [&str; 6] = ["FILE", "COVER", "KEYWORD", "TITLE", "STYLE", "PAGE"];

impl Footer {
    /// Build a footer from its flat tag map: group with delimiter `_` and
    /// known prefix `PAGE`, then lay the result over the default skeleton
    /// (extracted values always win over defaults).
    pub fn from_tags(tags: TagMap) -> Self {
        let extracted = crate::parser::group(&tags, '_', &["PAGE"]);

        let mut groups = GroupedTags::new();
        for name in FOOTER_GROUPS {
            groups.ensure_group(name);
        }
        for (group_name, sub) in extracted.iter() {
            for (key, value) in sub.iter() {
                for v in value.values() {
                    groups.insert(group_name, key, v.clone());
                }
            }
        }
        if groups.get_or_empty("FILE").get("FEATURE").is_none() {
            groups.insert("FILE", "FEATURE", "24");
        }
        if groups.get_or_empty("COVER").get("0").is_none() {
            groups.insert("COVER", "0", "0");
        }

        Self { tags, groups }
    }

    /// A footer group by name; empty if the file declares nothing for it.
    pub fn group(&self, name: &str) -> &TagMap {
        self.groups.get_or_empty(name)
    }

    /// Offset of the header block: `FILE.FEATURE` when parseable, else the
    /// fixed default of 24.
    pub fn header_address(&self) -> u64 {
        self.group("FILE")
            .get_single("FEATURE")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_HEADER_OFFSET)
    }

    /// Offset of the cover bitmap. The extracted `COVER_0` value is
    /// authoritative whenever the footer carries it; `COVER_1` is consulted
    /// only when `COVER_0` is absent. Zero (or a non-numeric value) means no
    /// cover.
    pub fn cover_address(&self) -> u64 {
        self.tags
            .get_single("COVER_0")
            .or_else(|| self.tags.get_single("COVER_1"))
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    /// Page keys and offsets, sorted by key.
    ///
    /// Keys sort as plain strings, so `PAGE10` orders before `PAGE2`; this
    /// matches the established ordering for documents with ten or more
    /// pages.
    pub fn page_addresses(&self) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self
            .group("PAGE")
            .iter()
            .map(|(key, value)| {
                let addr = value
                    .as_single()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(0);
                (key.to_string(), addr)
            })
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Categories and their offset values from the KEYWORD group.
    pub fn keyword_categories(&self) -> impl Iterator<Item = (&str, &TagValue)> {
        self.group("KEYWORD").iter()
    }

    /// Categories and their offset values from the TITLE group.
    pub fn title_categories(&self) -> impl Iterator<Item = (&str, &TagValue)> {
        self.group("TITLE").iter()
    }
}

impl Default for Footer {
    fn default() -> Self {
        Self::from_tags(TagMap::new())
    }
}
