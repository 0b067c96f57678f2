//! Note document parser.
//!
//! Decoding runs as a staged pipeline: Signature -> Footer -> Header ->
//! {Pages, Cover, Keywords, Titles}. Each stage produces an immutable value
//! and the [`Document`] is assembled once, only after every stage has
//! succeeded, so callers never observe a partially decoded document. The
//! four final stages depend only on the footer and the source buffer, which
//! is what makes parallel page decoding safe.

use rayon::prelude::*;

use crate::detect::detect_format_from_bytes;
use crate::error::Result;
use crate::format::{LayerName, SIGNATURE_LEN};
use crate::model::{
    parse_rect, Cover, Document, Footer, Header, Keyword, Layer, Layers, Page, Title,
};

use super::block;
use super::layer_info;
use super::options::ParseOptions;
use super::tagged_text::{self, TagMap, TagValue};

/// Note document parser over a single immutable source buffer.
///
/// Each decode call is independent and re-entrant: nothing here mutates the
/// input, and all derived structures are newly allocated per call.
pub struct NoteParser<'a> {
    data: &'a [u8],
    options: ParseOptions,
}

impl<'a> NoteParser<'a> {
    /// Create a parser over a note-file buffer.
    ///
    /// The signature is validated up front so an obviously foreign buffer
    /// fails fast; the remaining structure is validated during [`parse`].
    ///
    /// [`parse`]: NoteParser::parse
    pub fn from_bytes(data: &'a [u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Create a parser with custom options.
    pub fn from_bytes_with_options(data: &'a [u8], options: ParseOptions) -> Result<Self> {
        detect_format_from_bytes(data)?;
        Ok(Self { data, options })
    }

    /// Decode the full document.
    ///
    /// All-or-nothing: any signature, bounds, or grammar failure aborts with
    /// no partial result.
    pub fn parse(&self) -> Result<Document> {
        let format = detect_format_from_bytes(self.data)?;
        let signature = String::from_utf8_lossy(&self.data[..SIGNATURE_LEN]).into_owned();
        log::debug!("decoding note file, format version {}", format.version);

        let footer = self.parse_footer()?;
        let header = self.parse_header(&footer)?;
        let pages = self.parse_pages(&footer)?;
        let cover = self.parse_cover(&footer)?;
        let keywords = self.parse_keywords(&footer)?;
        let titles = self.parse_titles(&footer)?;

        log::debug!(
            "decoded {} pages, {} keyword categories, {} title categories",
            pages.len(),
            keywords.len(),
            titles.len()
        );

        Ok(Document {
            signature,
            version: format.version,
            header,
            footer,
            pages,
            cover,
            keywords,
            titles,
        })
    }

    /// Resolve a block and extract its tagged text; absent blocks yield an
    /// empty map so callers fall through to defaults.
    fn tags_at(&self, offset: u64) -> Result<TagMap> {
        match block::resolve_standard(self.data, offset)? {
            Some(content) => Ok(tagged_text::extract(&String::from_utf8_lossy(content))),
            None => Ok(TagMap::new()),
        }
    }

    /// Resolve a block named by a tag value holding an offset.
    ///
    /// Missing tags and zero offsets both mean "no content".
    fn raw_at(&self, tags: &TagMap, key: &str) -> Result<Option<Vec<u8>>> {
        let offset = tags
            .get_single(key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        Ok(block::resolve_standard(self.data, offset)?.map(<[u8]>::to_vec))
    }

    /// Footer stage: follow the trailing address, extract, group, and merge
    /// over the default skeleton.
    fn parse_footer(&self) -> Result<Footer> {
        let address = block::trailing_address(self.data)?;
        let tags = self.tags_at(address)?;
        Ok(Footer::from_tags(tags))
    }

    /// Header stage: block at `FILE.FEATURE` (default 24), merged over the
    /// header defaults.
    fn parse_header(&self, footer: &Footer) -> Result<Header> {
        let tags = self.tags_at(footer.header_address())?;
        Ok(Header::from_tags(&tags))
    }

    /// Pages stage: one page per footer PAGE key, in string-sorted key
    /// order, optionally decoded in parallel.
    fn parse_pages(&self, footer: &Footer) -> Result<Vec<Page>> {
        let entries = footer.page_addresses();

        if self.options.parallel && entries.len() > 1 {
            entries
                .par_iter()
                .enumerate()
                .map(|(i, (_, address))| self.parse_page(i as u32 + 1, *address))
                .collect()
        } else {
            entries
                .iter()
                .enumerate()
                .map(|(i, (_, address))| self.parse_page(i as u32 + 1, *address))
                .collect()
        }
    }

    /// Decode one page: metadata over defaults, the five layer slots, the
    /// embedded layer-info and layer-sequence lists, and the raw path data.
    fn parse_page(&self, number: u32, address: u64) -> Result<Page> {
        let tags = self.tags_at(address)?;

        let mut slots: [Layer; 5] = Default::default();
        for name in LayerName::ALL {
            let offset = tags
                .get_single(name.token())
                .and_then(|v| v.parse().ok())
                .unwrap_or(0);
            slots[name.index()] = self.parse_layer(offset)?;
        }

        let layer_info = match tags.get_single("LAYERINFO") {
            Some(text) => layer_info::parse_layers(text)?,
            None => Vec::new(),
        };

        let layer_seq = tags
            .get_single("LAYERSEQ")
            .unwrap_or("MAINLAYER,LAYER1,LAYER2,LAYER3,BGLAYER")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let total_path = self.raw_at(&tags, "TOTALPATH")?;

        Ok(Page {
            number,
            style: single_or(&tags, "PAGESTYLE", "style_white"),
            style_md5: single_or(&tags, "PAGESTYLEMD5", "0"),
            thumbnail_type: single_or(&tags, "THUMBNAILTYPE", "0"),
            recogn_status: single_or(&tags, "RECOGNSTATUS", "0"),
            layers: Layers::from_slots(slots),
            layer_info,
            layer_seq,
            total_path,
        })
    }

    /// Decode one layer slot. A zero offset yields the placeholder layer.
    fn parse_layer(&self, offset: u64) -> Result<Layer> {
        let tags = self.tags_at(offset)?;

        let mut layer = Layer::default();
        apply(&tags, "LAYERTYPE", &mut layer.layer_type);
        apply(&tags, "LAYERPROTOCOL", &mut layer.protocol);
        apply(&tags, "LAYERNAME", &mut layer.name);
        apply(&tags, "LAYERPATH", &mut layer.path);
        layer.bitmap = self.raw_at(&tags, "LAYERBITMAP")?;
        Ok(layer)
    }

    /// Cover stage: a positive cover address resolves to the raw cover
    /// bitmap; anything else means no cover.
    fn parse_cover(&self, footer: &Footer) -> Result<Option<Cover>> {
        let address = footer.cover_address();
        if address == 0 {
            return Ok(None);
        }
        Ok(block::resolve_standard(self.data, address)?.map(|content| Cover {
            address,
            bitmap: content.to_vec(),
        }))
    }

    /// Keywords stage: one entry per offset in each footer KEYWORD category,
    /// preserving footer order within the category.
    fn parse_keywords(&self, footer: &Footer) -> Result<Vec<(String, Vec<Keyword>)>> {
        let mut keywords = Vec::new();
        for (category, value) in footer.keyword_categories() {
            let entries = entry_addresses(value);
            let mut decoded = Vec::with_capacity(entries.len());
            for address in entries {
                decoded.push(self.parse_keyword(address)?);
            }
            keywords.push((category.to_string(), decoded));
        }
        Ok(keywords)
    }

    fn parse_keyword(&self, address: u64) -> Result<Keyword> {
        let tags = self.tags_at(address)?;

        let mut keyword = Keyword::default();
        apply(&tags, "KEYWORD", &mut keyword.keyword);
        apply(&tags, "KEYWORDSEQNO", &mut keyword.seq_no);
        apply(&tags, "KEYWORDPAGE", &mut keyword.page);
        apply_rect(&tags, "KEYWORDRECT", &mut keyword.rect);
        apply_rect(&tags, "KEYWORDRECTORI", &mut keyword.rect_ori);
        keyword.bitmap = self.raw_at(&tags, "KEYWORDSITE")?;
        Ok(keyword)
    }

    /// Titles stage: mirrors the keywords stage over the TITLE group.
    fn parse_titles(&self, footer: &Footer) -> Result<Vec<(String, Vec<Title>)>> {
        let mut titles = Vec::new();
        for (category, value) in footer.title_categories() {
            let entries = entry_addresses(value);
            let mut decoded = Vec::with_capacity(entries.len());
            for address in entries {
                decoded.push(self.parse_title(address)?);
            }
            titles.push((category.to_string(), decoded));
        }
        Ok(titles)
    }

    fn parse_title(&self, address: u64) -> Result<Title> {
        let tags = self.tags_at(address)?;

        let mut title = Title::default();
        apply(&tags, "TITLESEQNO", &mut title.seq_no);
        apply(&tags, "TITLELEVEL", &mut title.level);
        apply(&tags, "TITLESTYLE", &mut title.style);
        apply_rect(&tags, "TITLERECT", &mut title.rect);
        apply_rect(&tags, "TITLERECTORI", &mut title.rect_ori);
        title.bitmap = self.raw_at(&tags, "TITLEBITMAP")?;
        Ok(title)
    }
}

/// Addresses held by a category value (single offset or ordered list).
fn entry_addresses(value: &TagValue) -> Vec<u64> {
    value
        .values()
        .iter()
        .map(|v| v.parse().unwrap_or(0))
        .filter(|&addr| addr > 0)
        .collect()
}

/// Scalar tag value, or the documented default when absent.
fn single_or(tags: &TagMap, key: &str, default: &str) -> String {
    tags.get_single(key).unwrap_or(default).to_string()
}

/// Overwrite `field` only when the tag is actually present.
fn apply(tags: &TagMap, key: &str, field: &mut String) {
    if let Some(value) = tags.get_single(key) {
        *field = value.to_string();
    }
}

/// Overwrite a rectangle field only when the tag is actually present.
fn apply_rect(tags: &TagMap, key: &str, field: &mut [String; 4]) {
    if let Some(value) = tags.get_single(key) {
        *field = parse_rect(value);
    }
}
