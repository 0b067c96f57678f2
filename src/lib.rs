//! # unnote
//!
//! Decoder for the address-indexed binary note-file format produced by
//! e-ink writing devices.
//!
//! The format stores most data as absolute byte offsets into the file.
//! Decoding repeatedly resolves an offset to a length-prefixed block,
//! interprets the block's bytes as tagged `<KEY:VALUE>` text, and follows
//! offsets found inside that text to reach nested structures
//! (page -> layer -> bitmap). The result is an immutable [`Document`]:
//! signature, header, footer, ordered pages with five fixed layer slots,
//! an optional cover, and keyword/title indexes.
//!
//! Bitmap payloads are carried as raw, undecoded bytes; RLE decompression
//! and rendering are a consumer's concern.
//!
//! ## Quick Start
//!
//! ```no_run
//! fn main() -> unnote::Result<()> {
//!     let doc = unnote::parse_file("notebook.note")?;
//!
//!     println!("format version {}", doc.version);
//!     for page in &doc.pages {
//!         println!("page {}: style {}", page.number, page.style);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Guarantees
//!
//! - Decoding is all-or-nothing: either a fully populated [`Document`] or a
//!   fatal error; no partial document is ever observable.
//! - Absent data (a zero offset, a missing tag) is not an error; every such
//!   field falls back to a documented default.
//! - Decoding never mutates the input; concurrent decodes of the same or
//!   different buffers are independent.

pub mod detect;
pub mod error;
pub mod format;
pub mod model;
pub mod parser;

// Re-export commonly used types
pub use detect::{
    detect_format_from_bytes, detect_format_from_path, is_note, is_note_bytes, NoteFormat,
};
pub use error::{Error, Result};
pub use format::LayerName;
pub use model::{Cover, Document, Footer, Header, Keyword, Layer, LayerInfo, Layers, Page, Title};
pub use parser::{NoteParser, ParseOptions};

use std::io::Read;
use std::path::Path;

/// Parse a note file and return a structured document.
///
/// # Example
///
/// ```no_run
/// let doc = unnote::parse_file("notebook.note").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let data = std::fs::read(path)?;
    parse_bytes(&data)
}

/// Parse a note file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let data = std::fs::read(path)?;
    parse_bytes_with_options(&data, options)
}

/// Parse a note document from bytes.
///
/// # Example
///
/// ```no_run
/// let data = std::fs::read("notebook.note").unwrap();
/// let doc = unnote::parse_bytes(&data).unwrap();
/// ```
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    NoteParser::from_bytes(data)?.parse()
}

/// Parse a note document from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Document> {
    NoteParser::from_bytes_with_options(data, options)?.parse()
}

/// Parse a note document from a reader.
///
/// # Example
///
/// ```no_run
/// use std::fs::File;
///
/// let file = File::open("notebook.note").unwrap();
/// let doc = unnote::parse_reader(file).unwrap();
/// ```
pub fn parse_reader<R: Read>(mut reader: R) -> Result<Document> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    parse_bytes(&data)
}

/// Parse a note document from a reader with custom options.
pub fn parse_reader_with_options<R: Read>(
    mut reader: R,
    options: ParseOptions,
) -> Result<Document> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    parse_bytes_with_options(&data, options)
}
