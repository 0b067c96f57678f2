//! Document model types for decoded note files.
//!
//! This module defines the in-memory representation produced by decoding:
//! the document with its header and footer, pages with their five fixed
//! layer slots, and the cover/keyword/title annotations. The model is
//! constructed once by the parser and is read-only afterwards.

mod annotation;
mod document;
mod page;

pub use annotation::{Cover, Keyword, Title};
pub(crate) use annotation::parse_rect;
pub use document::{Document, Footer, Header};
pub use page::{Layer, LayerInfo, Layers, Page};
