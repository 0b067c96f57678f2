//! Note-file parsing module.

pub mod block;
mod grouper;
mod layer_info;
mod note_parser;
mod options;
mod tagged_text;

pub use grouper::{group, GroupedTags};
pub use layer_info::parse_layers;
pub use note_parser::NoteParser;
pub use options::ParseOptions;
pub use tagged_text::{extract, TagMap, TagValue};
