//! Error types for the unnote library.

use std::io;
use thiserror::Error;

/// Result type alias for unnote operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while decoding a note file.
///
/// Decoding is all-or-nothing: every variant here is fatal and aborts the
/// decode with no partial document. Absent data (a zero offset or a missing
/// tag) is not an error; it resolves to documented defaults instead.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading the input file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The first 24 bytes do not match the note-file signature.
    #[error("Signature mismatch: expected \"noteSN_FILE_VER_\" followed by 8 digits, got {0:?}")]
    SignatureMismatch(String),

    /// A block length-field width outside the supported 1..=8 byte range.
    #[error("Unsupported length-field width: {0} bytes (expected 1..=8)")]
    UnsupportedLengthWidth(usize),

    /// A resolved offset/length pair would read past the end of the buffer.
    #[error("Out of bounds: block at offset {offset} needs {needed} bytes, buffer has {buffer_len}")]
    OutOfBounds {
        /// Offset of the block's length field.
        offset: usize,
        /// Bytes required to read the length field plus content.
        needed: usize,
        /// Total size of the input buffer.
        buffer_len: usize,
    },

    /// A layer-info group matched the outer brace grammar but its interior
    /// could not be tokenized as `"key"#value` pairs.
    #[error("Malformed layer info in group {group}: {detail}")]
    MalformedLayerInfo {
        /// Zero-based index of the offending brace group.
        group: usize,
        /// What the tokenizer was unable to match.
        detail: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::OutOfBounds {
            offset: 100,
            needed: 32,
            buffer_len: 64,
        };
        assert_eq!(
            err.to_string(),
            "Out of bounds: block at offset 100 needs 32 bytes, buffer has 64"
        );

        let err = Error::SignatureMismatch("garbage".to_string());
        assert!(err.to_string().contains("noteSN_FILE_VER_"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
