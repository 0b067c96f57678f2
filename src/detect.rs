//! Note-file signature detection and validation.

use crate::error::{Error, Result};
use crate::format::{SIGNATURE_LEN, SIGNATURE_PREFIX, SIGNATURE_VERSION_DIGITS};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Note-file format information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFormat {
    /// Format version digits from the signature (e.g., "20230101").
    pub version: String,
}

impl std::fmt::Display for NoteFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "note file ver. {}", self.version)
    }
}

/// Detect the note-file format from a file path.
///
/// # Arguments
/// * `path` - Path to the note file
///
/// # Returns
/// * `Ok(NoteFormat)` if the file carries a valid signature
/// * `Err(Error::SignatureMismatch)` otherwise
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<NoteFormat> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut signature = [0u8; SIGNATURE_LEN];
    reader.read_exact(&mut signature)?;
    detect_format_from_bytes(&signature)
}

/// Detect the note-file format from bytes.
///
/// The first 24 bytes must read `noteSN_FILE_VER_` followed by exactly
/// 8 ASCII digits. Anything else is a signature mismatch and the decode
/// must not proceed.
///
/// # Arguments
/// * `data` - Byte slice containing at least the first 24 bytes of the file
pub fn detect_format_from_bytes(data: &[u8]) -> Result<NoteFormat> {
    if data.len() < SIGNATURE_LEN {
        return Err(Error::SignatureMismatch(
            String::from_utf8_lossy(data).into_owned(),
        ));
    }

    let signature = &data[..SIGNATURE_LEN];
    if !signature.starts_with(SIGNATURE_PREFIX) {
        return Err(Error::SignatureMismatch(
            String::from_utf8_lossy(signature).into_owned(),
        ));
    }

    let version_bytes = &signature[SIGNATURE_PREFIX.len()..];
    if version_bytes.len() != SIGNATURE_VERSION_DIGITS
        || !version_bytes.iter().all(u8::is_ascii_digit)
    {
        return Err(Error::SignatureMismatch(
            String::from_utf8_lossy(signature).into_owned(),
        ));
    }

    Ok(NoteFormat {
        // All-digit ASCII, safe to decode losslessly
        version: String::from_utf8_lossy(version_bytes).into_owned(),
    })
}

/// Check if a file is a valid note file.
pub fn is_note<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes start with a valid note-file signature.
pub fn is_note_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_valid_signature() {
        let data = b"noteSN_FILE_VER_20230101<FILE_TYPE:NOTE>";
        let format = detect_format_from_bytes(data).unwrap();
        assert_eq!(format.version, "20230101");
        assert_eq!(format.to_string(), "note file ver. 20230101");
    }

    #[test]
    fn test_detect_wrong_prefix() {
        let data = b"noteSN_FILE_VAR_20230101";
        let result = detect_format_from_bytes(data);
        assert!(matches!(result, Err(Error::SignatureMismatch(_))));
    }

    #[test]
    fn test_detect_missing_digits() {
        let data = b"noteSN_FILE_VER_2023ABCD";
        let result = detect_format_from_bytes(data);
        assert!(matches!(result, Err(Error::SignatureMismatch(_))));
    }

    #[test]
    fn test_detect_too_short() {
        let data = b"noteSN_FILE_VER_";
        let result = detect_format_from_bytes(data);
        assert!(matches!(result, Err(Error::SignatureMismatch(_))));
    }

    #[test]
    fn test_is_note_bytes() {
        assert!(is_note_bytes(b"noteSN_FILE_VER_19991231 trailing"));
        assert!(!is_note_bytes(b"Not a note file"));
        assert!(!is_note_bytes(b""));
    }
}
