//! Length-prefixed block resolution.
//!
//! Every structure in a note file is reached the same way: an absolute byte
//! offset points at a little-endian length field, and the content is the run
//! of bytes immediately after it. Bitmap payloads can be large, so resolution
//! returns a borrowed view into the source buffer rather than a copy.

use crate::error::{Error, Result};
use crate::format::{ADDRESS_SIZE, LENGTH_FIELD_WIDTH};

/// Resolve the block at `offset` within `buffer`.
///
/// Returns `Ok(None)` for offset 0, which the format uses to mean "no
/// content". Otherwise reads `length_field_width` bytes at `offset` as an
/// unsigned little-endian length `n` and returns the `n` content bytes that
/// follow. The length field is trusted by the format but not by us: any read
/// that would pass the end of the buffer fails with [`Error::OutOfBounds`].
///
/// `length_field_width` must be 1..=8 bytes; anything else fails with
/// [`Error::UnsupportedLengthWidth`].
pub fn resolve(buffer: &[u8], offset: u64, length_field_width: usize) -> Result<Option<&[u8]>> {
    if length_field_width == 0 || length_field_width > 8 {
        return Err(Error::UnsupportedLengthWidth(length_field_width));
    }
    if offset == 0 {
        return Ok(None);
    }

    let offset = offset as usize;
    let content_start = offset
        .checked_add(length_field_width)
        .ok_or(Error::OutOfBounds {
            offset,
            needed: length_field_width,
            buffer_len: buffer.len(),
        })?;
    if content_start > buffer.len() {
        return Err(Error::OutOfBounds {
            offset,
            needed: length_field_width,
            buffer_len: buffer.len(),
        });
    }

    let len = read_le_uint(&buffer[offset..content_start]) as usize;
    let content_end = content_start.checked_add(len).ok_or(Error::OutOfBounds {
        offset,
        needed: length_field_width + len,
        buffer_len: buffer.len(),
    })?;
    if content_end > buffer.len() {
        return Err(Error::OutOfBounds {
            offset,
            needed: length_field_width + len,
            buffer_len: buffer.len(),
        });
    }

    Ok(Some(&buffer[content_start..content_end]))
}

/// Resolve a block with the format's standard length-field width.
pub fn resolve_standard(buffer: &[u8], offset: u64) -> Result<Option<&[u8]>> {
    resolve(buffer, offset, LENGTH_FIELD_WIDTH)
}

/// Read the footer address stored in the file's final [`ADDRESS_SIZE`] bytes.
pub fn trailing_address(buffer: &[u8]) -> Result<u64> {
    if buffer.len() < ADDRESS_SIZE {
        return Err(Error::OutOfBounds {
            offset: buffer.len().saturating_sub(ADDRESS_SIZE),
            needed: ADDRESS_SIZE,
            buffer_len: buffer.len(),
        });
    }
    Ok(read_le_uint(&buffer[buffer.len() - ADDRESS_SIZE..]))
}

/// Decode an unsigned little-endian integer of 1..=8 bytes.
fn read_le_uint(bytes: &[u8]) -> u64 {
    debug_assert!(!bytes.is_empty() && bytes.len() <= 8);
    bytes
        .iter()
        .rev()
        .fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
}
