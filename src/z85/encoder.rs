// Raw Z85 encoding: 4-byte groups to 5-character groups.

use crate::error::Z85Error;

use super::alphabet::{ALPHABET, BYTES_PER_GROUP, CHARS_PER_GROUP, RADIX};

// ---------------------------------------------------------------------------
// Sizes
// ---------------------------------------------------------------------------

/// Encoded length of `n` raw bytes. Only meaningful when `n` is a multiple of 4.
#[inline]
pub fn encoded_len(n: usize) -> usize {
    n / BYTES_PER_GROUP * CHARS_PER_GROUP
}

// ---------------------------------------------------------------------------
// Group transform
// ---------------------------------------------------------------------------

/// Encode one big-endian 32-bit group, most significant digit first.
#[inline]
pub fn encode_group(mut value: u32) -> [u8; CHARS_PER_GROUP] {
    let mut chars = [0u8; CHARS_PER_GROUP];
    for c in chars.iter_mut().rev() {
        *c = ALPHABET[(value % RADIX) as usize];
        value /= RADIX;
    }
    chars
}

/// Append the encoding of `data` to `out`. `data.len()` must already be
/// known to be a multiple of 4; a trailing partial group is ignored.
pub(crate) fn encode_groups(data: &[u8], out: &mut Vec<u8>) {
    debug_assert!(data.len().is_multiple_of(BYTES_PER_GROUP));
    out.reserve(encoded_len(data.len()));
    for chunk in data.chunks_exact(BYTES_PER_GROUP) {
        let value = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        out.extend_from_slice(&encode_group(value));
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Encode `data` as Z85 text.
///
/// `data.len()` must be a multiple of 4. Empty input yields an empty string.
pub fn encode(data: &[u8]) -> Result<String, Z85Error> {
    let mut out = String::new();
    encode_into(data, &mut out)?;
    Ok(out)
}

/// Encode `data`, appending the text to `out`.
///
/// On error `out` is left untouched.
pub fn encode_into(data: &[u8], out: &mut String) -> Result<(), Z85Error> {
    check_len(data.len())?;
    out.reserve(encoded_len(data.len()));
    for chunk in data.chunks_exact(BYTES_PER_GROUP) {
        let value = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        out.extend(encode_group(value).iter().map(|&c| char::from(c)));
    }
    Ok(())
}

pub(crate) fn check_len(len: usize) -> Result<(), Z85Error> {
    if len.is_multiple_of(BYTES_PER_GROUP) {
        Ok(())
    } else {
        Err(Z85Error::InvalidLength {
            len,
            multiple: BYTES_PER_GROUP,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
