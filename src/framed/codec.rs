// Framed Z85: length header + payload + padding, encoded as raw Z85.
//
// Layout of the intermediate buffer handed to the raw codec:
//
//   [header (1 or 9 bytes)] [payload] [0..=3 zero bytes of padding]
//
// The padding length follows from the header and payload lengths, so it is
// never transmitted.

use crate::error::Z85Error;
use crate::z85;

use super::header::Header;

/// Padding needed to bring `total` up to a multiple of 4.
#[inline]
pub fn padding_len(total: usize) -> usize {
    (4 - total % 4) % 4
}

/// Length of the framed encoding of `payload_len` bytes.
pub fn encoded_len(payload_len: usize) -> usize {
    if payload_len == 0 {
        return 0;
    }
    let total = Header::for_payload(payload_len).encoded_len() + payload_len;
    z85::encoded_len(total + padding_len(total))
}

/// Encode a payload of any length as framed Z85 text.
///
/// Empty input yields an empty string with no header.
pub fn encode(data: &[u8]) -> Result<String, Z85Error> {
    if data.is_empty() {
        return Ok(String::new());
    }

    let header = Header::for_payload(data.len());
    let total = header.encoded_len() + data.len();
    let padding = padding_len(total);
    log::debug!(
        "framed encode: {} payload bytes, {header:?}, {padding} padding",
        data.len()
    );

    let mut buf = Vec::with_capacity(total + padding);
    header.write_to(&mut buf);
    buf.extend_from_slice(data);
    buf.resize(total + padding, 0);

    z85::encode(&buf)
}

/// Decode framed Z85 text back into the original payload.
///
/// Empty input yields an empty buffer without parsing a header. Raw Z85
/// errors propagate unchanged; a header that declares more bytes than were
/// decoded fails with `Truncated`.
pub fn decode(text: impl AsRef<[u8]>) -> Result<Vec<u8>, Z85Error> {
    let text = text.as_ref();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut buf = z85::decode(text)?;
    let header = Header::parse(&buf)?;
    let start = header.encoded_len();
    let declared = header.payload_len();

    // `parse` guarantees the header itself fits.
    let available = buf.len() - start;
    if declared > available as u64 {
        return Err(Z85Error::Truncated {
            needed: declared.saturating_add(start as u64),
            available: buf.len(),
        });
    }
    log::debug!(
        "framed decode: {header:?}, {} padding",
        available - declared as usize
    );

    buf.truncate(start + declared as usize);
    buf.drain(..start);
    Ok(buf)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
