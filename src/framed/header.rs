// Length header for framed Z85 payloads.
//
// Short form: one byte holding the payload length (1..=255).
// Long form:  marker 0x00, then the 64-bit length as two big-endian
//             32-bit halves (high half first). 9 bytes total.

use crate::error::Z85Error;

/// First byte of a long-form header. Empty payloads carry no header, so a
/// short length is never zero.
pub const LONG_FORM_MARKER: u8 = 0x00;

/// Largest payload length stored in a short-form header.
pub const SHORT_FORM_MAX: usize = u8::MAX as usize;

pub const SHORT_HEADER_LEN: usize = 1;
pub const LONG_HEADER_LEN: usize = 9;

/// Self-describing payload length that precedes framed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Header {
    Short(u8),
    Long(u64),
}

impl Header {
    /// Pick the smallest header able to describe `len` payload bytes.
    ///
    /// Only meaningful for `len > 0`; empty payloads are framed as nothing.
    pub fn for_payload(len: usize) -> Self {
        match u8::try_from(len) {
            Ok(n) if n != LONG_FORM_MARKER => Header::Short(n),
            _ => Header::Long(len as u64),
        }
    }

    /// Size of the header itself in bytes.
    #[inline]
    pub fn encoded_len(self) -> usize {
        match self {
            Header::Short(_) => SHORT_HEADER_LEN,
            Header::Long(_) => LONG_HEADER_LEN,
        }
    }

    /// Declared payload length.
    #[inline]
    pub fn payload_len(self) -> u64 {
        match self {
            Header::Short(n) => u64::from(n),
            Header::Long(n) => n,
        }
    }

    /// Append the header bytes to `out`.
    pub fn write_to(self, out: &mut Vec<u8>) {
        match self {
            Header::Short(n) => out.push(n),
            Header::Long(n) => {
                out.push(LONG_FORM_MARKER);
                out.extend_from_slice(&((n >> 32) as u32).to_be_bytes());
                out.extend_from_slice(&(n as u32).to_be_bytes());
            }
        }
    }

    /// Parse the header at the start of a decoded framed buffer.
    ///
    /// Fails with `Truncated` when the buffer is too short to hold the
    /// header it starts with.
    pub fn parse(buf: &[u8]) -> Result<Self, Z85Error> {
        match buf.first() {
            None => Err(Z85Error::Truncated {
                needed: SHORT_HEADER_LEN as u64,
                available: 0,
            }),
            Some(&LONG_FORM_MARKER) => {
                let &[_, h0, h1, h2, h3, l0, l1, l2, l3, ..] = buf else {
                    return Err(Z85Error::Truncated {
                        needed: LONG_HEADER_LEN as u64,
                        available: buf.len(),
                    });
                };
                let high = u32::from_be_bytes([h0, h1, h2, h3]);
                let low = u32::from_be_bytes([l0, l1, l2, l3]);
                Ok(Header::Long((u64::from(high) << 32) | u64::from(low)))
            }
            Some(&n) => Ok(Header::Short(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_selection_threshold() {
        assert_eq!(Header::for_payload(1), Header::Short(1));
        assert_eq!(Header::for_payload(SHORT_FORM_MAX), Header::Short(255));
        assert_eq!(Header::for_payload(256), Header::Long(256));
        assert_eq!(Header::for_payload(1200), Header::Long(1200));
    }

    #[test]
    fn long_form_layout() {
        let mut out = Vec::new();
        Header::Long(0x0000_0001_0000_04B0).write_to(&mut out);
        assert_eq!(out, [0x00, 0, 0, 0, 1, 0, 0, 0x04, 0xB0]);
        assert_eq!(Header::parse(&out).unwrap(), Header::Long(0x1_0000_04B0));
    }

    #[test]
    fn short_form_layout() {
        let mut out = Vec::new();
        Header::Short(3).write_to(&mut out);
        assert_eq!(out, [3]);
        assert_eq!(Header::parse(&[3, b'a', b'b', b'c']).unwrap(), Header::Short(3));
        assert_eq!(Header::Short(3).encoded_len(), 1);
        assert_eq!(Header::Short(3).payload_len(), 3);
    }

    #[test]
    fn byte_255_is_a_short_length() {
        let mut out = Vec::new();
        Header::for_payload(255).write_to(&mut out);
        assert_eq!(out, [0xFF]);
        assert_eq!(Header::parse(&[0xFF]).unwrap(), Header::Short(255));
        assert_eq!(Header::parse(&[0x00; 9]).unwrap(), Header::Long(0));
    }

    #[test]
    fn truncated_long_header() {
        let err = Header::parse(&[0x00, 0xFF, 0, 0]).unwrap_err();
        assert!(matches!(
            err,
            Z85Error::Truncated {
                needed: 9,
                available: 4
            }
        ));
        assert!(Header::parse(&[]).is_err());
    }
}
