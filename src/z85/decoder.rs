// Raw Z85 decoding: 5-character groups to 4-byte groups.

use crate::error::Z85Error;

use super::alphabet::{self, BYTES_PER_GROUP, CHARS_PER_GROUP, RADIX};

// ---------------------------------------------------------------------------
// Sizes
// ---------------------------------------------------------------------------

/// Decoded length of `n` Z85 characters. Only meaningful when `n` is a
/// multiple of 5.
#[inline]
pub fn decoded_len(n: usize) -> usize {
    n / CHARS_PER_GROUP * BYTES_PER_GROUP
}

// ---------------------------------------------------------------------------
// Group transform
// ---------------------------------------------------------------------------

/// Decode one 5-character group. `offset` is the position of the group's
/// first character in the overall input and is only used for error reports.
#[inline]
pub fn decode_group(chars: &[u8; CHARS_PER_GROUP], offset: usize) -> Result<u32, Z85Error> {
    // Five digits can reach 85^5 - 1, which does not fit in u32.
    let mut value: u64 = 0;
    for (i, &c) in chars.iter().enumerate() {
        let d = alphabet::digit(c).ok_or(Z85Error::InvalidCharacter {
            byte: c,
            offset: offset.saturating_add(i),
        })?;
        value = value * u64::from(RADIX) + u64::from(d);
    }
    u32::try_from(value).map_err(|_| Z85Error::GroupOverflow { offset })
}

/// Append the decoding of `text` to `out`. `text.len()` must already be
/// known to be a multiple of 5. `base` is the offset of `text[0]` in the
/// overall input.
pub(crate) fn decode_groups(text: &[u8], base: usize, out: &mut Vec<u8>) -> Result<(), Z85Error> {
    debug_assert!(text.len().is_multiple_of(CHARS_PER_GROUP));
    out.reserve(decoded_len(text.len()));
    for (i, chunk) in text.chunks_exact(CHARS_PER_GROUP).enumerate() {
        let group = [chunk[0], chunk[1], chunk[2], chunk[3], chunk[4]];
        let value = decode_group(&group, base.saturating_add(i * CHARS_PER_GROUP))?;
        out.extend_from_slice(&value.to_be_bytes());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Decode Z85 text into raw bytes.
///
/// The text length must be a multiple of 5. Empty input yields an empty
/// buffer.
pub fn decode(text: impl AsRef<[u8]>) -> Result<Vec<u8>, Z85Error> {
    let mut out = Vec::new();
    decode_into(text, &mut out)?;
    Ok(out)
}

/// Decode Z85 text, appending the bytes to `out`.
///
/// On error `out` is restored to its original length.
pub fn decode_into(text: impl AsRef<[u8]>, out: &mut Vec<u8>) -> Result<(), Z85Error> {
    let text = text.as_ref();
    check_len(text.len())?;
    let start = out.len();
    decode_groups(text, 0, out).inspect_err(|_| out.truncate(start))
}

pub(crate) fn check_len(len: usize) -> Result<(), Z85Error> {
    if len.is_multiple_of(CHARS_PER_GROUP) {
        Ok(())
    } else {
        Err(Z85Error::InvalidLength {
            len,
            multiple: CHARS_PER_GROUP,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn decodes_hello_world() {
        assert_eq!(
            decode("HelloWorld").unwrap(),
            [0x86, 0x4F, 0xD2, 0x6F, 0xB5, 0x59, 0xF7, 0x5B]
        );
    }

    #[test]
    fn decodes_rfc_vector() {
        let bytes = decode("JTKVSB%%)wK0E.X)V>+}o?pNmC{O&4W4b!Ni{Lh6").unwrap();
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[..4], &[0x8E, 0x0B, 0xDD, 0x69]);
        assert_eq!(&bytes[28..], &[0x3A, 0xEA, 0xD3, 0xB7]);
    }

    #[test]
    fn empty_input() {
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn rejects_wrong_length_before_inspecting_characters() {
        let err = decode("w]zPgvQTp1vQTO").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidLength);
        assert!(err.to_string().contains("wrong input length 14"));

        // Bad characters are not reported when the length is already wrong.
        let err = decode("~~~~").unwrap_err();
        assert!(matches!(err, Z85Error::InvalidLength { len: 4, multiple: 5 }));
    }

    #[test]
    fn offsets_saturate_near_usize_max() {
        let err = decode_group(b"0000~", usize::MAX - 1).unwrap_err();
        assert!(matches!(
            err,
            Z85Error::InvalidCharacter {
                byte: b'~',
                offset: usize::MAX
            }
        ));
        let mut out = Vec::new();
        let err = decode_groups(b"00000~0000", usize::MAX - 2, &mut out).unwrap_err();
        assert!(matches!(err, Z85Error::InvalidCharacter { offset: usize::MAX, .. }));
    }

    #[test]
    fn reports_invalid_character_offset() {
        let err = decode("HelloWor d").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EncodingFailure);
        assert!(matches!(
            err,
            Z85Error::InvalidCharacter {
                byte: b' ',
                offset: 8
            }
        ));
    }

    #[test]
    fn rejects_group_above_u32() {
        // "%nSc0" is u32::MAX; "%nSc1" is one past it.
        assert_eq!(decode("%nSc0").unwrap(), [0xFF; 4]);
        let err = decode("00000%nSc1").unwrap_err();
        assert!(matches!(err, Z85Error::GroupOverflow { offset: 5 }));
        assert!(decode("#####").is_err());
    }

    #[test]
    fn decode_into_restores_buffer_on_error() {
        let mut out = vec![7u8];
        decode_into("00000", &mut out).unwrap();
        assert_eq!(out, [7, 0, 0, 0, 0]);

        assert!(decode_into("00000~0000", &mut out).is_err());
        assert_eq!(out, [7, 0, 0, 0, 0]);
    }

    #[test]
    fn accepts_bytes_and_strings() {
        let from_str = decode("HelloWorld").unwrap();
        let from_bytes = decode(b"HelloWorld").unwrap();
        let owned = String::from("HelloWorld");
        assert_eq!(from_str, from_bytes);
        assert_eq!(decode(&owned).unwrap(), from_bytes);
    }

    #[test]
    fn decoded_len_matches_groups() {
        assert_eq!(decoded_len(0), 0);
        assert_eq!(decoded_len(5), 4);
        assert_eq!(decoded_len(40), 32);
    }
}
