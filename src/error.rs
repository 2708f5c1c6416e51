// Error type shared by the raw and framed Z85 codecs.

use std::io;

/// Coarse classification of a [`Z85Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input length is not a multiple of the group size.
    InvalidLength,
    /// The text is not valid Z85 (bad character or out-of-range group).
    EncodingFailure,
    /// A framed header declares more bytes than the input carries.
    TruncatedInput,
    /// Underlying reader or writer failed.
    Io,
}

/// Errors produced while encoding or decoding Z85.
#[derive(Debug, thiserror::Error)]
pub enum Z85Error {
    /// Input length does not divide evenly into groups.
    #[error("wrong input length {len}, should be multiple of {multiple}")]
    InvalidLength { len: usize, multiple: usize },

    /// Character outside the 85-symbol alphabet.
    #[error("invalid Z85 character {byte:#04x} at offset {offset}")]
    InvalidCharacter { byte: u8, offset: usize },

    /// Five-character group whose value does not fit in 32 bits.
    #[error("Z85 group at offset {offset} exceeds 32 bits")]
    GroupOverflow { offset: usize },

    /// Framed buffer is shorter than its header requires.
    #[error("truncated input: need {needed} bytes, only {available} available")]
    Truncated { needed: u64, available: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Z85Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidLength { .. } => ErrorKind::InvalidLength,
            Self::InvalidCharacter { .. } | Self::GroupOverflow { .. } => {
                ErrorKind::EncodingFailure
            }
            Self::Truncated { .. } => ErrorKind::TruncatedInput,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<Z85Error> for io::Error {
    fn from(e: Z85Error) -> io::Error {
        match e {
            Z85Error::Io(inner) => inner,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let e = Z85Error::InvalidLength { len: 7, multiple: 4 };
        assert_eq!(e.to_string(), "wrong input length 7, should be multiple of 4");
        assert_eq!(e.kind(), ErrorKind::InvalidLength);

        let e = Z85Error::Truncated {
            needed: 101,
            available: 28,
        };
        assert!(e.to_string().contains("truncated"));
        assert_eq!(e.kind(), ErrorKind::TruncatedInput);

        let e = Z85Error::InvalidCharacter {
            byte: b'~',
            offset: 3,
        };
        assert_eq!(e.to_string(), "invalid Z85 character 0x7e at offset 3");
        assert_eq!(e.kind(), ErrorKind::EncodingFailure);
    }

    #[test]
    fn converts_to_invalid_data() {
        let e: io::Error = Z85Error::GroupOverflow { offset: 0 }.into();
        assert_eq!(e.kind(), io::ErrorKind::InvalidData);

        let inner = io::Error::new(io::ErrorKind::BrokenPipe, "pipe");
        let e: io::Error = Z85Error::Io(inner).into();
        assert_eq!(e.kind(), io::ErrorKind::BrokenPipe);
    }
}
