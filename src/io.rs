// Reader/writer and file-level helpers for Z85 encoding/decoding.
//
// Raw mode streams through `StreamEncoder`/`StreamDecoder` with constant
// memory. Framed mode reads the whole input first, since the header must
// carry the payload length. Optionally computes a streaming SHA-256 of the
// raw payload (feature-gated behind `file-io`).

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

#[cfg(feature = "file-io")]
use sha2::Digest;

use crate::error::Z85Error;
use crate::framed;
use crate::z85::{StreamDecoder, StreamEncoder};

// ---------------------------------------------------------------------------
// Mode and stats
// ---------------------------------------------------------------------------

/// Which codec layer to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framing {
    /// Raw Z85; input length must be a multiple of 4 (encode) or 5 (decode).
    #[default]
    Raw,
    /// Length-framed Z85; any payload length.
    Framed,
}

/// Statistics returned by the encode helpers.
#[derive(Debug, Clone)]
pub struct EncodeStats {
    pub framing: Framing,
    /// Raw payload size in bytes.
    pub input_size: u64,
    /// Z85 text size in bytes.
    pub output_size: u64,
    /// SHA-256 of the raw payload (if `file-io` feature is enabled).
    pub payload_sha256: Option<[u8; 32]>,
}

/// Statistics returned by the decode helpers.
#[derive(Debug, Clone)]
pub struct DecodeStats {
    pub framing: Framing,
    /// Z85 text size in bytes, excluding ignored trailing whitespace.
    pub input_size: u64,
    /// Recovered payload size in bytes.
    pub output_size: u64,
    /// SHA-256 of the recovered payload (if `file-io` feature is enabled).
    pub payload_sha256: Option<[u8; 32]>,
}

const BUF_SIZE: usize = 64 * 1024; // 64 KiB

// ---------------------------------------------------------------------------
// Payload digest
// ---------------------------------------------------------------------------

#[derive(Default)]
struct PayloadDigest {
    #[cfg(feature = "file-io")]
    hasher: sha2::Sha256,
}

impl PayloadDigest {
    #[cfg_attr(not(feature = "file-io"), allow(unused_variables))]
    fn update(&mut self, data: &[u8]) {
        #[cfg(feature = "file-io")]
        self.hasher.update(data);
    }

    fn finish(self) -> Option<[u8; 32]> {
        #[cfg(feature = "file-io")]
        {
            Some(self.hasher.finalize().into())
        }
        #[cfg(not(feature = "file-io"))]
        {
            None
        }
    }
}

/// Writer adapter that hashes everything passing through it.
struct DigestWriter<W: Write> {
    inner: W,
    digest: PayloadDigest,
}

impl<W: Write> Write for DigestWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.digest.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Longest whitespace tail `decode_stream` holds back before treating it as
/// interior text.
pub const MAX_TRAILING_WHITESPACE: usize = 4096;

fn trailing_whitespace_start(data: &[u8]) -> usize {
    data.iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |i| i + 1)
}

// ---------------------------------------------------------------------------
// Stream helpers
// ---------------------------------------------------------------------------

/// Encode everything from `reader` as Z85 text into `writer`.
pub fn encode_stream<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    framing: Framing,
) -> Result<EncodeStats, Z85Error> {
    let mut digest = PayloadDigest::default();

    let (input_size, output_size) = match framing {
        Framing::Raw => {
            let mut encoder = StreamEncoder::new(&mut writer);
            let mut buf = vec![0u8; BUF_SIZE];
            loop {
                let n = reader.read(&mut buf)?;
                if n == 0 {
                    break;
                }
                digest.update(&buf[..n]);
                encoder.write_bytes(&buf[..n])?;
            }
            let sizes = (encoder.bytes_in(), encoder.bytes_out());
            encoder.finish()?;
            sizes
        }
        Framing::Framed => {
            let mut payload = Vec::new();
            reader.read_to_end(&mut payload)?;
            digest.update(&payload);
            let text = framed::encode(&payload)?;
            writer.write_all(text.as_bytes())?;
            writer.flush()?;
            (payload.len() as u64, text.len() as u64)
        }
    };

    Ok(EncodeStats {
        framing,
        input_size,
        output_size,
        payload_sha256: digest.finish(),
    })
}

/// Decode Z85 text from `reader` into `writer`.
///
/// Trailing ASCII whitespace (such as a final newline) is ignored, up to
/// [`MAX_TRAILING_WHITESPACE`] bytes in raw mode; whitespace anywhere else
/// is an invalid character.
pub fn decode_stream<R: Read, W: Write>(
    mut reader: R,
    writer: W,
    framing: Framing,
) -> Result<DecodeStats, Z85Error> {
    let mut out = DigestWriter {
        inner: writer,
        digest: PayloadDigest::default(),
    };

    let (input_size, output_size) = match framing {
        Framing::Raw => {
            let mut decoder = StreamDecoder::new(&mut out);
            let mut buf = vec![0u8; BUF_SIZE];
            // Whitespace run that may turn out to be the end of the input.
            let mut held = Vec::new();
            loop {
                let n = reader.read(&mut buf)?;
                if n == 0 {
                    break;
                }
                let chunk = &buf[..n];
                let keep = trailing_whitespace_start(chunk);
                if keep > 0 {
                    decoder.write_text(&held)?;
                    held.clear();
                    decoder.write_text(&chunk[..keep])?;
                }
                held.extend_from_slice(&chunk[keep..]);
                if held.len() > MAX_TRAILING_WHITESPACE {
                    // Fails at the first held byte.
                    decoder.write_text(&held)?;
                    held.clear();
                }
            }
            let sizes = (decoder.bytes_in(), decoder.bytes_out());
            decoder.finish()?;
            sizes
        }
        Framing::Framed => {
            let mut text = Vec::new();
            reader.read_to_end(&mut text)?;
            text.truncate(trailing_whitespace_start(&text));
            let payload = framed::decode(&text)?;
            out.write_all(&payload)?;
            out.flush()?;
            (text.len() as u64, payload.len() as u64)
        }
    };

    Ok(DecodeStats {
        framing,
        input_size,
        output_size,
        payload_sha256: out.digest.finish(),
    })
}

// ---------------------------------------------------------------------------
// File helpers
// ---------------------------------------------------------------------------

/// Encode `input_path` into Z85 text at `output_path`.
///
/// The output file contains only Z85 characters (no trailing newline).
pub fn encode_file(
    input_path: &Path,
    output_path: &Path,
    framing: Framing,
) -> Result<EncodeStats, Z85Error> {
    let reader = BufReader::with_capacity(BUF_SIZE, File::open(input_path)?);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, File::create(output_path)?);
    let stats = encode_stream(reader, &mut writer, framing)?;
    writer.flush()?;
    Ok(stats)
}

/// Decode the Z85 text at `input_path` into `output_path`.
pub fn decode_file(
    input_path: &Path,
    output_path: &Path,
    framing: Framing,
) -> Result<DecodeStats, Z85Error> {
    let reader = BufReader::with_capacity(BUF_SIZE, File::open(input_path)?);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, File::create(output_path)?);
    let stats = decode_stream(reader, &mut writer, framing)?;
    writer.flush()?;
    Ok(stats)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
