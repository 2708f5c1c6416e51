// Streaming Z85 encoder and decoder.
//
// Both types accept input in arbitrary chunks, write every complete group to
// the wrapped writer immediately, and carry the incomplete group over to the
// next call. `finish()` rejects a stream that ends mid-group.

use std::io::{self, Write};

use crate::error::Z85Error;

use super::alphabet::{BYTES_PER_GROUP, CHARS_PER_GROUP};
use super::decoder;
use super::encoder;

/// Stream position as a `usize`, saturating where `usize` is narrower.
#[inline]
fn position(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

// ---------------------------------------------------------------------------
// StreamEncoder
// ---------------------------------------------------------------------------

/// Incremental raw Z85 encoder writing text to `W`.
pub struct StreamEncoder<W: Write> {
    writer: W,
    pending: [u8; BYTES_PER_GROUP],
    pending_len: usize,
    bytes_in: u64,
    bytes_out: u64,
    /// Reusable output staging buffer (cleared after each write).
    out_buf: Vec<u8>,
}

impl<W: Write> StreamEncoder<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pending: [0; BYTES_PER_GROUP],
            pending_len: 0,
            bytes_in: 0,
            bytes_out: 0,
            out_buf: Vec::new(),
        }
    }

    /// Feed raw bytes. Complete groups are encoded and written immediately.
    pub fn write_bytes(&mut self, mut data: &[u8]) -> Result<(), Z85Error> {
        self.bytes_in += data.len() as u64;

        if self.pending_len > 0 {
            let take = (BYTES_PER_GROUP - self.pending_len).min(data.len());
            self.pending[self.pending_len..self.pending_len + take].copy_from_slice(&data[..take]);
            self.pending_len += take;
            data = &data[take..];
            if self.pending_len < BYTES_PER_GROUP {
                return Ok(());
            }
            encoder::encode_groups(&self.pending, &mut self.out_buf);
            self.pending_len = 0;
        }

        let whole = data.len() - data.len() % BYTES_PER_GROUP;
        encoder::encode_groups(&data[..whole], &mut self.out_buf);

        let rest = &data[whole..];
        self.pending[..rest.len()].copy_from_slice(rest);
        self.pending_len = rest.len();

        self.flush_out()
    }

    /// Finish the stream and return the writer.
    ///
    /// Fails with `InvalidLength` if the total input was not a multiple of 4.
    pub fn finish(mut self) -> Result<W, Z85Error> {
        if self.pending_len != 0 {
            return Err(Z85Error::InvalidLength {
                len: position(self.bytes_in),
                multiple: BYTES_PER_GROUP,
            });
        }
        self.writer.flush()?;
        log::debug!(
            "z85 stream encoder: {} bytes in, {} chars out",
            self.bytes_in,
            self.bytes_out
        );
        Ok(self.writer)
    }

    /// Raw bytes accepted so far.
    pub fn bytes_in(&self) -> u64 {
        self.bytes_in
    }

    /// Z85 characters written so far.
    pub fn bytes_out(&self) -> u64 {
        self.bytes_out
    }

    fn flush_out(&mut self) -> Result<(), Z85Error> {
        if !self.out_buf.is_empty() {
            self.writer.write_all(&self.out_buf)?;
            self.bytes_out += self.out_buf.len() as u64;
            self.out_buf.clear();
        }
        Ok(())
    }
}

impl<W: Write> Write for StreamEncoder<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

// ---------------------------------------------------------------------------
// StreamDecoder
// ---------------------------------------------------------------------------

/// Incremental raw Z85 decoder writing bytes to `W`.
pub struct StreamDecoder<W: Write> {
    writer: W,
    pending: [u8; CHARS_PER_GROUP],
    pending_len: usize,
    bytes_in: u64,
    bytes_out: u64,
    out_buf: Vec<u8>,
}

impl<W: Write> StreamDecoder<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pending: [0; CHARS_PER_GROUP],
            pending_len: 0,
            bytes_in: 0,
            bytes_out: 0,
            out_buf: Vec::new(),
        }
    }

    /// Feed Z85 text. Complete groups are decoded and written immediately.
    ///
    /// Error offsets are relative to the start of the stream. Nothing from
    /// the failing call is written once an error is returned.
    pub fn write_text(&mut self, mut text: &[u8]) -> Result<(), Z85Error> {
        // Offset of the first character of `pending` (or of `text` if none).
        let mut offset = position(self.bytes_in) - self.pending_len;
        self.bytes_in += text.len() as u64;

        if self.pending_len > 0 {
            let take = (CHARS_PER_GROUP - self.pending_len).min(text.len());
            self.pending[self.pending_len..self.pending_len + take].copy_from_slice(&text[..take]);
            self.pending_len += take;
            text = &text[take..];
            if self.pending_len < CHARS_PER_GROUP {
                return Ok(());
            }
            let value = decoder::decode_group(&self.pending, offset)?;
            self.out_buf.extend_from_slice(&value.to_be_bytes());
            self.pending_len = 0;
            offset = offset.saturating_add(CHARS_PER_GROUP);
        }

        let whole = text.len() - text.len() % CHARS_PER_GROUP;
        if let Err(e) = decoder::decode_groups(&text[..whole], offset, &mut self.out_buf) {
            self.out_buf.clear();
            return Err(e);
        }

        let rest = &text[whole..];
        self.pending[..rest.len()].copy_from_slice(rest);
        self.pending_len = rest.len();

        if !self.out_buf.is_empty() {
            self.writer.write_all(&self.out_buf)?;
            self.bytes_out += self.out_buf.len() as u64;
            self.out_buf.clear();
        }
        Ok(())
    }

    /// Finish the stream and return the writer.
    ///
    /// Fails with `InvalidLength` if the total input was not a multiple of 5.
    pub fn finish(mut self) -> Result<W, Z85Error> {
        if self.pending_len != 0 {
            return Err(Z85Error::InvalidLength {
                len: position(self.bytes_in),
                multiple: CHARS_PER_GROUP,
            });
        }
        self.writer.flush()?;
        log::debug!(
            "z85 stream decoder: {} chars in, {} bytes out",
            self.bytes_in,
            self.bytes_out
        );
        Ok(self.writer)
    }

    /// Z85 characters accepted so far.
    pub fn bytes_in(&self) -> u64 {
        self.bytes_in
    }

    /// Raw bytes written so far.
    pub fn bytes_out(&self) -> u64 {
        self.bytes_out
    }
}

impl<W: Write> Write for StreamDecoder<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_text(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
