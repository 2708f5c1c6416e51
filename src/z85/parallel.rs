// Multithreaded raw Z85 helpers (feature `parallel`).
//
// Inputs are split on group boundaries, each chunk is transformed on the
// rayon pool, and the pieces are concatenated in order. Output is identical
// to the sequential codec.

use rayon::prelude::*;

use crate::error::Z85Error;

use super::alphabet::{BYTES_PER_GROUP, CHARS_PER_GROUP};
use super::{decoder, encoder};

/// Groups handled per rayon task.
const GROUPS_PER_CHUNK: usize = 16 * 1024;

/// Parallel counterpart of [`encode`](super::encode).
pub fn encode_parallel(data: &[u8]) -> Result<String, Z85Error> {
    encoder::check_len(data.len())?;
    let chunk = GROUPS_PER_CHUNK * BYTES_PER_GROUP;
    if data.len() <= chunk {
        return encoder::encode(data);
    }

    log::trace!(
        "z85 parallel encode: {} bytes in {} chunks",
        data.len(),
        data.len().div_ceil(chunk)
    );
    let parts = data
        .par_chunks(chunk)
        .map(encoder::encode)
        .collect::<Result<Vec<String>, Z85Error>>()?;
    Ok(parts.concat())
}

/// Parallel counterpart of [`decode`](super::decode).
pub fn decode_parallel(text: impl AsRef<[u8]>) -> Result<Vec<u8>, Z85Error> {
    let text = text.as_ref();
    decoder::check_len(text.len())?;
    let chunk = GROUPS_PER_CHUNK * CHARS_PER_GROUP;
    if text.len() <= chunk {
        return decoder::decode(text);
    }

    log::trace!(
        "z85 parallel decode: {} chars in {} chunks",
        text.len(),
        text.len().div_ceil(chunk)
    );
    let parts = text
        .par_chunks(chunk)
        .enumerate()
        .map(|(i, piece)| {
            let mut out = Vec::with_capacity(decoder::decoded_len(piece.len()));
            decoder::decode_groups(piece, i * chunk, &mut out)?;
            Ok(out)
        })
        .collect::<Result<Vec<Vec<u8>>, Z85Error>>()?;
    Ok(parts.concat())
}
