// Raw Z85 codec (ZeroMQ RFC 32).
//
// Maps every 4-byte group to a 5-character group drawn from an 85-symbol
// printable alphabet. Input lengths must divide evenly into groups; use the
// `framed` module for payloads of arbitrary length.
//
// # Modules
//
// - `alphabet` — Alphabet and compile-time reverse lookup table
// - `encoder`  — Bytes to text, one group at a time
// - `decoder`  — Text to bytes with character and range validation
// - `stream`   — Incremental encoder/decoder over `Write` sinks
// - `parallel` — rayon helpers for large buffers (feature `parallel`)

pub mod alphabet;
pub mod decoder;
pub mod encoder;
pub mod stream;

#[cfg(feature = "parallel")]
pub mod parallel;

// Re-export key types for convenience.
pub use alphabet::ALPHABET;
pub use decoder::{decode, decode_into, decoded_len};
pub use encoder::{encode, encode_into, encoded_len};
pub use stream::{StreamDecoder, StreamEncoder};

#[cfg(feature = "parallel")]
pub use parallel::{decode_parallel, encode_parallel};
