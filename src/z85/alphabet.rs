// Z85 alphabet and reverse lookup table (ZeroMQ RFC 32).
//
// Both tables are `const` and built at compile time; they are read-only
// shared data for every encoder and decoder.

/// The 85 printable characters, indexed by digit value.
pub const ALPHABET: &[u8; 85] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ.-:+=^!/*?&<>()[]{}@%$#";

/// Marker for bytes outside the alphabet in [`DECODE_TABLE`].
pub const INVALID: u8 = 0xFF;

/// Base of the digit system.
pub const RADIX: u32 = 85;

/// Raw bytes per group.
pub const BYTES_PER_GROUP: usize = 4;

/// Characters per group.
pub const CHARS_PER_GROUP: usize = 5;

const fn build_decode_table() -> [u8; 256] {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Character byte to digit value, or [`INVALID`].
pub const DECODE_TABLE: [u8; 256] = build_decode_table();

/// Digit value of `c`, if it belongs to the alphabet.
#[inline]
pub fn digit(c: u8) -> Option<u8> {
    match DECODE_TABLE[c as usize] {
        INVALID => None,
        d => Some(d),
    }
}
