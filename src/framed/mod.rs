// Framed Z85 for payloads of any length.
//
// The payload is prefixed with a length header and zero-padded to a
// multiple of 4 bytes before raw Z85 encoding. Decoding strips the header
// and padding and checks the declared length against the decoded size.
//
// # Modules
//
// - `header` — Short (1 byte) and long (9 byte) length headers
// - `codec`  — Frame assembly, padding and validation

pub mod codec;
pub mod header;

pub use codec::{decode, encode, encoded_len, padding_len};
pub use header::{Header, LONG_FORM_MARKER, SHORT_FORM_MAX};
