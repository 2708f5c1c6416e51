//! Oxiz85: Z85 (ZeroMQ RFC 32) binary-to-text encoding in Rust.
//!
//! The crate provides:
//! - The raw Z85 codec for buffers whose length is a multiple of 4 (`z85`)
//! - A length-framed variant for payloads of any length (`framed`)
//! - Reader/writer and file helpers (`io`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```
//! use oxiz85::{framed, z85};
//!
//! let text = z85::encode(&[0x86, 0x4F, 0xD2, 0x6F, 0xB5, 0x59, 0xF7, 0x5B]).unwrap();
//! assert_eq!(text, "HelloWorld");
//!
//! let framed_text = framed::encode(b"any length").unwrap();
//! assert_eq!(framed::decode(&framed_text).unwrap(), b"any length");
//! ```

pub mod error;
pub mod framed;
pub mod io;
pub mod z85;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{ErrorKind, Z85Error};
