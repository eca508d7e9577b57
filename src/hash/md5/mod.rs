//! MD5 (RFC 1321).
//!
//! Broken for collision resistance; kept for interoperability with legacy
//! formats. 64-byte blocks, little-endian words and a little-endian 64-bit
//! length field.

pub mod core;

pub use self::core::{Md5Codec, Md5Hasher, md5};
