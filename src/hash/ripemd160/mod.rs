//! RIPEMD-160.
//!
//! Two parallel lines of 80 steps over little-endian message words; the
//! length field and the digest are little-endian as well.

pub mod core;

pub use self::core::{Ripemd160Codec, Ripemd160Hasher, ripemd160};
