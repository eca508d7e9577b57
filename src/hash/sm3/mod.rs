//! SM3 (GB/T 32905-2016).
//!
//! Shares the SHA-256 framing: 64-byte blocks, big-endian words and a
//! 64-bit big-endian length field.

pub mod core;

pub use self::core::{Sm3Codec, Sm3Hasher, sm3};
