//! SHA-1 (FIPS 180-4).
//!
//! Collision attacks are practical, so this is only for verifying existing
//! digests. Framing is the SHA-256 one: big-endian words and a 64-bit
//! big-endian length.

pub mod core;

pub use self::core::{Sha1Codec, Sha1Hasher, sha1};
