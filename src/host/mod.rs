//! Staging-buffer facade for hosts that exchange data through shared
//! memory.
//!
//! A host writes input into a fixed 16 KiB [`Staging`] buffer, drives a
//! session by lengths and parameter words, and reads results back from the
//! same buffer. [`HashHost`] covers every hash and checksum in the crate;
//! [`MemoryHardHost`] covers Argon2 and scrypt and exposes their scratch
//! memory growth.
//!
//! Keyed BLAKE2 and BLAKE3 sessions read the key from the staging buffer
//! during `init`, so the key must be staged before the message.
//!
//! # `Init` parameter words
//!
//! | Algorithm | Word | Default |
//! |---|---|---|
//! | Adler-32, MD4, MD5, SHA-1, RIPEMD-160, SM3 | ignored | 0 |
//! | CRC-32 | reflected polynomial (must fit 32 bits) | `0xEDB88320` |
//! | CRC-64 | reflected polynomial | `0xC96C5795D7870F42` |
//! | xxHash32 | seed (must fit 32 bits) | 0 |
//! | xxHash64, XXH3-64, XXH3-128 | seed | 0 |
//! | SHA-256 family | digest bits, 224 or 256 | 256 |
//! | SHA-512 family | digest bits, 384 or 512 | 512 |
//! | Keccak | output bits, 128/224/256/384/512 | 512 |
//! | BLAKE2b, BLAKE2s | low 16 bits digest bits, high 16 bits key bytes | 512 / 256 |
//! | BLAKE3 | key bytes, 0 or 32 | 0 |
//!
//! # `Final` parameter
//!
//! Keccak takes the domain suffix byte (0 keeps Keccak's `0x01`; `0x06`
//! gives SHA-3, `0x1F` SHAKE). BLAKE3 takes the digest length in bytes (0
//! keeps 32). Every other algorithm ignores it.

mod hasher;
mod kdf;
mod session;
mod staging;

pub use hasher::HashHost;
pub use kdf::{INITIAL_SCRATCH, MemoryHardHost};
pub use session::Algorithm;
pub use staging::{STAGING_LEN, Staging};
