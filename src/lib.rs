//! Streaming hashes, checksums and memory-hard key derivation for Nebula.
//!
//! Every algorithm is an explicitly constructed, caller-owned state: there
//! is no global context and no shared lookup table beyond the immutable
//! per-polynomial CRC tables.
//!
//! # Module overview
//!
//! - `hash`  
//!   Cryptographic hashes on a shared streaming engine: SHA-224/256/384/512,
//!   RIPEMD-160, SM3, Keccak/SHA-3/SHAKE, BLAKE2b/2s and the tree-hashed
//!   BLAKE3, plus MD4, MD5 and SHA-1 for legacy formats. The engine
//!   (`hash::engine`) pairs a block codec with a finalization padder and
//!   handles buffering, counters and the after-finalize policy of each
//!   algorithm.
//!
//! - `checksum`  
//!   Adler-32, CRC-32/CRC-64 over any reflected polynomial, xxHash32,
//!   xxHash64, XXH3-64 and XXH3-128. Reading a checksum never ends the stream.
//!
//! - `mac`  
//!   HMAC over any block hash in the crate.
//!
//! - `derivation`  
//!   PBKDF2, Argon2d/i/id and scrypt. The memory-hard functions own a
//!   page-granular scratch region that grows on demand and is wiped after
//!   use.
//!
//! - `primitives`  
//!   Explicit byte-order load/store helpers and the scratch `MemoryRegion`.
//!
//! - `host`  
//!   A staging-buffer facade that drives any of the above by lengths and
//!   parameter words, for hosts that exchange data through shared memory.
//!
//! # State snapshots
//!
//! Every hasher implements [`hash::StateSnapshot`]: its full state can be
//! serialized mid-stream and restored later, and the restored state
//! produces the same digest as an uninterrupted run.
//!
//! # Design goals
//!
//! - Bit-exact output against the published vectors of every algorithm
//! - One documented finalize policy per algorithm
//! - Explicit error reporting: invalid parameters and failed memory growth
//!   are reported before any state changes

pub mod checksum;
pub mod derivation;
pub mod error;
pub mod hash;
pub mod host;
pub mod mac;
pub mod primitives;

pub use error::{Error, Result};
