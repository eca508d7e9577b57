//! Password-based key derivation.
//!
//! - `pbkdf2`: iterated HMAC (RFC 8018).
//! - `argon2`: Argon2d/i/id over a growable block memory (RFC 9106).
//! - `scrypt`: Salsa20/8 ROMix over a growable word table (RFC 7914).
//!
//! The memory-hard engines own a [`MemoryRegion`](crate::primitives::MemoryRegion)
//! that grows in 64 KiB pages and is wiped after every derivation.

pub mod argon2;
pub mod pbkdf2;
pub mod scrypt;

pub use argon2::{Argon2, Argon2Params, Argon2Variant, argon2d, argon2i, argon2id};
pub use pbkdf2::{pbkdf2, pbkdf2_sha256, pbkdf2_sha512};
pub use scrypt::{Scrypt, ScryptParams, scrypt};
