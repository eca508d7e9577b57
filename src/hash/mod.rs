//! Hash functions built on the shared streaming engine.
//!
//! Block hashes (SHA-2, RIPEMD-160, SM3, Keccak, BLAKE2 and the legacy
//! MD4, MD5 and SHA-1) are codecs driven
//! by [`engine::StreamingHasher`]; BLAKE3 keeps its own tree state. Every
//! hasher implements [`engine::Hasher`] and [`engine::StateSnapshot`].

pub mod blake2;
pub mod blake3;
pub mod engine;
pub mod keccak;
pub mod md4;
pub mod md5;
pub mod ripemd160;
pub mod sha1;
pub mod sha256;
pub mod sha512;
pub mod sm3;

pub use blake2::{blake2b, blake2b_long};
pub use blake3::blake3;
pub use engine::{Hasher, StateSnapshot, StreamingHasher};
pub use keccak::{keccak256, sha3_256};
pub use md4::md4;
pub use md5::md5;
pub use ripemd160::ripemd160;
pub use sha1::sha1;
pub use sha256::{sha224, sha256};
pub use sha512::{sha384, sha512};
pub use sm3::sm3;
