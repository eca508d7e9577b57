//! MD4 (RFC 1320). Only for legacy formats such as NTLM digests.

pub mod core;

pub use self::core::{Md4Codec, Md4Hasher, md4};
