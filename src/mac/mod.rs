//! Message authentication built from the crate's hashes.

pub mod hmac;

pub use hmac::{
    Hmac, HmacMd5, HmacRipemd160, HmacSha1, HmacSha3, HmacSha256, HmacSha512, HmacSm3, hmac_sha256,
    hmac_sha512,
};
