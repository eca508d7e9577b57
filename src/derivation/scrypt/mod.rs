//! scrypt (RFC 7914).
//!
//! The password and salt are stretched by PBKDF2-HMAC-SHA-256 into `p`
//! blocks of `128 · r` bytes. Each block goes through ROMix, which fills a
//! table of `N` BlockMix states and then reads it back at data-dependent
//! positions, and the mixed blocks become the salt of a final one-iteration
//! PBKDF2. The lanes run one after another over a single shared table.

pub mod core;
pub mod params;
pub(crate) mod romix;
pub(crate) mod salsa;

pub use self::core::{Scrypt, scrypt};
pub use params::{ScryptParamError, ScryptParams};
