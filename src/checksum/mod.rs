//! Non-cryptographic checksums.
//!
//! These share the [`Hasher`](crate::hash::engine::Hasher) and
//! [`StateSnapshot`](crate::hash::engine::StateSnapshot) surfaces with the
//! cryptographic hashes, but finalization never ends the stream: the
//! checksum of the bytes seen so far can be read at any point.

pub mod adler32;
pub mod crc;
pub mod xxhash;

pub use adler32::{Adler32, adler32};
pub use crc::{CRC32_IEEE, CRC32C, CRC64_ECMA, Crc32, Crc64, crc32, crc32c, crc64};
pub use xxhash::{Xxh3_64, Xxh3_128, Xxh32, Xxh64, xxh3_64, xxh3_128, xxh32, xxh64};
