//! xxHash family: XXH32, XXH64, XXH3-64 and XXH3-128.
//!
//! All of them take a seed and produce big-endian digests through
//! [`Hasher`](crate::hash::engine::Hasher). Reading the digest does not
//! end the stream.

pub mod xxh3;
pub mod xxh32;
pub mod xxh64;

pub use xxh3::{Xxh3_64, Xxh3_128, xxh3_64, xxh3_128};
pub use xxh32::{Xxh32, xxh32};
pub use xxh64::{Xxh64, xxh64};
