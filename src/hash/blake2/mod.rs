//! BLAKE2b and BLAKE2s (RFC 7693).
//!
//! Both variants buffer lazily: the last block is only compressed once
//! the message is known to end, so the finalization flag can be set on it.
//! A keyed instance absorbs its key as a zero-padded first block, which is
//! also replayed on `reset`.

pub mod blake2b;
pub mod blake2s;
pub mod long;
pub mod params;

pub use blake2b::{Blake2bCodec, Blake2bHasher, blake2b, blake2b_into};
pub use blake2s::{Blake2sCodec, Blake2sHasher, blake2s_into};
pub use long::blake2b_long;
pub use params::Blake2Params;

/// Message word schedule. BLAKE2b runs 12 rounds and wraps around to rows
/// 0 and 1 for the last two.
pub(crate) const SIGMA: [[usize; 16]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
    [11, 8, 12, 0, 5, 2, 15, 13, 10, 14, 3, 6, 7, 1, 9, 4],
    [7, 9, 3, 1, 13, 12, 11, 14, 2, 6, 5, 10, 4, 0, 15, 8],
    [9, 0, 5, 7, 2, 4, 10, 15, 14, 1, 11, 12, 6, 8, 3, 13],
    [2, 12, 6, 10, 0, 11, 8, 3, 4, 13, 7, 5, 15, 14, 1, 9],
    [12, 5, 1, 15, 14, 13, 4, 10, 0, 7, 6, 3, 9, 2, 8, 11],
    [13, 11, 7, 14, 12, 1, 3, 9, 5, 0, 15, 4, 8, 6, 2, 10],
    [6, 15, 14, 9, 11, 3, 0, 8, 12, 2, 13, 7, 1, 4, 10, 5],
    [10, 2, 8, 4, 7, 6, 1, 5, 15, 11, 9, 14, 3, 12, 13, 0],
];
