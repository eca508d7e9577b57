//! BLAKE3: a binary Merkle tree of 1024-byte chunks.
//!
//! Each chunk is compressed block by block into a chaining value; parent
//! nodes compress the concatenation of two child values. The root node is
//! compressed again with the `ROOT` flag, and its output counter indexes
//! an unbounded output stream.
//!
//! Single-call hashing splits the input recursively at the largest
//! power-of-two chunk boundary, hashing both halves concurrently when the
//! `parallel` feature is enabled. Incremental hashing pushes subtrees onto
//! a lazily merged stack and produces the same tree.

pub(crate) mod compress;
pub mod hasher;
pub(crate) mod tree;

pub use compress::{BLOCK_LEN, CHUNK_LEN, KEY_LEN, OUT_LEN};
pub use hasher::{Blake3Hasher, OutputReader, blake3, blake3_derive_key, blake3_keyed, blake3_xof};
