//! Keccak sponge: original Keccak, SHA-3 (FIPS 202) and SHAKE.
//!
//! All variants share Keccak-f[1600] and differ in capacity (selected by
//! an output size in bits) and in the domain suffix XORed in at
//! finalization. Digests and squeezed output are read little-endian from
//! the lanes. A finalized sponge replays its output: further updates are
//! ignored and every finalization returns the same bytes.

pub mod core;
pub(crate) mod permutation;

pub use self::core::{
    KECCAK_SUFFIX, KeccakCodec, KeccakHasher, SHA3_SUFFIX, SHAKE_SUFFIX, XofReader, keccak256,
    keccak512, sha3_224, sha3_256, sha3_384, sha3_512,
};
pub use permutation::keccak_f1600;
