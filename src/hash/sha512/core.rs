//! SHA-512 core hashing functions
//!
//! This module implements the SHA-512 compression function as a streaming
//! codec, shared by SHA-384 and SHA-512.
//!
//! It provides:
//! - the compression function operating on 1024-bit blocks
//! - the codec plugged into the streaming engine
//! - one-shot hashing functions for arbitrary-length input

use super::computations::all_rounds;
use super::{H384_INIT, H512_INIT};
use crate::error::{Error, Result};
use crate::hash::engine::{
    BlockCodec, LengthField, MdPadding, SnapshotReader, SnapshotWriter, StreamingHasher, tag,
};
use crate::primitives::endian::{Endian, load_words_u64, store_words_u64};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sha512Variant {
    Sha384,
    Sha512,
}

impl Sha512Variant {
    fn init(self) -> [u64; 8] {
        match self {
            Sha512Variant::Sha384 => H384_INIT,
            Sha512Variant::Sha512 => H512_INIT,
        }
    }

    fn output_len(self) -> usize {
        match self {
            Sha512Variant::Sha384 => 48,
            Sha512Variant::Sha512 => 64,
        }
    }
}

/// Chaining value of a SHA-384/512 computation.
#[derive(Clone)]
pub struct Sha512Codec {
    state: [u64; 8],
    variant: Sha512Variant,
}

impl Sha512Codec {
    pub fn new(variant: Sha512Variant) -> Self {
        Self {
            state: variant.init(),
            variant,
        }
    }
}

/// Compresses a single 1024-bit message block.
///
/// This function performs the SHA-512 compression step on a single
/// 128-byte block, updating the internal hash state in place.
///
/// # Parameters
/// - `block`: A 1024-bit (128-byte) message block
/// - `state`: The current hash state (8 × 64-bit words)
///
/// # Notes
/// - Input words are interpreted as big-endian, as required by SHA-512.
pub fn compress(block: &[u8], state: &mut [u64; 8]) {
    let mut w = [0u64; 16];
    load_words_u64(&block[..128], &mut w, Endian::Big);
    all_rounds(state, w);
}

impl BlockCodec for Sha512Codec {
    type Padder = MdPadding;

    const SNAPSHOT_TAG: u8 = tag::SHA512;

    fn block_len(&self) -> usize {
        128
    }

    fn output_len(&self) -> usize {
        self.variant.output_len()
    }

    /// Message length is encoded as a 128-bit big-endian integer (in bits).
    fn padder(&self) -> MdPadding {
        MdPadding {
            length: LengthField::U128,
            order: Endian::Big,
        }
    }

    fn reset(&mut self) {
        self.state = self.variant.init();
    }

    fn compress(&mut self, block: &[u8], _consumed: u128) {
        compress(block, &mut self.state);
    }

    fn extract(&self, out: &mut [u8]) {
        store_words_u64(&self.state, out, Endian::Big);
    }

    fn write_state(&self, writer: &mut SnapshotWriter) {
        writer.put_u8(self.variant.output_len() as u8);
        writer.put_words_u64(&self.state);
    }

    fn read_state(reader: &mut SnapshotReader<'_>) -> Result<Self> {
        let variant = match reader.u8()? {
            48 => Sha512Variant::Sha384,
            64 => Sha512Variant::Sha512,
            _ => return Err(Error::MalformedState),
        };
        let mut state = [0u64; 8];
        reader.words_u64(&mut state)?;
        Ok(Self { state, variant })
    }
}

pub type Sha512Hasher = StreamingHasher<Sha512Codec, 128>;

impl StreamingHasher<Sha512Codec, 128> {
    pub fn sha384() -> Self {
        Self::new(Sha512Codec::new(Sha512Variant::Sha384))
    }

    pub fn sha512() -> Self {
        Self::new(Sha512Codec::new(Sha512Variant::Sha512))
    }
}

/// Computes the SHA-384 hash of the given input.
pub fn sha384(input: &[u8]) -> [u8; 48] {
    let mut out = [0u8; 48];
    Sha512Hasher::oneshot(Sha512Codec::new(Sha512Variant::Sha384), input, &mut out);
    out
}

/// Computes the SHA-512 hash of the given input.
///
/// # Parameters
/// - `input`: Arbitrary-length input message
///
/// # Returns
/// - The final SHA-512 hash as 64 bytes (`[u8; 64]`)
///
/// # Notes
/// - The internal state uses 8 × 64-bit words and is serialized in big-endian.
pub fn sha512(input: &[u8]) -> [u8; 64] {
    let mut out = [0u8; 64];
    Sha512Hasher::oneshot(Sha512Codec::new(Sha512Variant::Sha512), input, &mut out);
    out
}
