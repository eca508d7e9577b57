//! Finalization padding rules.
//!
//! A padder receives a zeroed scratch area of two blocks whose first
//! `tail_len` bytes hold the unprocessed message tail, writes its padding
//! in place and reports how many blocks the padded tail occupies.

use crate::primitives::endian::{Endian, store_u64};

pub trait FinalizationPadder {
    /// Pads the tail in `scratch` and returns the block count (1 or 2).
    ///
    /// # Parameters
    /// - `scratch`: two zeroed blocks, message tail at the front
    /// - `tail_len`: bytes of message already in `scratch`
    /// - `block_len`: block size of the codec
    /// - `total_len`: total message length in bytes
    fn pad(&self, scratch: &mut [u8], tail_len: usize, block_len: usize, total_len: u128) -> usize;
}

/// Width of the message-length field appended by Merkle–Damgård padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthField {
    /// 64-bit bit count, wrapping modulo 2^64 (SHA-256, RIPEMD-160, SM3).
    U64,
    /// 128-bit bit count (SHA-512).
    U128,
}

impl LengthField {
    fn width(self) -> usize {
        match self {
            LengthField::U64 => 8,
            LengthField::U128 => 16,
        }
    }
}

/// `0x80`, zero fill, then the message length in bits.
#[derive(Debug, Clone, Copy)]
pub struct MdPadding {
    pub length: LengthField,
    pub order: Endian,
}

impl FinalizationPadder for MdPadding {
    fn pad(
        &self,
        scratch: &mut [u8],
        tail_len: usize,
        block_len: usize,
        total_len: u128,
    ) -> usize {
        let width = self.length.width();
        scratch[tail_len] = 0x80;

        // The length field must fit after the 0x80 marker, otherwise the
        // padding spills into a second block.
        let blocks = if tail_len + 1 + width > block_len { 2 } else { 1 };
        let end = blocks * block_len;
        let bits = total_len.wrapping_mul(8);

        match (self.length, self.order) {
            (LengthField::U64, order) => {
                store_u64(&mut scratch[end - 8..end], bits as u64, order);
            }
            (LengthField::U128, Endian::Big) => {
                scratch[end - 16..end].copy_from_slice(&bits.to_be_bytes());
            }
            (LengthField::U128, Endian::Little) => {
                scratch[end - 16..end].copy_from_slice(&bits.to_le_bytes());
            }
        }

        blocks
    }
}

/// Keccak multi-rate padding with a domain-separation suffix.
///
/// The suffix byte is XORed at the first free position and `0x80` into the
/// last byte of the rate; when both land on the same byte they combine.
#[derive(Debug, Clone, Copy)]
pub struct KeccakPadding {
    pub suffix: u8,
}

impl FinalizationPadder for KeccakPadding {
    fn pad(
        &self,
        scratch: &mut [u8],
        tail_len: usize,
        block_len: usize,
        _total_len: u128,
    ) -> usize {
        scratch[tail_len] ^= self.suffix;
        scratch[block_len - 1] ^= 0x80;
        1
    }
}

/// Zero fill to a whole block. The codec marks finality itself.
#[derive(Debug, Clone, Copy)]
pub struct ZeroPadding;

impl FinalizationPadder for ZeroPadding {
    fn pad(
        &self,
        _scratch: &mut [u8],
        _tail_len: usize,
        _block_len: usize,
        _total_len: u128,
    ) -> usize {
        1
    }
}
