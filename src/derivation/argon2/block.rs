//! The 1024-byte Argon2 block and its compression function G.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::params::Argon2Variant;
use crate::primitives::endian::{Endian, load_words_u64, store_words_u64};

/// Bytes per block.
pub const BLOCK_LEN: usize = 1024;

/// Words of a block consumed per address block in data-independent mode.
pub(crate) const ADDRESSES_IN_BLOCK: u32 = 128;

/// A 1024-byte memory block (128 little-endian 64-bit words).
///
/// Blocks are wiped when dropped.
#[derive(Debug, Clone, Zeroize, ZeroizeOnDrop)]
pub struct Block(pub [u64; 128]);

impl Default for Block {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Block {
    pub(crate) const ZERO: Self = Self([0u64; 128]);

    pub(crate) fn in_place_xor(&mut self, other: &Block) {
        self.0
            .iter_mut()
            .zip(other.0.iter())
            .for_each(|(a, b)| *a ^= b);
    }

    /// Decodes the first 1024 bytes of `bytes`.
    pub(crate) fn from_bytes(bytes: &[u8]) -> Self {
        let mut block = Block::ZERO;
        load_words_u64(&bytes[..BLOCK_LEN], &mut block.0, Endian::Little);
        block
    }

    pub(crate) fn to_bytes(&self) -> [u8; BLOCK_LEN] {
        let mut out = [0u8; BLOCK_LEN];
        store_words_u64(&self.0, &mut out, Endian::Little);
        out
    }

    /// G(X, Y) = P(P(X ⊕ Y)) ⊕ X ⊕ Y (RFC 9106 §3.5).
    ///
    /// The first P pass runs over the eight rows of sixteen consecutive
    /// words, the second over the eight columns of interleaved word pairs.
    pub(crate) fn compress(x: &Self, y: &Self) -> Self {
        let mut r = x.clone();
        r.in_place_xor(y);

        let mut z = r.clone();
        let mut v = [0u64; 16];

        for row in z.0.chunks_exact_mut(16) {
            v.copy_from_slice(row);
            permute_p(&mut v);
            row.copy_from_slice(&v);
        }

        for column in 0..8 {
            for pair in 0..8 {
                v[2 * pair] = z.0[2 * column + 16 * pair];
                v[2 * pair + 1] = z.0[2 * column + 16 * pair + 1];
            }
            permute_p(&mut v);
            for pair in 0..8 {
                z.0[2 * column + 16 * pair] = v[2 * pair];
                z.0[2 * column + 16 * pair + 1] = v[2 * pair + 1];
            }
        }
        v.zeroize();

        z.in_place_xor(&r);
        z
    }
}

/// Pseudo-random reference words for data-independent addressing.
///
/// Each address block is G(0, G(0, Z)) where Z holds the segment position
/// and a counter that is bumped every 128 blocks.
pub(crate) struct AddressGenerator {
    input: Block,
    addresses: Block,
}

impl AddressGenerator {
    pub(crate) fn new(
        pass: u32,
        lane: u32,
        slice: u32,
        total_blocks: u32,
        passes: u32,
        variant: Argon2Variant,
    ) -> Self {
        let mut input = Block::ZERO;
        input.0[0] = pass as u64;
        input.0[1] = lane as u64;
        input.0[2] = slice as u64;
        input.0[3] = total_blocks as u64;
        input.0[4] = passes as u64;
        input.0[5] = variant as u64;

        Self {
            input,
            addresses: Block::ZERO,
        }
    }

    /// The pseudo-random word for block `index` of the segment.
    pub(crate) fn word(&mut self, index: u32) -> u64 {
        if index % ADDRESSES_IN_BLOCK == 0 || self.input.0[6] == 0 {
            self.input.0[6] += 1;
            let tmp = Block::compress(&Block::ZERO, &self.input);
            self.addresses = Block::compress(&Block::ZERO, &tmp);
        }
        self.addresses.0[(index % ADDRESSES_IN_BLOCK) as usize]
    }
}

/// GB: BLAKE2b's G with each addition replaced by `a + b + 2·lo(a)·lo(b)`.
#[inline(always)]
fn gb(a: u64, b: u64, c: u64, d: u64) -> (u64, u64, u64, u64) {
    #[inline(always)]
    fn fma(x: u64, y: u64) -> u64 {
        x.wrapping_add(y)
            .wrapping_add(2u64.wrapping_mul(x as u32 as u64).wrapping_mul(y as u32 as u64))
    }

    let a = fma(a, b);
    let d = (d ^ a).rotate_right(32);
    let c = fma(c, d);
    let b = (b ^ c).rotate_right(24);
    let a = fma(a, b);
    let d = (d ^ a).rotate_right(16);
    let c = fma(c, d);
    let b = (b ^ c).rotate_right(63);

    (a, b, c, d)
}

/// One BLAKE2b-style round over a 4×4 word matrix: columns, then diagonals.
#[inline(always)]
fn permute_p(v: &mut [u64; 16]) {
    (v[0], v[4], v[8], v[12]) = gb(v[0], v[4], v[8], v[12]);
    (v[1], v[5], v[9], v[13]) = gb(v[1], v[5], v[9], v[13]);
    (v[2], v[6], v[10], v[14]) = gb(v[2], v[6], v[10], v[14]);
    (v[3], v[7], v[11], v[15]) = gb(v[3], v[7], v[11], v[15]);

    (v[0], v[5], v[10], v[15]) = gb(v[0], v[5], v[10], v[15]);
    (v[1], v[6], v[11], v[12]) = gb(v[1], v[6], v[11], v[12]);
    (v[2], v[7], v[8], v[13]) = gb(v[2], v[7], v[8], v[13]);
    (v[3], v[4], v[9], v[14]) = gb(v[3], v[4], v[9], v[14]);
}
