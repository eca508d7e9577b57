//! ROMix (scrypt's sequential memory-hard mixing).

use zeroize::Zeroizing;

use super::salsa::block_mix;
use crate::primitives::endian::{Endian, load_words_u32, store_words_u32};

/// Mixes one `128 · r`-byte block of `B` in place, using `v` (at least
/// `32 · r · n` words) as the lookup table.
pub(crate) fn smix(block: &mut [u8], r: usize, n: usize, v: &mut [u32]) {
    let words = 32 * r;

    let mut x = Zeroizing::new(vec![0u32; words]);
    let mut y = Zeroizing::new(vec![0u32; words]);
    load_words_u32(block, &mut x, Endian::Little);

    for entry in v.chunks_exact_mut(words).take(n) {
        entry.copy_from_slice(&x);
        block_mix(&x, &mut y, r);
        core::mem::swap(&mut x, &mut y);
    }

    for _ in 0..n {
        let j = integerify(&x, r) as usize & (n - 1);
        let entry = &v[j * words..(j + 1) * words];
        x.iter_mut().zip(entry).for_each(|(x, v)| *x ^= v);
        block_mix(&x, &mut y, r);
        core::mem::swap(&mut x, &mut y);
    }

    store_words_u32(&x, block, Endian::Little);
}

/// First 64 bits of the last 64-byte sub-block, little-endian.
#[inline]
fn integerify(x: &[u32], r: usize) -> u64 {
    let last = (2 * r - 1) * 16;
    x[last] as u64 | (x[last + 1] as u64) << 32
}
