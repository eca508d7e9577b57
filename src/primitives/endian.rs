//! Explicit byte-order conversions between byte slices and machine words.
//!
//! Every codec in the crate decodes its message words and encodes its
//! chaining value through these helpers, so no byte buffer is ever
//! reinterpreted as a wider integer type.

/// Byte order of a word in a message block or digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
}

#[inline(always)]
fn take<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[..N]);
    out
}

/// Reads a `u32` from the first four bytes of `bytes`.
#[inline(always)]
pub fn load_u32(bytes: &[u8], order: Endian) -> u32 {
    match order {
        Endian::Big => u32::from_be_bytes(take(bytes)),
        Endian::Little => u32::from_le_bytes(take(bytes)),
    }
}

/// Reads a `u64` from the first eight bytes of `bytes`.
#[inline(always)]
pub fn load_u64(bytes: &[u8], order: Endian) -> u64 {
    match order {
        Endian::Big => u64::from_be_bytes(take(bytes)),
        Endian::Little => u64::from_le_bytes(take(bytes)),
    }
}

#[inline(always)]
pub fn load_u32_le(bytes: &[u8]) -> u32 {
    load_u32(bytes, Endian::Little)
}

#[inline(always)]
pub fn load_u64_le(bytes: &[u8]) -> u64 {
    load_u64(bytes, Endian::Little)
}

#[inline(always)]
pub fn store_u32(out: &mut [u8], value: u32, order: Endian) {
    let bytes = match order {
        Endian::Big => value.to_be_bytes(),
        Endian::Little => value.to_le_bytes(),
    };
    out[..4].copy_from_slice(&bytes);
}

#[inline(always)]
pub fn store_u64(out: &mut [u8], value: u64, order: Endian) {
    let bytes = match order {
        Endian::Big => value.to_be_bytes(),
        Endian::Little => value.to_le_bytes(),
    };
    out[..8].copy_from_slice(&bytes);
}

/// Fills `words` from consecutive 4-byte groups of `bytes`.
pub fn load_words_u32(bytes: &[u8], words: &mut [u32], order: Endian) {
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
        *word = load_u32(chunk, order);
    }
}

/// Fills `words` from consecutive 8-byte groups of `bytes`.
pub fn load_words_u64(bytes: &[u8], words: &mut [u64], order: Endian) {
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(8)) {
        *word = load_u64(chunk, order);
    }
}

/// Serializes `words` into `out`, truncating at `out.len()`.
///
/// Digest lengths that are not a whole number of words (BLAKE2b-8,
/// SHA-224 over 8 words) copy only the leading bytes of the last word.
pub fn store_words_u32(words: &[u32], out: &mut [u8], order: Endian) {
    for (chunk, word) in out.chunks_mut(4).zip(words) {
        let bytes = match order {
            Endian::Big => word.to_be_bytes(),
            Endian::Little => word.to_le_bytes(),
        };
        chunk.copy_from_slice(&bytes[..chunk.len()]);
    }
}

/// 64-bit counterpart of [`store_words_u32`].
pub fn store_words_u64(words: &[u64], out: &mut [u8], order: Endian) {
    for (chunk, word) in out.chunks_mut(8).zip(words) {
        let bytes = match order {
            Endian::Big => word.to_be_bytes(),
            Endian::Little => word.to_le_bytes(),
        };
        chunk.copy_from_slice(&bytes[..chunk.len()]);
    }
}
