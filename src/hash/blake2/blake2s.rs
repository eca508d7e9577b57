use zeroize::{Zeroize, ZeroizeOnDrop};

use super::SIGMA;
use super::params::Blake2Params;
use crate::error::{Error, Result};
use crate::hash::engine::{
    BlockCodec, Buffering, FinalizePolicy, SnapshotReader, SnapshotWriter, StreamingHasher,
    ZeroPadding, tag,
};
use crate::primitives::endian::{Endian, load_words_u32, store_words_u32};

pub const BLAKE2S_BLOCK_LEN: usize = 64;
pub const BLAKE2S_MAX_OUT: usize = 32;

const IV: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

#[inline(always)]
fn g(v: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize, x: u32, y: u32) {
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
    v[d] = (v[d] ^ v[a]).rotate_right(16);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(12);
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
    v[d] = (v[d] ^ v[a]).rotate_right(8);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(7);
}

/// BLAKE2s compression over one 64-byte block. The byte counter is 64
/// bits wide and wraps.
pub fn compress(h: &mut [u32; 8], block: &[u8], counter: u128, last: bool) {
    let mut m = [0u32; 16];
    load_words_u32(&block[..BLAKE2S_BLOCK_LEN], &mut m, Endian::Little);

    let counter = counter as u64;
    let mut v = [0u32; 16];
    v[..8].copy_from_slice(h);
    v[8..].copy_from_slice(&IV);
    v[12] ^= counter as u32;
    v[13] ^= (counter >> 32) as u32;
    if last {
        v[14] = !v[14];
    }

    for s in &SIGMA {
        g(&mut v, 0, 4, 8, 12, m[s[0]], m[s[1]]);
        g(&mut v, 1, 5, 9, 13, m[s[2]], m[s[3]]);
        g(&mut v, 2, 6, 10, 14, m[s[4]], m[s[5]]);
        g(&mut v, 3, 7, 11, 15, m[s[6]], m[s[7]]);
        g(&mut v, 0, 5, 10, 15, m[s[8]], m[s[9]]);
        g(&mut v, 1, 6, 11, 12, m[s[10]], m[s[11]]);
        g(&mut v, 2, 7, 8, 13, m[s[12]], m[s[13]]);
        g(&mut v, 3, 4, 9, 14, m[s[14]], m[s[15]]);
    }

    for i in 0..8 {
        h[i] ^= v[i] ^ v[i + 8];
    }
}

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Blake2sCodec {
    h: [u32; 8],
    initial: [u32; 8],
    key: [u8; 32],
    key_len: usize,
    digest_len: usize,
}

impl Blake2sCodec {
    /// # Errors
    /// - `InvalidParameter` if the digest length is outside 1..=32, the key
    ///   is longer than 32 bytes, or salt/personalization exceed 8 bytes.
    pub fn new(params: &Blake2Params) -> Result<Self> {
        params.validate(BLAKE2S_MAX_OUT, 8)?;

        let mut block = [0u8; 32];
        block[0] = params.digest_len as u8;
        block[1] = params.key.len() as u8;
        block[2] = 1;
        block[3] = 1;
        block[16..16 + params.salt.len()].copy_from_slice(&params.salt);
        block[24..24 + params.personal.len()].copy_from_slice(&params.personal);

        let mut words = [0u32; 8];
        load_words_u32(&block, &mut words, Endian::Little);
        let mut initial = IV;
        for (h, p) in initial.iter_mut().zip(words) {
            *h ^= p;
        }

        let mut key = [0u8; 32];
        key[..params.key.len()].copy_from_slice(&params.key);

        Ok(Self {
            h: initial,
            initial,
            key,
            key_len: params.key.len(),
            digest_len: params.digest_len,
        })
    }
}

impl BlockCodec for Blake2sCodec {
    type Padder = ZeroPadding;

    const SNAPSHOT_TAG: u8 = tag::BLAKE2S;

    const BUFFERING: Buffering = Buffering::Lazy;

    const AFTER_FINAL: FinalizePolicy = FinalizePolicy::Replay;

    fn block_len(&self) -> usize {
        BLAKE2S_BLOCK_LEN
    }

    fn output_len(&self) -> usize {
        self.digest_len
    }

    fn padder(&self) -> ZeroPadding {
        ZeroPadding
    }

    fn reset(&mut self) {
        self.h = self.initial;
    }

    fn write_prefix(&self, out: &mut [u8]) -> usize {
        if self.key_len == 0 {
            return 0;
        }
        out[..BLAKE2S_BLOCK_LEN].fill(0);
        out[..32].copy_from_slice(&self.key);
        BLAKE2S_BLOCK_LEN
    }

    fn compress(&mut self, block: &[u8], consumed: u128) {
        compress(&mut self.h, block, consumed, false);
    }

    fn compress_last(&mut self, block: &[u8], consumed: u128) {
        compress(&mut self.h, block, consumed, true);
    }

    fn extract(&self, out: &mut [u8]) {
        store_words_u32(&self.h, out, Endian::Little);
    }

    fn write_state(&self, writer: &mut SnapshotWriter) {
        writer.put_u8(self.digest_len as u8);
        writer.put_bytes(&self.key[..self.key_len]);
        writer.put_words_u32(&self.initial);
        writer.put_words_u32(&self.h);
    }

    fn read_state(reader: &mut SnapshotReader<'_>) -> Result<Self> {
        let digest_len = reader.u8()? as usize;
        if digest_len == 0 || digest_len > BLAKE2S_MAX_OUT {
            return Err(Error::MalformedState);
        }
        let key_bytes = reader.bytes(32)?;
        let mut key = [0u8; 32];
        key[..key_bytes.len()].copy_from_slice(key_bytes);

        let mut initial = [0u32; 8];
        reader.words_u32(&mut initial)?;
        let mut h = [0u32; 8];
        reader.words_u32(&mut h)?;

        Ok(Self {
            h,
            initial,
            key,
            key_len: key_bytes.len(),
            digest_len,
        })
    }
}

pub type Blake2sHasher = StreamingHasher<Blake2sCodec, BLAKE2S_BLOCK_LEN>;

impl StreamingHasher<Blake2sCodec, BLAKE2S_BLOCK_LEN> {
    pub fn blake2s(params: &Blake2Params) -> Result<Self> {
        Ok(Self::new(Blake2sCodec::new(params)?))
    }
}

/// Unkeyed BLAKE2s with a digest of `out.len()` bytes (1..=32).
pub fn blake2s_into(input: &[u8], out: &mut [u8]) -> Result<()> {
    let codec = Blake2sCodec::new(&Blake2Params::new(out.len()))?;
    Blake2sHasher::oneshot(codec, input, out);
    Ok(())
}
