use zeroize::{Zeroize, ZeroizeOnDrop};

use super::SIGMA;
use super::params::Blake2Params;
use crate::error::{Error, Result};
use crate::hash::engine::{
    BlockCodec, Buffering, FinalizePolicy, SnapshotReader, SnapshotWriter, StreamingHasher,
    ZeroPadding, tag,
};
use crate::primitives::endian::{Endian, load_words_u64, store_words_u64};

pub const BLAKE2B_BLOCK_LEN: usize = 128;
pub const BLAKE2B_MAX_OUT: usize = 64;

pub(crate) const IV: [u64; 8] = [
    0x6a09e667f3bcc908, 0xbb67ae8584caa73b, 0x3c6ef372fe94f82b, 0xa54ff53a5f1d36f1,
    0x510e527fade682d1, 0x9b05688c2b3e6c1f, 0x1f83d9abfb41bd6b, 0x5be0cd19137e2179,
];

#[inline(always)]
fn g(v: &mut [u64; 16], a: usize, b: usize, c: usize, d: usize, x: u64, y: u64) {
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
    v[d] = (v[d] ^ v[a]).rotate_right(32);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(24);
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
    v[d] = (v[d] ^ v[a]).rotate_right(16);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(63);
}

/// BLAKE2b compression F over one 128-byte block.
///
/// `counter` is the number of bytes hashed so far including this block;
/// `last` sets the finalization flag word.
pub fn compress(h: &mut [u64; 8], block: &[u8], counter: u128, last: bool) {
    let mut m = [0u64; 16];
    load_words_u64(&block[..BLAKE2B_BLOCK_LEN], &mut m, Endian::Little);

    let mut v = [0u64; 16];
    v[..8].copy_from_slice(h);
    v[8..].copy_from_slice(&IV);
    v[12] ^= counter as u64;
    v[13] ^= (counter >> 64) as u64;
    if last {
        v[14] = !v[14];
    }

    for round in 0..12 {
        let s = &SIGMA[round % 10];
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

/// BLAKE2b chaining value plus the parameters needed to re-initialize it.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Blake2bCodec {
    h: [u64; 8],
    initial: [u64; 8],
    key: [u8; 64],
    key_len: usize,
    digest_len: usize,
}

impl Blake2bCodec {
    /// # Errors
    /// - `InvalidParameter` if the digest length is outside 1..=64, the key
    ///   is longer than 64 bytes, or salt/personalization exceed 16 bytes.
    pub fn new(params: &Blake2Params) -> Result<Self> {
        params.validate(BLAKE2B_MAX_OUT, 16)?;

        // Parameter block: digest length, key length, fanout 1, depth 1,
        // then salt in words 4..6 and personalization in words 6..8.
        let mut block = [0u8; 64];
        block[0] = params.digest_len as u8;
        block[1] = params.key.len() as u8;
        block[2] = 1;
        block[3] = 1;
        block[32..32 + params.salt.len()].copy_from_slice(&params.salt);
        block[48..48 + params.personal.len()].copy_from_slice(&params.personal);

        let mut words = [0u64; 8];
        load_words_u64(&block, &mut words, Endian::Little);
        let initial: [u64; 8] = core::array::from_fn(|i| IV[i] ^ words[i]);

        let mut key = [0u8; 64];
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

impl BlockCodec for Blake2bCodec {
    type Padder = ZeroPadding;

    const SNAPSHOT_TAG: u8 = tag::BLAKE2B;

    const BUFFERING: Buffering = Buffering::Lazy;

    const AFTER_FINAL: FinalizePolicy = FinalizePolicy::Replay;

    fn block_len(&self) -> usize {
        BLAKE2B_BLOCK_LEN
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
        out[..BLAKE2B_BLOCK_LEN].fill(0);
        out[..64].copy_from_slice(&self.key);
        BLAKE2B_BLOCK_LEN
    }

    fn compress(&mut self, block: &[u8], consumed: u128) {
        compress(&mut self.h, block, consumed, false);
    }

    fn compress_last(&mut self, block: &[u8], consumed: u128) {
        compress(&mut self.h, block, consumed, true);
    }

    fn extract(&self, out: &mut [u8]) {
        store_words_u64(&self.h, out, Endian::Little);
    }

    fn write_state(&self, writer: &mut SnapshotWriter) {
        writer.put_u8(self.digest_len as u8);
        writer.put_bytes(&self.key[..self.key_len]);
        writer.put_words_u64(&self.initial);
        writer.put_words_u64(&self.h);
    }

    fn read_state(reader: &mut SnapshotReader<'_>) -> Result<Self> {
        let digest_len = reader.u8()? as usize;
        if digest_len == 0 || digest_len > BLAKE2B_MAX_OUT {
            return Err(Error::MalformedState);
        }
        let key_bytes = reader.bytes(64)?;
        let mut key = [0u8; 64];
        key[..key_bytes.len()].copy_from_slice(key_bytes);

        let mut initial = [0u64; 8];
        reader.words_u64(&mut initial)?;
        let mut h = [0u64; 8];
        reader.words_u64(&mut h)?;

        Ok(Self {
            h,
            initial,
            key,
            key_len: key_bytes.len(),
            digest_len,
        })
    }
}

pub type Blake2bHasher = StreamingHasher<Blake2bCodec, BLAKE2B_BLOCK_LEN>;

impl StreamingHasher<Blake2bCodec, BLAKE2B_BLOCK_LEN> {
    pub fn blake2b(params: &Blake2Params) -> Result<Self> {
        Ok(Self::new(Blake2bCodec::new(params)?))
    }
}

/// Unkeyed BLAKE2b with a digest of `out.len()` bytes (1..=64).
pub fn blake2b_into(input: &[u8], out: &mut [u8]) -> Result<()> {
    let codec = Blake2bCodec::new(&Blake2Params::new(out.len()))?;
    Blake2bHasher::oneshot(codec, input, out);
    Ok(())
}

/// BLAKE2b-512 of `input`.
pub fn blake2b(input: &[u8]) -> [u8; 64] {
    let mut initial = IV;
    initial[0] ^= 0x0101_0000 ^ BLAKE2B_MAX_OUT as u64;

    let codec = Blake2bCodec {
        h: initial,
        initial,
        key: [0u8; 64],
        key_len: 0,
        digest_len: BLAKE2B_MAX_OUT,
    };

    let mut out = [0u8; 64];
    Blake2bHasher::oneshot(codec, input, &mut out);
    out
}
