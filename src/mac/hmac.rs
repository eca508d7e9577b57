use zeroize::{Zeroize, Zeroizing};

use crate::error::{Error, Result};
use crate::hash::engine::{BlockCodec, Hasher, StreamingHasher};
use crate::hash::keccak::{KeccakCodec, SHA3_SUFFIX};
use crate::hash::md5::Md5Codec;
use crate::hash::ripemd160::Ripemd160Codec;
use crate::hash::sha1::Sha1Codec;
use crate::hash::sha256::{Sha256Codec, Sha256Variant};
use crate::hash::sha512::{Sha512Codec, Sha512Variant};
use crate::hash::sm3::Sm3Codec;

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

/// HMAC (RFC 2104) over any block codec in the crate.
///
/// The inner and outer states are keyed once at construction; `reset`
/// restores them from saved copies instead of re-deriving the pads. The
/// pad length is the codec's block length, which for SHA-3 is the sponge
/// rate.
///
/// After finalization the MAC follows the codec's finalize policy: SHA-2
/// based MACs reject reuse, SHA-3 based MACs replay the same tag.
#[derive(Clone)]
pub struct Hmac<C: BlockCodec, const N: usize> {
    inner: StreamingHasher<C, N>,
    outer: StreamingHasher<C, N>,
    keyed_inner: StreamingHasher<C, N>,
    keyed_outer: StreamingHasher<C, N>,
}

impl<C: BlockCodec, const N: usize> Hmac<C, N> {
    /// Keys a new MAC. Keys longer than one block are hashed first.
    pub fn new(codec: C, key: &[u8]) -> Self {
        let block_len = codec.block_len();

        let mut key_block = Zeroizing::new([0u8; N]);
        if key.len() > block_len {
            let mut digest = Zeroizing::new(vec![0u8; codec.output_len()]);
            StreamingHasher::<C, N>::oneshot(codec.clone(), key, &mut digest);
            let len = digest.len().min(block_len);
            key_block[..len].copy_from_slice(&digest[..len]);
        } else {
            key_block[..key.len()].copy_from_slice(key);
        }

        let mut pad = [0u8; N];
        for (p, k) in pad.iter_mut().zip(key_block.iter()) {
            *p = k ^ IPAD;
        }
        let mut keyed_inner = StreamingHasher::new(codec.clone());
        keyed_inner.absorb(&pad[..block_len]);

        for (p, k) in pad.iter_mut().zip(key_block.iter()) {
            *p = k ^ OPAD;
        }
        let mut keyed_outer = StreamingHasher::new(codec);
        keyed_outer.absorb(&pad[..block_len]);
        pad.zeroize();

        Self {
            inner: keyed_inner.clone(),
            outer: keyed_outer.clone(),
            keyed_inner,
            keyed_outer,
        }
    }

    /// Tag length in bytes.
    pub fn tag_len(&self) -> usize {
        self.inner.codec().output_len()
    }

    /// Computes the tag of `message` on a copy of the keyed state. `out`
    /// must be exactly `tag_len()` bytes.
    pub(crate) fn tag_of(&self, message: &[u8], out: &mut [u8]) {
        let mut inner = self.keyed_inner.clone();
        inner.absorb(message);
        let mut digest = Zeroizing::new(vec![0u8; self.tag_len()]);
        inner.digest_into(&mut digest);

        let mut outer = self.keyed_outer.clone();
        outer.absorb(&digest);
        outer.digest_into(out);
    }
}

impl<C: BlockCodec, const N: usize> Hasher for Hmac<C, N> {
    fn update(&mut self, data: &[u8]) -> Result<()> {
        self.inner.update(data)
    }

    fn finalize_into(&mut self, out: &mut [u8]) -> Result<usize> {
        let mut digest = Zeroizing::new(vec![0u8; self.tag_len()]);
        self.inner.finalize_into(&mut digest)?;
        self.outer.update(&digest)?;
        self.outer.finalize_into(out)
    }

    fn output_len(&self) -> usize {
        self.tag_len()
    }

    fn reset(&mut self) {
        self.inner = self.keyed_inner.clone();
        self.outer = self.keyed_outer.clone();
    }
}

pub type HmacSha256 = Hmac<Sha256Codec, 64>;
pub type HmacSha512 = Hmac<Sha512Codec, 128>;
pub type HmacSha3 = Hmac<KeccakCodec, 168>;
pub type HmacRipemd160 = Hmac<Ripemd160Codec, 64>;
pub type HmacSm3 = Hmac<Sm3Codec, 64>;
pub type HmacMd5 = Hmac<Md5Codec, 64>;
pub type HmacSha1 = Hmac<Sha1Codec, 64>;

impl HmacSha256 {
    pub fn sha224(key: &[u8]) -> Self {
        Self::new(Sha256Codec::new(Sha256Variant::Sha224), key)
    }

    pub fn sha256(key: &[u8]) -> Self {
        Self::new(Sha256Codec::new(Sha256Variant::Sha256), key)
    }
}

impl HmacSha512 {
    pub fn sha384(key: &[u8]) -> Self {
        Self::new(Sha512Codec::new(Sha512Variant::Sha384), key)
    }

    pub fn sha512(key: &[u8]) -> Self {
        Self::new(Sha512Codec::new(Sha512Variant::Sha512), key)
    }
}

impl HmacSha3 {
    /// HMAC-SHA3-`bits`.
    ///
    /// # Errors
    /// - `InvalidParameter` unless `bits` is 224, 256, 384 or 512.
    pub fn sha3(bits: u32, key: &[u8]) -> Result<Self> {
        if bits == 128 {
            return Err(Error::InvalidParameter("sha3 output bits"));
        }
        let codec = KeccakCodec::new(bits, SHA3_SUFFIX, bits as usize / 8)?;
        Ok(Self::new(codec, key))
    }
}

impl HmacRipemd160 {
    pub fn ripemd160(key: &[u8]) -> Self {
        Self::new(Ripemd160Codec::default(), key)
    }
}

impl HmacSm3 {
    pub fn sm3(key: &[u8]) -> Self {
        Self::new(Sm3Codec::default(), key)
    }
}

impl HmacMd5 {
    pub fn md5(key: &[u8]) -> Self {
        Self::new(Md5Codec::default(), key)
    }
}

impl HmacSha1 {
    pub fn sha1(key: &[u8]) -> Self {
        Self::new(Sha1Codec::default(), key)
    }
}

/// HMAC-SHA-256 of `message` under `key`.
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> [u8; 32] {
    let mut tag = [0u8; 32];
    HmacSha256::sha256(key).tag_of(message, &mut tag);
    tag
}

/// HMAC-SHA-512 of `message` under `key`.
pub fn hmac_sha512(key: &[u8], message: &[u8]) -> [u8; 64] {
    let mut tag = [0u8; 64];
    HmacSha512::sha512(key).tag_of(message, &mut tag);
    tag
}
