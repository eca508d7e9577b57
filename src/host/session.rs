//! The per-algorithm session behind [`HashHost`](super::HashHost).

use zeroize::Zeroize;

use crate::checksum::{
    Adler32, CRC32_IEEE, CRC64_ECMA, Crc32, Crc64, Xxh3_64, Xxh3_128, Xxh32, Xxh64,
};
use crate::error::{Error, Result};
use crate::hash::blake2::{Blake2Params, Blake2bHasher, Blake2sHasher};
use crate::hash::blake3::{Blake3Hasher, KEY_LEN};
use crate::hash::engine::{Hasher, StateSnapshot, StreamingHasher};
use crate::hash::keccak::{KECCAK_SUFFIX, KeccakCodec, KeccakHasher};
use crate::hash::md4::{Md4Codec, Md4Hasher};
use crate::hash::md5::{Md5Codec, Md5Hasher};
use crate::hash::ripemd160::{Ripemd160Codec, Ripemd160Hasher};
use crate::hash::sha1::{Sha1Codec, Sha1Hasher};
use crate::hash::sha256::Sha256Hasher;
use crate::hash::sha512::Sha512Hasher;
use crate::hash::sm3::{Sm3Codec, Sm3Hasher};

/// Algorithms reachable through [`HashHost`](super::HashHost).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Adler32,
    Crc32,
    Crc64,
    Xxh32,
    Xxh64,
    Xxh3_64,
    Xxh3_128,
    Md4,
    Md5,
    Sha1,
    /// SHA-224 or SHA-256.
    Sha256,
    /// SHA-384 or SHA-512.
    Sha512,
    Ripemd160,
    Sm3,
    /// Keccak, SHA-3 and SHAKE; the suffix is picked at finalization.
    Keccak,
    Blake2b,
    Blake2s,
    Blake3,
}

impl Algorithm {
    /// The `Init` word used when none is given.
    pub fn default_init(self) -> u64 {
        match self {
            Algorithm::Crc32 => CRC32_IEEE as u64,
            Algorithm::Crc64 => CRC64_ECMA,
            Algorithm::Sha256 => 256,
            Algorithm::Sha512 | Algorithm::Keccak | Algorithm::Blake2b => 512,
            Algorithm::Blake2s => 256,
            _ => 0,
        }
    }
}

pub(crate) enum Session {
    Adler32(Adler32),
    Crc32(Crc32),
    Crc64(Crc64),
    Xxh32(Xxh32),
    Xxh64(Xxh64),
    Xxh3_64(Xxh3_64),
    Xxh3_128(Xxh3_128),
    Md4(Md4Hasher),
    Md5(Md5Hasher),
    Sha1(Sha1Hasher),
    Sha256(Sha256Hasher),
    Sha512(Sha512Hasher),
    Ripemd160(Ripemd160Hasher),
    Sm3(Sm3Hasher),
    Keccak(KeccakHasher),
    Blake2b(Blake2bHasher),
    Blake2s(Blake2sHasher),
    Blake3(Blake3Hasher),
}

macro_rules! with_session {
    ($session:expr, $h:ident => $body:expr) => {
        match $session {
            Session::Adler32($h) => $body,
            Session::Crc32($h) => $body,
            Session::Crc64($h) => $body,
            Session::Xxh32($h) => $body,
            Session::Xxh64($h) => $body,
            Session::Xxh3_64($h) => $body,
            Session::Xxh3_128($h) => $body,
            Session::Md4($h) => $body,
            Session::Md5($h) => $body,
            Session::Sha1($h) => $body,
            Session::Sha256($h) => $body,
            Session::Sha512($h) => $body,
            Session::Ripemd160($h) => $body,
            Session::Sm3($h) => $body,
            Session::Keccak($h) => $body,
            Session::Blake2b($h) => $body,
            Session::Blake2s($h) => $body,
            Session::Blake3($h) => $body,
        }
    };
}

fn narrow(param: u64, name: &'static str) -> Result<u32> {
    u32::try_from(param).map_err(|_| Error::InvalidParameter(name))
}

fn blake2_params(param: u64, staging: &[u8]) -> Result<Blake2Params> {
    let word = narrow(param, "blake2 init word")?;
    let key = staging
        .get(..(word >> 16) as usize)
        .ok_or(Error::InvalidParameter("blake2 key length"))?;
    Blake2Params::from_init_word(word, key)
}

impl Session {
    /// Decodes `param` for `algorithm` and builds a fresh session. Nothing
    /// is built if the word is out of range.
    pub(crate) fn open(algorithm: Algorithm, param: u64, staging: &[u8]) -> Result<Self> {
        Ok(match algorithm {
            Algorithm::Adler32 => Session::Adler32(Adler32::new()),
            Algorithm::Crc32 => Session::Crc32(Crc32::new(narrow(param, "crc32 polynomial")?)?),
            Algorithm::Crc64 => Session::Crc64(Crc64::new(param)?),
            Algorithm::Xxh32 => Session::Xxh32(Xxh32::new(narrow(param, "xxh32 seed")?)),
            Algorithm::Xxh64 => Session::Xxh64(Xxh64::new(param)),
            Algorithm::Xxh3_64 => Session::Xxh3_64(Xxh3_64::new(param)),
            Algorithm::Xxh3_128 => Session::Xxh3_128(Xxh3_128::new(param)),
            Algorithm::Md4 => Session::Md4(StreamingHasher::new(Md4Codec::default())),
            Algorithm::Md5 => Session::Md5(StreamingHasher::new(Md5Codec::default())),
            Algorithm::Sha1 => Session::Sha1(StreamingHasher::new(Sha1Codec::default())),
            Algorithm::Sha256 => Session::Sha256(match param {
                224 => Sha256Hasher::sha224(),
                256 => Sha256Hasher::sha256(),
                _ => return Err(Error::InvalidParameter("sha256 digest bits")),
            }),
            Algorithm::Sha512 => Session::Sha512(match param {
                384 => Sha512Hasher::sha384(),
                512 => Sha512Hasher::sha512(),
                _ => return Err(Error::InvalidParameter("sha512 digest bits")),
            }),
            Algorithm::Ripemd160 => {
                Session::Ripemd160(StreamingHasher::new(Ripemd160Codec::default()))
            }
            Algorithm::Sm3 => Session::Sm3(StreamingHasher::new(Sm3Codec::default())),
            Algorithm::Keccak => {
                let bits = narrow(param, "keccak output bits")?;
                let codec = KeccakCodec::new(bits, KECCAK_SUFFIX, bits as usize / 8)?;
                Session::Keccak(StreamingHasher::new(codec))
            }
            Algorithm::Blake2b => {
                Session::Blake2b(Blake2bHasher::blake2b(&blake2_params(param, staging)?)?)
            }
            Algorithm::Blake2s => {
                Session::Blake2s(Blake2sHasher::blake2s(&blake2_params(param, staging)?)?)
            }
            Algorithm::Blake3 => Session::Blake3(match param {
                0 => Blake3Hasher::new(),
                32 => {
                    let mut key = [0u8; KEY_LEN];
                    key.copy_from_slice(
                        staging
                            .get(..KEY_LEN)
                            .ok_or(Error::InvalidParameter("blake3 key length"))?,
                    );
                    let hasher = Blake3Hasher::new_keyed(&key);
                    key.zeroize();
                    hasher
                }
                _ => return Err(Error::InvalidParameter("blake3 key length")),
            }),
        })
    }

    /// Rebuilds a session of `algorithm` from snapshot bytes.
    pub(crate) fn restore(algorithm: Algorithm, bytes: &[u8]) -> Result<Self> {
        Ok(match algorithm {
            Algorithm::Adler32 => Session::Adler32(Adler32::restore(bytes)?),
            Algorithm::Crc32 => Session::Crc32(Crc32::restore(bytes)?),
            Algorithm::Crc64 => Session::Crc64(Crc64::restore(bytes)?),
            Algorithm::Xxh32 => Session::Xxh32(Xxh32::restore(bytes)?),
            Algorithm::Xxh64 => Session::Xxh64(Xxh64::restore(bytes)?),
            Algorithm::Xxh3_64 => Session::Xxh3_64(Xxh3_64::restore(bytes)?),
            Algorithm::Xxh3_128 => Session::Xxh3_128(Xxh3_128::restore(bytes)?),
            Algorithm::Md4 => Session::Md4(Md4Hasher::restore(bytes)?),
            Algorithm::Md5 => Session::Md5(Md5Hasher::restore(bytes)?),
            Algorithm::Sha1 => Session::Sha1(Sha1Hasher::restore(bytes)?),
            Algorithm::Sha256 => Session::Sha256(Sha256Hasher::restore(bytes)?),
            Algorithm::Sha512 => Session::Sha512(Sha512Hasher::restore(bytes)?),
            Algorithm::Ripemd160 => Session::Ripemd160(Ripemd160Hasher::restore(bytes)?),
            Algorithm::Sm3 => Session::Sm3(Sm3Hasher::restore(bytes)?),
            Algorithm::Keccak => Session::Keccak(KeccakHasher::restore(bytes)?),
            Algorithm::Blake2b => Session::Blake2b(Blake2bHasher::restore(bytes)?),
            Algorithm::Blake2s => Session::Blake2s(Blake2sHasher::restore(bytes)?),
            Algorithm::Blake3 => Session::Blake3(Blake3Hasher::restore(bytes)?),
        })
    }

    pub(crate) fn update(&mut self, data: &[u8]) -> Result<()> {
        with_session!(self, h => h.update(data))
    }

    pub(crate) fn snapshot(&self) -> Vec<u8> {
        with_session!(self, h => h.snapshot())
    }

    /// Writes the digest to the front of `out` and returns its length.
    pub(crate) fn finalize(&mut self, final_param: u32, out: &mut [u8]) -> Result<usize> {
        match self {
            Session::Keccak(h) => {
                let suffix = match final_param {
                    0 => h.codec().suffix(),
                    byte => u8::try_from(byte)
                        .map_err(|_| Error::InvalidParameter("keccak padding byte"))?,
                };
                h.finalize_padded(suffix, out)
            }
            Session::Blake3(h) if final_param != 0 => {
                let len = final_param as usize;
                let out = out
                    .get_mut(..len)
                    .ok_or(Error::InvalidParameter("blake3 digest length"))?;
                h.finalize_xof().read(out);
                Ok(len)
            }
            session => with_session!(session, h => h.finalize_into(out)),
        }
    }
}
