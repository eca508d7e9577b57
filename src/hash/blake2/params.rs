use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

/// Configuration shared by BLAKE2b and BLAKE2s.
///
/// The limits depend on the variant and are checked when a codec is built:
/// BLAKE2b accepts a 1..=64 byte digest, a key of up to 64 bytes and 16-byte
/// salt/personalization strings; BLAKE2s halves all of them.
#[derive(Clone, Debug, Zeroize, ZeroizeOnDrop)]
pub struct Blake2Params {
    /// Digest length in bytes.
    pub digest_len: usize,
    /// Optional MAC key, absorbed as a zero-padded first block.
    pub key: Vec<u8>,
    /// Optional salt, zero-padded to the variant's salt size.
    pub salt: Vec<u8>,
    /// Optional personalization string, zero-padded like the salt.
    pub personal: Vec<u8>,
}

impl Blake2Params {
    pub fn new(digest_len: usize) -> Self {
        Self {
            digest_len,
            key: Vec::new(),
            salt: Vec::new(),
            personal: Vec::new(),
        }
    }

    pub fn keyed(digest_len: usize, key: &[u8]) -> Self {
        let mut params = Self::new(digest_len);
        params.key = key.to_vec();
        params
    }

    /// Decodes the packed `Init` word: low 16 bits hold the digest size in
    /// bits, high 16 bits the key length in bytes. `key` must have exactly
    /// that length.
    pub fn from_init_word(word: u32, key: &[u8]) -> Result<Self> {
        let bits = (word & 0xffff) as usize;
        let key_len = (word >> 16) as usize;

        if bits == 0 || bits % 8 != 0 {
            return Err(Error::InvalidParameter("blake2 digest bits"));
        }
        if key.len() != key_len {
            return Err(Error::InvalidParameter("blake2 key length"));
        }

        Ok(Self::keyed(bits / 8, key))
    }

    /// Encodes the packed `Init` word. Inverse of [`Self::from_init_word`].
    pub fn init_word(&self) -> u32 {
        ((self.key.len() as u32) << 16) | (self.digest_len as u32 * 8)
    }

    /// Checks the lengths against a variant with `max_out`-byte digests and
    /// `salt_len`-byte salts.
    pub(crate) fn validate(&self, max_out: usize, salt_len: usize) -> Result<()> {
        if self.digest_len == 0 || self.digest_len > max_out {
            return Err(Error::InvalidParameter("blake2 digest length"));
        }
        if self.key.len() > max_out {
            return Err(Error::InvalidParameter("blake2 key length"));
        }
        if self.salt.len() > salt_len {
            return Err(Error::InvalidParameter("blake2 salt length"));
        }
        if self.personal.len() > salt_len {
            return Err(Error::InvalidParameter("blake2 personalization length"));
        }
        Ok(())
    }
}
