//! Serializable hasher state.
//!
//! Snapshots use an explicit little-endian layout rather than the in-memory
//! struct layout:
//!
//! ```text
//! magic "NH" | format version (u8) | algorithm tag (u8) | algorithm fields ...
//! ```
//!
//! Algorithm fields are fixed-width integers, word arrays and
//! `u32`-length-prefixed byte strings, in the order each hasher documents.
//! A snapshot restores only into the algorithm that wrote it.

use crate::error::{Error, Result};

const MAGIC: [u8; 2] = *b"NH";
const FORMAT_VERSION: u8 = 1;

/// Algorithm tags. A snapshot only restores into the hasher that wrote it.
pub(crate) mod tag {
    pub const ADLER32: u8 = 0x01;
    pub const CRC32: u8 = 0x02;
    pub const CRC64: u8 = 0x03;
    pub const XXH32: u8 = 0x04;
    pub const XXH64: u8 = 0x05;
    pub const XXH3_128: u8 = 0x06;
    pub const XXH3_64: u8 = 0x07;
    pub const SHA256: u8 = 0x10;
    pub const SHA512: u8 = 0x11;
    pub const RIPEMD160: u8 = 0x12;
    pub const SM3: u8 = 0x13;
    pub const KECCAK: u8 = 0x14;
    pub const BLAKE2B: u8 = 0x15;
    pub const BLAKE2S: u8 = 0x16;
    pub const BLAKE3: u8 = 0x17;
    pub const MD5: u8 = 0x18;
    pub const SHA1: u8 = 0x19;
    pub const MD4: u8 = 0x1a;
}

/// Pause/resume support for any hasher.
pub trait StateSnapshot: Sized {
    /// Encodes the full state: chaining value, pending bytes, counters and
    /// the finalized flag.
    fn snapshot(&self) -> Vec<u8>;

    /// Rebuilds a state from bytes produced by [`StateSnapshot::snapshot`].
    ///
    /// # Errors
    /// - `MalformedState` if the bytes were written by another algorithm,
    ///   are truncated, carry trailing data or describe an impossible state.
    fn restore(bytes: &[u8]) -> Result<Self>;
}

pub struct SnapshotWriter {
    bytes: Vec<u8>,
}

impl SnapshotWriter {
    pub fn new(tag: u8) -> Self {
        let mut bytes = Vec::with_capacity(256);
        bytes.extend_from_slice(&MAGIC);
        bytes.push(FORMAT_VERSION);
        bytes.push(tag);
        Self { bytes }
    }

    pub fn put_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    pub fn put_bool(&mut self, value: bool) {
        self.bytes.push(value as u8);
    }

    pub fn put_u32(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn put_u64(&mut self, value: u64) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn put_u128(&mut self, value: u128) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn put_words_u32(&mut self, words: &[u32]) {
        words.iter().for_each(|w| self.put_u32(*w));
    }

    pub fn put_words_u64(&mut self, words: &[u64]) {
        words.iter().for_each(|w| self.put_u64(*w));
    }

    /// Writes a `u32` length followed by the bytes.
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.put_u32(bytes.len() as u32);
        self.bytes.extend_from_slice(bytes);
    }

    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

pub struct SnapshotReader<'a> {
    bytes: &'a [u8],
}

impl<'a> SnapshotReader<'a> {
    /// Checks the header and positions the reader on the first field.
    pub fn new(bytes: &'a [u8], tag: u8) -> Result<Self> {
        match bytes {
            [m0, m1, version, found, rest @ ..]
                if [*m0, *m1] == MAGIC && *version == FORMAT_VERSION && *found == tag =>
            {
                Ok(Self { bytes: rest })
            }
            _ => Err(Error::MalformedState),
        }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.bytes.len() < len {
            return Err(Error::MalformedState);
        }
        let (head, rest) = self.bytes.split_at(len);
        self.bytes = rest;
        Ok(head)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn bool(&mut self) -> Result<bool> {
        match self.u8()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(Error::MalformedState),
        }
    }

    pub fn u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    pub fn u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.take_array()?))
    }

    pub fn u128(&mut self) -> Result<u128> {
        Ok(u128::from_le_bytes(self.take_array()?))
    }

    pub fn words_u32(&mut self, words: &mut [u32]) -> Result<()> {
        for word in words.iter_mut() {
            *word = self.u32()?;
        }
        Ok(())
    }

    pub fn words_u64(&mut self, words: &mut [u64]) -> Result<()> {
        for word in words.iter_mut() {
            *word = self.u64()?;
        }
        Ok(())
    }

    /// Reads a `u32`-length-prefixed byte string of at most `max` bytes.
    pub fn bytes(&mut self, max: usize) -> Result<&'a [u8]> {
        let len = self.u32()? as usize;
        if len > max {
            return Err(Error::MalformedState);
        }
        self.take(len)
    }

    /// Fails unless every byte has been consumed.
    pub fn finish(self) -> Result<()> {
        if self.bytes.is_empty() {
            Ok(())
        } else {
            Err(Error::MalformedState)
        }
    }
}
