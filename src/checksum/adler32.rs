use crate::error::{Error, Result};
use crate::hash::engine::{Hasher, SnapshotReader, SnapshotWriter, StateSnapshot, tag};

/// Largest prime below 2^16.
const BASE: u32 = 65521;
/// Most bytes that can be summed before `b` may overflow 32 bits.
const NMAX: usize = 5552;

/// Adler-32 running checksum.
///
/// The two 16-bit sums are packed as `b << 16 | a`. Finalization is a pure
/// read: the checksum can be taken at any point and updates may continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adler32 {
    value: u32,
}

impl Adler32 {
    pub fn new() -> Self {
        Self { value: 1 }
    }

    /// Current checksum.
    pub fn value(&self) -> u32 {
        self.value
    }

    fn absorb(&mut self, data: &[u8]) {
        let mut a = self.value & 0xffff;
        let mut b = self.value >> 16;

        // Defer the modulo for as long as the sums cannot overflow.
        for run in data.chunks(NMAX) {
            for &byte in run {
                a += byte as u32;
                b += a;
            }
            a %= BASE;
            b %= BASE;
        }

        self.value = (b << 16) | a;
    }
}

impl Default for Adler32 {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for Adler32 {
    fn update(&mut self, data: &[u8]) -> Result<()> {
        self.absorb(data);
        Ok(())
    }

    fn finalize_into(&mut self, out: &mut [u8]) -> Result<usize> {
        if out.len() < 4 {
            return Err(Error::InvalidParameter("output buffer shorter than digest"));
        }
        out[..4].copy_from_slice(&self.value.to_be_bytes());
        Ok(4)
    }

    fn output_len(&self) -> usize {
        4
    }

    fn reset(&mut self) {
        self.value = 1;
    }
}

impl StateSnapshot for Adler32 {
    fn snapshot(&self) -> Vec<u8> {
        let mut writer = SnapshotWriter::new(tag::ADLER32);
        writer.put_u32(self.value);
        writer.finish()
    }

    fn restore(bytes: &[u8]) -> Result<Self> {
        let mut reader = SnapshotReader::new(bytes, tag::ADLER32)?;
        let value = reader.u32()?;
        reader.finish()?;

        if (value & 0xffff) >= BASE || (value >> 16) >= BASE {
            return Err(Error::MalformedState);
        }
        Ok(Self { value })
    }
}

/// Adler-32 of `input`.
pub fn adler32(input: &[u8]) -> u32 {
    let mut checksum = Adler32::new();
    checksum.absorb(input);
    checksum.value
}
