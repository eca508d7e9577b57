//! Reflected table-driven CRC-32 and CRC-64.
//!
//! Polynomials are given in reflected (LSB-first) form. Lookup tables are
//! built on first use of each polynomial and shared by every hasher using
//! it. The register is pre- and post-inverted, so the stored value between
//! calls is the finished CRC of the bytes seen so far and the checksum of
//! an empty message is zero.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use crate::error::{Error, Result};
use crate::hash::engine::{Hasher, SnapshotReader, SnapshotWriter, StateSnapshot, tag};

/// IEEE 802.3 (zlib, PNG, gzip).
pub const CRC32_IEEE: u32 = 0xEDB8_8320;
/// Castagnoli (iSCSI, ext4).
pub const CRC32C: u32 = 0x82F6_3B78;
/// ECMA-182 as used by xz.
pub const CRC64_ECMA: u64 = 0xC96C_5795_D787_0F42;

type Table32 = Arc<[u32; 256]>;
type Table64 = Arc<[u64; 256]>;

static TABLES_32: OnceLock<Mutex<HashMap<u32, Table32>>> = OnceLock::new();
static TABLES_64: OnceLock<Mutex<HashMap<u64, Table64>>> = OnceLock::new();

fn cached<K, T>(
    cache: &'static OnceLock<Mutex<HashMap<K, Arc<T>>>>,
    key: K,
    build: impl FnOnce(K) -> T,
) -> Arc<T>
where
    K: Copy + Eq + std::hash::Hash,
{
    let map = cache.get_or_init(|| Mutex::new(HashMap::new()));
    // A poisoned lock still holds fully built tables.
    let mut map = map.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    map.entry(key)
        .or_insert_with(|| {
            log::debug!("building crc table");
            Arc::new(build(key))
        })
        .clone()
}

fn table_32(polynomial: u32) -> Table32 {
    cached(&TABLES_32, polynomial, |poly| {
        let mut table = [0u32; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            let mut crc = i as u32;
            for _ in 0..8 {
                crc = (crc >> 1) ^ ((crc & 1).wrapping_neg() & poly);
            }
            *entry = crc;
        }
        table
    })
}

fn table_64(polynomial: u64) -> Table64 {
    cached(&TABLES_64, polynomial, |poly| {
        let mut table = [0u64; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            let mut crc = i as u64;
            for _ in 0..8 {
                crc = (crc >> 1) ^ ((crc & 1).wrapping_neg() & poly);
            }
            *entry = crc;
        }
        table
    })
}

/// CRC-32 over an arbitrary reflected polynomial.
#[derive(Clone)]
pub struct Crc32 {
    polynomial: u32,
    table: Table32,
    crc: u32,
}

impl Crc32 {
    /// # Errors
    /// - `InvalidParameter` if the polynomial lacks the `x^0` term (bit 31
    ///   in reflected form).
    pub fn new(polynomial: u32) -> Result<Self> {
        if polynomial & 0x8000_0000 == 0 {
            return Err(Error::InvalidParameter("crc32 polynomial"));
        }
        Ok(Self {
            polynomial,
            table: table_32(polynomial),
            crc: 0,
        })
    }

    pub fn ieee() -> Self {
        Self {
            polynomial: CRC32_IEEE,
            table: table_32(CRC32_IEEE),
            crc: 0,
        }
    }

    /// The `Init` parameter.
    pub fn polynomial(&self) -> u32 {
        self.polynomial
    }

    pub fn value(&self) -> u32 {
        self.crc
    }

    fn absorb(&mut self, data: &[u8]) {
        let mut crc = !self.crc;
        for &byte in data {
            crc = (crc >> 8) ^ self.table[((crc as u8) ^ byte) as usize];
        }
        self.crc = !crc;
    }
}

impl Hasher for Crc32 {
    fn update(&mut self, data: &[u8]) -> Result<()> {
        self.absorb(data);
        Ok(())
    }

    fn finalize_into(&mut self, out: &mut [u8]) -> Result<usize> {
        if out.len() < 4 {
            return Err(Error::InvalidParameter("output buffer shorter than digest"));
        }
        out[..4].copy_from_slice(&self.crc.to_be_bytes());
        Ok(4)
    }

    fn output_len(&self) -> usize {
        4
    }

    fn reset(&mut self) {
        self.crc = 0;
    }
}

impl StateSnapshot for Crc32 {
    /// Layout after the header: polynomial (u32), running CRC (u32).
    fn snapshot(&self) -> Vec<u8> {
        let mut writer = SnapshotWriter::new(tag::CRC32);
        writer.put_u32(self.polynomial);
        writer.put_u32(self.crc);
        writer.finish()
    }

    fn restore(bytes: &[u8]) -> Result<Self> {
        let mut reader = SnapshotReader::new(bytes, tag::CRC32)?;
        let polynomial = reader.u32()?;
        let crc = reader.u32()?;
        reader.finish()?;

        let mut state = Crc32::new(polynomial).map_err(|_| Error::MalformedState)?;
        state.crc = crc;
        Ok(state)
    }
}

/// CRC-64 over an arbitrary reflected polynomial.
#[derive(Clone)]
pub struct Crc64 {
    polynomial: u64,
    table: Table64,
    crc: u64,
}

impl Crc64 {
    /// # Errors
    /// - `InvalidParameter` if the polynomial lacks the `x^0` term (bit 63
    ///   in reflected form).
    pub fn new(polynomial: u64) -> Result<Self> {
        if polynomial >> 63 == 0 {
            return Err(Error::InvalidParameter("crc64 polynomial"));
        }
        Ok(Self {
            polynomial,
            table: table_64(polynomial),
            crc: 0,
        })
    }

    pub fn ecma() -> Self {
        Self {
            polynomial: CRC64_ECMA,
            table: table_64(CRC64_ECMA),
            crc: 0,
        }
    }

    pub fn polynomial(&self) -> u64 {
        self.polynomial
    }

    pub fn value(&self) -> u64 {
        self.crc
    }

    fn absorb(&mut self, data: &[u8]) {
        let mut crc = !self.crc;
        for &byte in data {
            crc = (crc >> 8) ^ self.table[((crc as u8) ^ byte) as usize];
        }
        self.crc = !crc;
    }
}

impl Hasher for Crc64 {
    fn update(&mut self, data: &[u8]) -> Result<()> {
        self.absorb(data);
        Ok(())
    }

    fn finalize_into(&mut self, out: &mut [u8]) -> Result<usize> {
        if out.len() < 8 {
            return Err(Error::InvalidParameter("output buffer shorter than digest"));
        }
        out[..8].copy_from_slice(&self.crc.to_be_bytes());
        Ok(8)
    }

    fn output_len(&self) -> usize {
        8
    }

    fn reset(&mut self) {
        self.crc = 0;
    }
}

impl StateSnapshot for Crc64 {
    /// Layout after the header: polynomial (u64), running CRC (u64).
    fn snapshot(&self) -> Vec<u8> {
        let mut writer = SnapshotWriter::new(tag::CRC64);
        writer.put_u64(self.polynomial);
        writer.put_u64(self.crc);
        writer.finish()
    }

    fn restore(bytes: &[u8]) -> Result<Self> {
        let mut reader = SnapshotReader::new(bytes, tag::CRC64)?;
        let polynomial = reader.u64()?;
        let crc = reader.u64()?;
        reader.finish()?;

        let mut state = Crc64::new(polynomial).map_err(|_| Error::MalformedState)?;
        state.crc = crc;
        Ok(state)
    }
}

/// CRC-32 (IEEE) of `input`.
pub fn crc32(input: &[u8]) -> u32 {
    let mut crc = Crc32::ieee();
    crc.absorb(input);
    crc.crc
}

/// CRC-32C (Castagnoli) of `input`.
pub fn crc32c(input: &[u8]) -> u32 {
    let mut crc = Crc32 {
        polynomial: CRC32C,
        table: table_32(CRC32C),
        crc: 0,
    };
    crc.absorb(input);
    crc.crc
}

/// CRC-64 (ECMA-182, xz variant) of `input`.
pub fn crc64(input: &[u8]) -> u64 {
    let mut crc = Crc64::ecma();
    crc.absorb(input);
    crc.crc
}
