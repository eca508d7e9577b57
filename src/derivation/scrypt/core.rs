use zeroize::{Zeroize, Zeroizing};

use super::params::ScryptParams;
use super::romix::smix;
use crate::derivation::pbkdf2::pbkdf2;
use crate::error::{Error, Result};
use crate::mac::hmac::HmacSha256;
use crate::primitives::memory::{MemoryRegion, try_zeroed};

/// scrypt engine that owns the ROMix lookup table `V`.
///
/// `V` holds `128 · r · N` bytes and is reused across the `p` lanes of one
/// derivation and across derivations. It is wiped after every call.
///
/// # Example
///
/// ```rust
/// use nebula_hash::derivation::scrypt::{Scrypt, ScryptParams};
///
/// let mut engine = Scrypt::new(ScryptParams::new(4, 1, 1, 64))?;
/// let key = engine.derive(b"", b"")?;
/// assert_eq!(key[..4], [0x77, 0xd6, 0x57, 0x62]);
/// # Ok::<(), nebula_hash::Error>(())
/// ```
pub struct Scrypt {
    params: ScryptParams,
    table: MemoryRegion<u32>,
}

impl Scrypt {
    /// # Errors
    /// - `InvalidParameter` if the parameters fail validation.
    pub fn new(params: ScryptParams) -> Result<Self> {
        Self::with_memory(params, MemoryRegion::new())
    }

    /// Uses a caller-provided region for `V`.
    pub fn with_memory(params: ScryptParams, table: MemoryRegion<u32>) -> Result<Self> {
        params.validate()?;
        Ok(Self { params, table })
    }

    pub fn params(&self) -> &ScryptParams {
        &self.params
    }

    pub fn committed_bytes(&self) -> usize {
        self.table.committed_bytes()
    }

    /// Grows `V` ahead of the first derivation.
    ///
    /// # Errors
    /// - `OutOfMemory` if the region cannot grow; it keeps its size.
    pub fn set_memory_size(&mut self, total_bytes: usize) -> Result<()> {
        self.table.set_memory_size(total_bytes)
    }

    /// Derives `output_len` bytes.
    ///
    /// # Errors
    /// - `OutOfMemory` if `V` or `B` do not fit in memory.
    pub fn derive(&mut self, password: &[u8], salt: &[u8]) -> Result<Vec<u8>> {
        let mut out = vec![0u8; self.params.output_len];
        self.derive_into(password, salt, &mut out)?;
        Ok(out)
    }

    /// Derives `out.len()` bytes, ignoring `output_len`.
    ///
    /// # Errors
    /// - `InvalidParameter` for an empty `out`.
    /// - `OutOfMemory` if `V` or the `p` lane blocks `B` cannot be
    ///   allocated.
    pub fn derive_into(&mut self, password: &[u8], salt: &[u8], out: &mut [u8]) -> Result<()> {
        if out.is_empty() {
            return Err(Error::InvalidParameter("scrypt output length"));
        }

        let block_bytes = self.params.block_bytes();
        let r = self.params.block_size as usize;
        let lanes = self.params.parallelism as usize;

        let table_bytes = self.params.scratch_bytes().ok_or(Error::OutOfMemory {
            requested: usize::MAX,
        })?;
        let b_bytes = block_bytes.checked_mul(lanes).ok_or(Error::OutOfMemory {
            requested: usize::MAX,
        })?;
        // Validation keeps N within 2^(16r); the table size bounds it further.
        let n = self.params.cost as usize;

        self.table.set_memory_size(table_bytes)?;

        log::debug!(
            "scrypt N={} r={} p={}: {} bytes of table",
            self.params.cost,
            r,
            lanes,
            table_bytes
        );

        let mac = HmacSha256::sha256(password);

        let mut b = Zeroizing::new(try_zeroed::<u8>(b_bytes)?);
        pbkdf2(&mac, salt, 1, &mut b)?;

        let table = &mut self.table.as_mut_slice()[..table_bytes / 4];
        for (lane, block) in b.chunks_exact_mut(block_bytes).enumerate() {
            smix(block, r, n, table);
            log::trace!("scrypt lane {} of {} mixed", lane + 1, lanes);
        }
        table.zeroize();

        pbkdf2(&mac, &b, 1, out)
    }
}

/// One-shot scrypt.
///
/// # Errors
/// See [`Scrypt::new`] and [`Scrypt::derive`].
pub fn scrypt(password: &[u8], salt: &[u8], params: &ScryptParams) -> Result<Vec<u8>> {
    Scrypt::new(*params)?.derive(password, salt)
}
