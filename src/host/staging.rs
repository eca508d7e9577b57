use zeroize::Zeroize;

use crate::error::{Error, Result};

/// Size of the staging buffer in bytes.
pub const STAGING_LEN: usize = 16 * 1024;

/// Fixed-size input/output buffer shared between a host and one session.
///
/// Input is placed at the front with [`Staging::write`] (or through
/// [`Staging::as_mut_slice`]) and consumed by length; digests are written
/// back over the same bytes. The buffer is wiped when dropped.
pub struct Staging {
    bytes: Vec<u8>,
}

impl Staging {
    pub fn new() -> Self {
        Self {
            bytes: vec![0u8; STAGING_LEN],
        }
    }

    /// Copies `data` to the front of the buffer and returns its length.
    ///
    /// # Errors
    /// - `InvalidParameter` if `data` is longer than [`STAGING_LEN`].
    pub fn write(&mut self, data: &[u8]) -> Result<usize> {
        self.bytes
            .get_mut(..data.len())
            .ok_or(Error::InvalidParameter("staging length"))?
            .copy_from_slice(data);
        Ok(data.len())
    }

    /// The first `len` bytes.
    ///
    /// # Errors
    /// - `InvalidParameter` if `len` exceeds [`STAGING_LEN`].
    pub fn input(&self, len: usize) -> Result<&[u8]> {
        self.bytes
            .get(..len)
            .ok_or(Error::InvalidParameter("staging length"))
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

impl Default for Staging {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Staging {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}
