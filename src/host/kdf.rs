use zeroize::Zeroizing;

use super::staging::{STAGING_LEN, Staging};
use crate::derivation::argon2::{Argon2, Argon2Params};
use crate::derivation::scrypt::{Scrypt, ScryptParams};
use crate::error::{Error, Result};

/// Scratch memory committed by the first [`MemoryHardHost::buffer`] call.
pub const INITIAL_SCRATCH: usize = 512 * 1024;

enum Engine {
    Argon2(Argon2),
    Scrypt(Scrypt),
}

/// A memory-hard KDF driven through a staging buffer.
///
/// The password and salt are staged back to back; the derived key is
/// written over them.
pub struct MemoryHardHost {
    engine: Engine,
    staging: Staging,
}

impl MemoryHardHost {
    pub fn argon2(params: Argon2Params) -> Result<Self> {
        Ok(Self {
            engine: Engine::Argon2(Argon2::new(params)?),
            staging: Staging::new(),
        })
    }

    pub fn scrypt(params: ScryptParams) -> Result<Self> {
        Ok(Self {
            engine: Engine::Scrypt(Scrypt::new(params)?),
            staging: Staging::new(),
        })
    }

    /// Bytes of scratch memory committed so far.
    pub fn committed_bytes(&self) -> usize {
        match &self.engine {
            Engine::Argon2(engine) => engine.committed_bytes(),
            Engine::Scrypt(engine) => engine.committed_bytes(),
        }
    }

    /// Grows scratch memory to at least `total_bytes`.
    ///
    /// # Errors
    /// - `OutOfMemory` if the region cannot grow; it keeps its size.
    pub fn set_memory_size(&mut self, total_bytes: usize) -> Result<()> {
        match &mut self.engine {
            Engine::Argon2(engine) => engine.set_memory_size(total_bytes),
            Engine::Scrypt(engine) => engine.set_memory_size(total_bytes),
        }
    }

    /// The staging buffer. The first call also commits
    /// [`INITIAL_SCRATCH`] bytes of scratch memory.
    pub fn buffer(&mut self) -> Result<&mut [u8]> {
        if self.committed_bytes() == 0 {
            self.set_memory_size(INITIAL_SCRATCH)?;
        }
        Ok(self.staging.as_mut_slice())
    }

    /// Derives a key from the staged `password ‖ salt` and writes it to
    /// the front of the staging buffer. Returns the key length.
    ///
    /// # Errors
    /// - `InvalidParameter` if the inputs or the key do not fit in the
    ///   staging buffer, or the KDF rejects them.
    /// - `OutOfMemory` if scratch memory cannot grow.
    pub fn calculate(&mut self, password_len: usize, salt_len: usize) -> Result<usize> {
        let total = password_len
            .checked_add(salt_len)
            .ok_or(Error::InvalidParameter("staging length"))?;
        let input = Zeroizing::new(self.staging.input(total)?.to_vec());
        let (password, salt) = input.split_at(password_len);

        let key = Zeroizing::new(match &mut self.engine {
            Engine::Argon2(engine) => engine.hash(password, salt)?,
            Engine::Scrypt(engine) => engine.derive(password, salt)?,
        });

        if key.len() > STAGING_LEN {
            return Err(Error::InvalidParameter("output length"));
        }
        self.staging.write(&key)
    }
}
