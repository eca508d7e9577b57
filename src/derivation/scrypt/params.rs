//! Parameter definitions and validation for scrypt.

use crate::error::Error;

/// Configuration parameters for scrypt (RFC 7914).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScryptParams {
    /// CPU/memory cost `N`: a power of two greater than 1.
    pub cost: u64,
    /// Block size `r` (minimum 1).
    pub block_size: u32,
    /// Parallelization `p` (minimum 1).
    pub parallelism: u32,
    /// Length of the derived key in bytes (minimum 1).
    pub output_len: usize,
}

/// Reasons a parameter set is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScryptParamError {
    /// `N` is not a power of two greater than 1.
    CostNotPowerOfTwo,
    /// `N` must be below `2^(16 r)`.
    CostTooLarge,
    BlockSizeZero,
    ParallelismZero,
    /// `r · p` must be below `2^30`.
    ParallelismTooLarge,
    OutputLengthZero,
}

impl From<ScryptParamError> for Error {
    fn from(err: ScryptParamError) -> Self {
        Error::InvalidParameter(match err {
            ScryptParamError::CostNotPowerOfTwo | ScryptParamError::CostTooLarge => "scrypt cost",
            ScryptParamError::BlockSizeZero => "scrypt block size",
            ScryptParamError::ParallelismZero | ScryptParamError::ParallelismTooLarge => {
                "scrypt parallelism"
            }
            ScryptParamError::OutputLengthZero => "scrypt output length",
        })
    }
}

impl ScryptParams {
    /// Builds parameters from `log2(N)`.
    pub fn new(log_n: u8, block_size: u32, parallelism: u32, output_len: usize) -> Self {
        Self {
            cost: 1u64.checked_shl(log_n as u32).unwrap_or(0),
            block_size,
            parallelism,
            output_len,
        }
    }

    pub fn validate(&self) -> Result<(), ScryptParamError> {
        if self.cost < 2 || !self.cost.is_power_of_two() {
            return Err(ScryptParamError::CostNotPowerOfTwo);
        }

        if self.block_size < 1 {
            return Err(ScryptParamError::BlockSizeZero);
        }

        let log_n = self.cost.trailing_zeros() as u64;
        if log_n >= 16 * self.block_size as u64 {
            return Err(ScryptParamError::CostTooLarge);
        }

        if self.parallelism < 1 {
            return Err(ScryptParamError::ParallelismZero);
        }

        if self.block_size as u64 * self.parallelism as u64 >= 1 << 30 {
            return Err(ScryptParamError::ParallelismTooLarge);
        }

        if self.output_len < 1 {
            return Err(ScryptParamError::OutputLengthZero);
        }

        Ok(())
    }

    /// Bytes in one `B_i` block: `128 · r`.
    pub fn block_bytes(&self) -> usize {
        128 * self.block_size as usize
    }

    /// Bytes of scratch memory `V`: `128 · r · N`, or `None` if that does
    /// not fit in the address space.
    pub fn scratch_bytes(&self) -> Option<usize> {
        let cost = usize::try_from(self.cost).ok()?;
        self.block_bytes().checked_mul(cost)
    }
}

impl Default for ScryptParams {
    /// `N = 2^14`, `r = 8`, `p = 1`, 32-byte key.
    fn default() -> Self {
        Self::new(14, 8, 1, 32)
    }
}
