//! Parameter definitions and validation for Argon2.

use crate::error::Error;

/// Argon2 version 1.3.
pub const ARGON2_VERSION: u32 = 0x13;

/// Addressing mode, encoded as the `y` field of H0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Argon2Variant {
    /// Data-dependent addressing throughout.
    Argon2d = 0,
    /// Data-independent addressing throughout.
    Argon2i = 1,
    /// Data-independent for the first two slices of the first pass,
    /// data-dependent afterwards.
    #[default]
    Argon2id = 2,
}

impl Argon2Variant {
    /// Whether reference indices for `(pass, slice)` come from the address
    /// generator instead of the previous block.
    pub(crate) fn data_independent(self, pass: u32, slice: u32) -> bool {
        match self {
            Argon2Variant::Argon2d => false,
            Argon2Variant::Argon2i => true,
            Argon2Variant::Argon2id => pass == 0 && slice < 2,
        }
    }

    /// Decodes the `y` field.
    pub fn from_type(value: u32) -> Option<Self> {
        match value {
            0 => Some(Argon2Variant::Argon2d),
            1 => Some(Argon2Variant::Argon2i),
            2 => Some(Argon2Variant::Argon2id),
            _ => None,
        }
    }
}

/// Configuration parameters for Argon2.
///
/// For password hashing OWASP recommends Argon2id with at least 19 MiB and
/// 2 passes, or 46 MiB and 1 pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Argon2Params {
    /// Memory size in KiB (minimum 8 × lanes). Rounded down to a multiple
    /// of 4 × lanes blocks for the memory layout only.
    pub mem_kib: u32,
    /// Number of passes over memory (minimum 1).
    pub time: u32,
    /// Degree of parallelism (1..=2^24 - 1).
    pub lanes: u32,
    /// Length of the output tag in bytes (minimum 4).
    pub tag_len: usize,
    pub variant: Argon2Variant,
    /// Optional secret key for keyed hashing.
    pub secret: Option<Vec<u8>>,
    /// Optional associated data.
    pub associated_data: Option<Vec<u8>>,
}

/// Reasons a parameter set is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argon2ParamError {
    /// Memory must be at least 8 × lanes KiB.
    MemoryTooSmall,
    /// Lanes must be at least 1.
    TooFewLanes,
    /// Lanes must fit in 24 bits.
    TooManyLanes,
    /// Time (passes) must be at least 1.
    TooFewPasses,
    /// Tag length must be at least 4 bytes and fit in 32 bits.
    TagLengthInvalid,
    /// Salt must be at least 8 bytes.
    SaltTooShort,
    /// Password, salt, secret or associated data longer than 2^32 - 1 bytes.
    InputTooLong,
}

impl From<Argon2ParamError> for Error {
    fn from(err: Argon2ParamError) -> Self {
        Error::InvalidParameter(match err {
            Argon2ParamError::MemoryTooSmall => "argon2 memory size",
            Argon2ParamError::TooFewLanes | Argon2ParamError::TooManyLanes => "argon2 lanes",
            Argon2ParamError::TooFewPasses => "argon2 passes",
            Argon2ParamError::TagLengthInvalid => "argon2 tag length",
            Argon2ParamError::SaltTooShort => "argon2 salt",
            Argon2ParamError::InputTooLong => "argon2 input length",
        })
    }
}

fn fits_u32(bytes: &[u8]) -> bool {
    u32::try_from(bytes.len()).is_ok()
}

impl Argon2Params {
    pub fn validate(&self) -> Result<(), Argon2ParamError> {
        if self.lanes < 1 {
            return Err(Argon2ParamError::TooFewLanes);
        }

        if self.lanes > 0x00FF_FFFF {
            return Err(Argon2ParamError::TooManyLanes);
        }

        if self.time < 1 {
            return Err(Argon2ParamError::TooFewPasses);
        }

        if self.mem_kib < 8 * self.lanes {
            return Err(Argon2ParamError::MemoryTooSmall);
        }

        if self.tag_len < 4 || u32::try_from(self.tag_len).is_err() {
            return Err(Argon2ParamError::TagLengthInvalid);
        }

        let secret_ok = self.secret.as_deref().is_none_or(fits_u32);
        let data_ok = self.associated_data.as_deref().is_none_or(fits_u32);
        if !secret_ok || !data_ok {
            return Err(Argon2ParamError::InputTooLong);
        }

        Ok(())
    }

    /// Checks the per-call inputs.
    pub(crate) fn validate_inputs(password: &[u8], salt: &[u8]) -> Result<(), Argon2ParamError> {
        if salt.len() < 8 {
            return Err(Argon2ParamError::SaltTooShort);
        }
        if !fits_u32(password) || !fits_u32(salt) {
            return Err(Argon2ParamError::InputTooLong);
        }
        Ok(())
    }

    /// Blocks actually laid out: `mem_kib` rounded down to a multiple of
    /// `4 × lanes`.
    pub fn memory_blocks(&self) -> u32 {
        let quantum = 4 * self.lanes.max(1);
        (self.mem_kib / quantum) * quantum
    }
}

impl Default for Argon2Params {
    /// 64 MiB, 3 passes, 1 lane, 32-byte Argon2id tag.
    fn default() -> Self {
        Self {
            mem_kib: 64 * 1024,
            time: 3,
            lanes: 1,
            tag_len: 32,
            variant: Argon2Variant::Argon2id,
            secret: None,
            associated_data: None,
        }
    }
}
