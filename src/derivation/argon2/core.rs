use zeroize::{Zeroize, Zeroizing};

use super::block::{BLOCK_LEN, Block};
use super::fill::{Layout, Schedule};
use super::params::{ARGON2_VERSION, Argon2Params, Argon2Variant};
use crate::error::{Error, Result};
use crate::hash::blake2::{Blake2Params, Blake2bHasher, blake2b_long};
use crate::hash::engine::Hasher;
use crate::primitives::memory::MemoryRegion;

/// Argon2 engine that owns its block memory.
///
/// The memory region grows on demand to the block count of the current
/// parameters and is wiped, not freed, after every derivation, so repeated
/// derivations with the same parameters allocate once.
///
/// # Example
///
/// ```rust
/// use nebula_hash::derivation::argon2::{Argon2, Argon2Params, Argon2Variant};
///
/// let params = Argon2Params {
///     mem_kib: 64,
///     time: 1,
///     variant: Argon2Variant::Argon2id,
///     ..Argon2Params::default()
/// };
///
/// let mut engine = Argon2::new(params)?;
/// let tag = engine.hash(b"password", b"somesalt")?;
/// assert_eq!(tag.len(), 32);
/// # Ok::<(), nebula_hash::Error>(())
/// ```
pub struct Argon2 {
    params: Argon2Params,
    memory: MemoryRegion<Block>,
}

impl Argon2 {
    /// # Errors
    /// - `InvalidParameter` if the parameters fail validation.
    pub fn new(params: Argon2Params) -> Result<Self> {
        Self::with_memory(params, MemoryRegion::new())
    }

    /// Uses a caller-provided region, for instance one built with
    /// [`MemoryRegion::with_limit`].
    pub fn with_memory(params: Argon2Params, memory: MemoryRegion<Block>) -> Result<Self> {
        params.validate()?;
        Ok(Self { params, memory })
    }

    pub fn params(&self) -> &Argon2Params {
        &self.params
    }

    /// Bytes of block memory currently committed.
    pub fn committed_bytes(&self) -> usize {
        self.memory.committed_bytes()
    }

    /// Grows block memory ahead of the first derivation.
    ///
    /// # Errors
    /// - `OutOfMemory` if the region cannot grow; it keeps its size.
    pub fn set_memory_size(&mut self, total_bytes: usize) -> Result<()> {
        self.memory.set_memory_size(total_bytes)
    }

    /// Derives a `tag_len`-byte tag.
    ///
    /// # Errors
    /// - `InvalidParameter` for a salt shorter than 8 bytes or inputs that
    ///   do not fit in 32 bits.
    /// - `OutOfMemory` if the block memory cannot be committed.
    pub fn hash(&mut self, password: &[u8], salt: &[u8]) -> Result<Vec<u8>> {
        self.hash_with_schedule(password, salt, Schedule::SliceBarrier)
    }

    /// Derives a tag with an explicit segment schedule. Only
    /// [`Schedule::SliceBarrier`] yields Argon2 output.
    pub fn hash_with_schedule(
        &mut self,
        password: &[u8],
        salt: &[u8],
        schedule: Schedule,
    ) -> Result<Vec<u8>> {
        Argon2Params::validate_inputs(password, salt)?;

        let layout = Layout::new(&self.params);
        let total = layout.total_blocks as usize;
        self.memory.ensure_words(total)?;

        log::debug!(
            "argon2 {:?}: {} blocks, {} lanes, {} passes",
            self.params.variant,
            total,
            layout.lanes,
            layout.passes
        );

        let h0 = Zeroizing::new(initial_hash(password, salt, &self.params)?);
        let memory = &mut self.memory.as_mut_slice()[..total];

        let result = seed_lanes(memory, &layout, &h0).and_then(|()| {
            layout.fill(memory, schedule);
            final_tag(memory, &layout, self.params.tag_len)
        });

        memory.iter_mut().for_each(Zeroize::zeroize);
        result
    }
}

/// H0 = BLAKE2b-512(p ‖ T ‖ m ‖ t ‖ v ‖ y ‖ |P| ‖ P ‖ |S| ‖ S ‖ |K| ‖ K ‖ |X| ‖ X),
/// RFC 9106 §3.2, with `m` as requested rather than as laid out.
fn initial_hash(password: &[u8], salt: &[u8], params: &Argon2Params) -> Result<[u8; 64]> {
    let mut hasher = Blake2bHasher::blake2b(&Blake2Params::new(64))?;

    for word in [
        params.lanes,
        params.tag_len as u32,
        params.mem_kib,
        params.time,
        ARGON2_VERSION,
        params.variant as u32,
    ] {
        hasher.update(&word.to_le_bytes())?;
    }

    let secret = params.secret.as_deref().unwrap_or_default();
    let associated = params.associated_data.as_deref().unwrap_or_default();
    for field in [password, salt, secret, associated] {
        hasher.update(&(field.len() as u32).to_le_bytes())?;
        hasher.update(field)?;
    }

    let mut h0 = [0u8; 64];
    hasher.finalize_into(&mut h0)?;
    Ok(h0)
}

/// B[lane][j] = H'^1024(H0 ‖ LE32(j) ‖ LE32(lane)) for j in {0, 1}.
fn seed_lanes(memory: &mut [Block], layout: &Layout, h0: &[u8; 64]) -> Result<()> {
    let mut input = Zeroizing::new([0u8; 72]);
    input[..64].copy_from_slice(h0);

    for lane in 0..layout.lanes {
        input[68..].copy_from_slice(&lane.to_le_bytes());
        for j in 0..2u32 {
            input[64..68].copy_from_slice(&j.to_le_bytes());
            let bytes = Zeroizing::new(blake2b_long(BLOCK_LEN, &input[..])?);
            memory[layout.index(lane, j)] = Block::from_bytes(&bytes);
        }
    }
    Ok(())
}

/// XOR of the last block of every lane, stretched by H'.
fn final_tag(memory: &[Block], layout: &Layout, tag_len: usize) -> Result<Vec<u8>> {
    let mut last = Block::ZERO;
    for lane in 0..layout.lanes {
        last.in_place_xor(&memory[layout.index(lane, layout.lane_len - 1)]);
    }

    let bytes = Zeroizing::new(last.to_bytes());
    blake2b_long(tag_len, &bytes[..])
}

/// One-shot Argon2 with the variant in `params`.
///
/// # Errors
/// See [`Argon2::hash`].
pub fn argon2(password: &[u8], salt: &[u8], params: &Argon2Params) -> Result<Vec<u8>> {
    Argon2::new(params.clone())?.hash(password, salt)
}

fn with_variant(params: &Argon2Params, variant: Argon2Variant) -> Argon2Params {
    Argon2Params {
        variant,
        ..params.clone()
    }
}

/// Argon2d, ignoring `params.variant`.
pub fn argon2d(password: &[u8], salt: &[u8], params: &Argon2Params) -> Result<Vec<u8>> {
    let params = with_variant(params, Argon2Variant::Argon2d);
    argon2(password, salt, &params)
}

/// Argon2i, ignoring `params.variant`.
pub fn argon2i(password: &[u8], salt: &[u8], params: &Argon2Params) -> Result<Vec<u8>> {
    let params = with_variant(params, Argon2Variant::Argon2i);
    argon2(password, salt, &params)
}

/// Argon2id, ignoring `params.variant`.
pub fn argon2id(password: &[u8], salt: &[u8], params: &Argon2Params) -> Result<Vec<u8>> {
    let params = with_variant(params, Argon2Variant::Argon2id);
    argon2(password, salt, &params)
}

impl From<Argon2Variant> for u32 {
    fn from(variant: Argon2Variant) -> Self {
        variant as u32
    }
}

impl TryFrom<u32> for Argon2Variant {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        Argon2Variant::from_type(value).ok_or(Error::InvalidParameter("argon2 type"))
    }
}
