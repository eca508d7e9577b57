//! Growable scratch memory for the memory-hard functions.
//!
//! A [`MemoryRegion`] is a dense array of fixed-size words (Argon2 uses
//! 1024-byte blocks, scrypt uses `u32`) committed in 64 KiB pages. Growth
//! is monotonic and idempotent: asking for a size that is already
//! committed does nothing, and a refused request leaves the region exactly
//! as it was.

use core::mem::size_of;

use zeroize::Zeroize;

use crate::error::{Error, Result};

/// Granularity of every growth request, in bytes.
pub const PAGE_SIZE: usize = 64 * 1024;

/// Page-granular, monotonically growing scratch region.
///
/// The region is exclusively owned by one KDF invocation and wiped when
/// dropped or released.
pub struct MemoryRegion<W: Clone + Default + Zeroize> {
    words: Vec<W>,
    limit: Option<usize>,
}

impl<W: Clone + Default + Zeroize> MemoryRegion<W> {
    /// Creates an empty region with no commit ceiling.
    pub fn new() -> Self {
        Self {
            words: Vec::new(),
            limit: None,
        }
    }

    /// Creates an empty region that refuses to commit more than
    /// `max_bytes` bytes.
    pub fn with_limit(max_bytes: usize) -> Self {
        Self {
            words: Vec::new(),
            limit: Some(max_bytes),
        }
    }

    /// Currently committed size in bytes. Always a whole number of pages.
    pub fn committed_bytes(&self) -> usize {
        self.words.len() * size_of::<W>()
    }

    /// Number of addressable words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Grows the region to at least `total_bytes`, rounded up to a page.
    ///
    /// # Errors
    /// - `OutOfMemory` if the rounded size overflows, exceeds the ceiling,
    ///   or the allocator refuses the reservation. The committed size is
    ///   unchanged in every error case.
    pub fn set_memory_size(&mut self, total_bytes: usize) -> Result<()> {
        let refused = Error::OutOfMemory {
            requested: total_bytes,
        };

        let rounded = total_bytes
            .div_ceil(PAGE_SIZE)
            .checked_mul(PAGE_SIZE)
            .ok_or_else(|| refused.clone())?;

        if rounded <= self.committed_bytes() {
            return Ok(());
        }

        if let Some(limit) = self.limit {
            if rounded > limit {
                log::warn!("scratch growth to {rounded} bytes exceeds ceiling of {limit} bytes");
                return Err(refused);
            }
        }

        let target = rounded.div_ceil(size_of::<W>().max(1));
        let additional = target - self.words.len();

        if self.words.try_reserve_exact(additional).is_err() {
            log::warn!("allocator refused {rounded} bytes of scratch memory");
            return Err(refused);
        }

        self.words.resize(target, W::default());
        log::debug!(
            "scratch region grown to {} bytes ({} words)",
            self.committed_bytes(),
            self.words.len()
        );

        Ok(())
    }

    /// Grows the region so that at least `count` words are addressable.
    pub fn ensure_words(&mut self, count: usize) -> Result<()> {
        let bytes = count
            .checked_mul(size_of::<W>())
            .ok_or(Error::OutOfMemory {
                requested: usize::MAX,
            })?;
        self.set_memory_size(bytes)
    }

    pub fn as_slice(&self) -> &[W] {
        &self.words
    }

    pub fn as_mut_slice(&mut self) -> &mut [W] {
        &mut self.words
    }

    /// The `index`-th run of `len` consecutive words.
    ///
    /// # Panics
    /// If the run lies outside the committed region.
    #[inline]
    pub fn chunk(&self, index: usize, len: usize) -> &[W] {
        &self.words[index * len..(index + 1) * len]
    }

    #[inline]
    pub fn chunk_mut(&mut self, index: usize, len: usize) -> &mut [W] {
        &mut self.words[index * len..(index + 1) * len]
    }

    /// Wipes and frees the region so the next invocation starts empty.
    pub fn release(&mut self) {
        self.words.zeroize();
        self.words = Vec::new();
    }
}

/// Allocates `count` default words, reporting allocator refusal as
/// `OutOfMemory` instead of aborting.
///
/// # Errors
/// - `OutOfMemory` if the byte size overflows or the allocator refuses.
pub fn try_zeroed<W: Clone + Default>(count: usize) -> Result<Vec<W>> {
    let refused = Error::OutOfMemory {
        requested: count.saturating_mul(size_of::<W>()),
    };

    let mut words = Vec::new();
    if words.try_reserve_exact(count).is_err() {
        log::warn!("allocator refused {count} words of scratch memory");
        return Err(refused);
    }
    words.resize(count, W::default());
    Ok(words)
}

impl<W: Clone + Default + Zeroize> Default for MemoryRegion<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Clone + Default + Zeroize> Drop for MemoryRegion<W> {
    fn drop(&mut self) {
        self.words.zeroize();
    }
}
