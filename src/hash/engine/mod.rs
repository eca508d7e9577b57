//! The streaming-hash state machine.
//!
//! Every block hash in the crate is a [`BlockCodec`] (block size, word
//! order, compression step) paired with a [`FinalizationPadder`] and driven
//! by one [`StreamingHasher`]. Hashers that do not fit the single-chain
//! model (BLAKE3's tree, the checksums) implement [`Hasher`] directly.
//!
//! # Lifecycle
//!
//! `new` (or `reset`) → any number of `update` calls → `finalize_into`.
//! What happens after finalization is chosen per codec through
//! [`FinalizePolicy`].

mod codec;
mod padding;
mod snapshot;
mod stream;

pub use codec::{BlockCodec, Buffering, FinalizePolicy};
pub use padding::{FinalizationPadder, KeccakPadding, LengthField, MdPadding, ZeroPadding};
pub use snapshot::{SnapshotReader, SnapshotWriter, StateSnapshot};
pub(crate) use snapshot::tag;
pub use stream::{MAX_BLOCK_LEN, StreamingHasher};

use crate::error::Result;

/// Uniform incremental interface implemented by every hasher.
pub trait Hasher {
    /// Absorbs `data`. A zero-length slice is a no-op.
    fn update(&mut self, data: &[u8]) -> Result<()>;

    /// Writes the digest into the front of `out` and returns its length.
    fn finalize_into(&mut self, out: &mut [u8]) -> Result<usize>;

    /// Digest length in bytes for the configured parameters.
    fn output_len(&self) -> usize;

    /// Equivalent to re-initializing with the same parameters.
    fn reset(&mut self);

    fn finalize_vec(&mut self) -> Result<Vec<u8>> {
        let mut out = vec![0u8; self.output_len()];
        let len = self.finalize_into(&mut out)?;
        out.truncate(len);
        Ok(out)
    }
}
