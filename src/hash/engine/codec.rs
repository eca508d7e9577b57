use super::padding::FinalizationPadder;
use super::snapshot::{SnapshotReader, SnapshotWriter};
use crate::error::Result;

/// When a completely filled buffer is handed to the compression function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Buffering {
    /// A full block is compressed as soon as it is complete.
    Eager,
    /// A full block is held back until more input arrives, because the last
    /// block must be compressed with a finalization flag (BLAKE2).
    Lazy,
}

/// What a finalized state does with further `update`/`finalize` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalizePolicy {
    /// Both calls fail with `AlreadyFinalized`.
    Reject,
    /// `update` is ignored and `finalize` returns the same bytes again.
    Replay,
}

/// A fixed-block compression function together with its chaining value.
///
/// The streaming engine owns buffering and byte counting; the codec only
/// ever sees whole blocks of `block_len()` bytes.
pub trait BlockCodec: Clone {
    /// Padding rule applied to the final partial block.
    type Padder: FinalizationPadder;

    /// Algorithm identifier written into snapshots.
    const SNAPSHOT_TAG: u8;

    const BUFFERING: Buffering = Buffering::Eager;

    const AFTER_FINAL: FinalizePolicy = FinalizePolicy::Reject;

    /// Block size in bytes. Never larger than the engine buffer.
    fn block_len(&self) -> usize;

    /// Number of digest bytes produced by `extract`.
    fn output_len(&self) -> usize;

    fn padder(&self) -> Self::Padder;

    /// Restores the initial chaining value for the codec's parameters.
    fn reset(&mut self);

    /// Writes input that is absorbed before any message byte (a keyed
    /// BLAKE2 key block) and returns its length.
    fn write_prefix(&self, _out: &mut [u8]) -> usize {
        0
    }

    /// Processes one block. `consumed` counts every byte absorbed so far,
    /// this block included.
    fn compress(&mut self, block: &[u8], consumed: u128);

    /// Processes the final padded block. Defaults to a plain compression.
    fn compress_last(&mut self, block: &[u8], consumed: u128) {
        self.compress(block, consumed);
    }

    /// Serializes the finalized chaining value into `out`.
    fn extract(&self, out: &mut [u8]);

    fn write_state(&self, writer: &mut SnapshotWriter);

    fn read_state(reader: &mut SnapshotReader<'_>) -> Result<Self>;
}
