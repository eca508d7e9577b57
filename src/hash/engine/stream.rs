//! Generic incremental engine shared by every block hash.
//!
//! The engine accepts input in arbitrary chunks, keeps the unprocessed
//! tail in a buffer of at most one block, feeds whole blocks to the codec
//! as they complete, and applies the codec's padder at finalization.

use zeroize::Zeroize;

use super::codec::{BlockCodec, Buffering, FinalizePolicy};
use super::padding::FinalizationPadder;
use super::snapshot::{SnapshotReader, SnapshotWriter, StateSnapshot};
use super::Hasher;
use crate::error::{Error, Result};

/// Largest block any codec uses (the SHAKE128 rate).
pub const MAX_BLOCK_LEN: usize = 168;

/// Incremental hashing state for one codec.
///
/// `N` is the buffer capacity and must be at least `codec.block_len()`.
/// Between calls the buffer holds fewer than one block for eager codecs,
/// and between one byte and one full block for lazy codecs once any input
/// has been seen.
#[derive(Clone)]
pub struct StreamingHasher<C: BlockCodec, const N: usize> {
    codec: C,
    buffer: [u8; N],
    buffered: usize,
    consumed: u128,
    finalized: bool,
}

impl<C: BlockCodec, const N: usize> StreamingHasher<C, N> {
    /// Wraps a freshly initialized codec.
    pub fn new(codec: C) -> Self {
        debug_assert!(codec.block_len() <= N && N <= MAX_BLOCK_LEN);

        let mut hasher = Self {
            codec,
            buffer: [0u8; N],
            buffered: 0,
            consumed: 0,
            finalized: false,
        };
        hasher.absorb_prefix();
        hasher
    }

    fn absorb_prefix(&mut self) {
        let mut prefix = [0u8; N];
        let len = self.codec.write_prefix(&mut prefix);
        if len > 0 {
            self.absorb(&prefix[..len]);
            prefix.zeroize();
        }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub(crate) fn codec_mut(&mut self) -> &mut C {
        &mut self.codec
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Total bytes accepted so far, prefix included.
    pub fn total_len(&self) -> u128 {
        self.consumed + self.buffered as u128
    }

    /// Bytes waiting in the buffer.
    pub fn pending(&self) -> usize {
        self.buffered
    }

    #[inline]
    fn compress_buffer(&mut self, block_len: usize) {
        self.consumed += block_len as u128;
        self.codec.compress(&self.buffer[..block_len], self.consumed);
        self.buffered = 0;
    }

    /// Appends input without checking the finalized flag.
    pub(crate) fn absorb(&mut self, mut data: &[u8]) {
        if data.is_empty() {
            return;
        }

        let block_len = self.codec.block_len();
        let hold_last = C::BUFFERING == Buffering::Lazy;

        if self.buffered > 0 {
            let take = (block_len - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];

            if self.buffered < block_len || (hold_last && data.is_empty()) {
                return;
            }
            self.compress_buffer(block_len);
        }

        // Whole blocks go straight from the caller's slice.
        while data.len() > block_len || (!hold_last && data.len() == block_len) {
            let (block, rest) = data.split_at(block_len);
            self.consumed += block_len as u128;
            self.codec.compress(block, self.consumed);
            data = rest;
        }

        self.buffer[..data.len()].copy_from_slice(data);
        self.buffered = data.len();
    }

    fn finish(&mut self) {
        let block_len = self.codec.block_len();
        let total = self.total_len();

        let mut scratch = [0u8; 2 * MAX_BLOCK_LEN];
        scratch[..self.buffered].copy_from_slice(&self.buffer[..self.buffered]);

        let padder = self.codec.padder();
        let padded = &mut scratch[..2 * block_len];
        let blocks = padder.pad(padded, self.buffered, block_len, total);

        for index in 0..blocks {
            let block = &scratch[index * block_len..(index + 1) * block_len];
            if index + 1 == blocks {
                self.codec.compress_last(block, total);
            } else {
                self.codec.compress(block, total);
            }
        }

        scratch.zeroize();
        self.buffer.zeroize();
        self.buffered = 0;
        self.finalized = true;
    }

    /// Finalizes into `out` and returns the number of digest bytes written.
    ///
    /// # Errors
    /// - `InvalidParameter` if `out` is shorter than the digest; the state
    ///   is left untouched.
    /// - `AlreadyFinalized` on a second call for codecs that reject reuse.
    pub fn finalize_into(&mut self, out: &mut [u8]) -> Result<usize> {
        let len = self.codec.output_len();
        if out.len() < len {
            return Err(Error::InvalidParameter("output buffer shorter than digest"));
        }

        self.seal()?;
        self.codec.extract(&mut out[..len]);
        Ok(len)
    }

    /// Applies the final padding once; later calls follow the codec's
    /// finalize policy.
    pub(crate) fn seal(&mut self) -> Result<()> {
        if self.finalized {
            return match C::AFTER_FINAL {
                FinalizePolicy::Reject => Err(Error::AlreadyFinalized),
                FinalizePolicy::Replay => Ok(()),
            };
        }
        self.finish();
        Ok(())
    }

    /// Hashes `input` in one pass with a fresh codec.
    ///
    /// `out` receives `codec.output_len()` bytes and must be exactly that
    /// long.
    pub(crate) fn oneshot(codec: C, input: &[u8], out: &mut [u8]) {
        let mut hasher = Self::new(codec);
        hasher.absorb(input);
        hasher.digest_into(out);
    }

    /// Consumes the hasher and writes its digest into `out`, which must be
    /// exactly `output_len()` bytes. Padding is applied unless already done.
    pub(crate) fn digest_into(mut self, out: &mut [u8]) {
        if !self.finalized {
            self.finish();
        }
        self.codec.extract(out);
    }

    /// Restores the initial state for the same parameters.
    pub fn reset(&mut self) {
        self.codec.reset();
        self.buffer.zeroize();
        self.buffered = 0;
        self.consumed = 0;
        self.finalized = false;
        self.absorb_prefix();
    }
}

impl<C: BlockCodec, const N: usize> Hasher for StreamingHasher<C, N> {
    fn update(&mut self, data: &[u8]) -> Result<()> {
        if self.finalized {
            return match C::AFTER_FINAL {
                FinalizePolicy::Reject => Err(Error::AlreadyFinalized),
                FinalizePolicy::Replay => Ok(()),
            };
        }
        self.absorb(data);
        Ok(())
    }

    fn finalize_into(&mut self, out: &mut [u8]) -> Result<usize> {
        StreamingHasher::finalize_into(self, out)
    }

    fn output_len(&self) -> usize {
        self.codec.output_len()
    }

    fn reset(&mut self) {
        StreamingHasher::reset(self)
    }
}

impl<C: BlockCodec, const N: usize> StateSnapshot for StreamingHasher<C, N> {
    /// Layout after the header: codec fields, pending bytes (length
    /// prefixed), bytes compressed so far (u128), finalized flag (u8).
    fn snapshot(&self) -> Vec<u8> {
        let mut writer = SnapshotWriter::new(C::SNAPSHOT_TAG);
        self.codec.write_state(&mut writer);
        writer.put_bytes(&self.buffer[..self.buffered]);
        writer.put_u128(self.consumed);
        writer.put_bool(self.finalized);
        writer.finish()
    }

    fn restore(bytes: &[u8]) -> Result<Self> {
        let mut reader = SnapshotReader::new(bytes, C::SNAPSHOT_TAG)?;
        let codec = C::read_state(&mut reader)?;
        let block_len = codec.block_len();
        if block_len > N {
            return Err(Error::MalformedState);
        }

        let pending = reader.bytes(block_len)?;
        let consumed = reader.u128()?;
        let finalized = reader.bool()?;
        reader.finish()?;

        let too_full = C::BUFFERING == Buffering::Eager && pending.len() == block_len;
        if too_full || (finalized && !pending.is_empty()) {
            return Err(Error::MalformedState);
        }

        let mut buffer = [0u8; N];
        buffer[..pending.len()].copy_from_slice(pending);

        Ok(Self {
            codec,
            buffer,
            buffered: pending.len(),
            consumed,
            finalized,
        })
    }
}
