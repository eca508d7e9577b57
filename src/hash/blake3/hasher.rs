use zeroize::{Zeroize, ZeroizeOnDrop};

use super::compress::{BLOCK_LEN, CHUNK_LEN, IV, KEY_LEN, OUT_LEN, flags};
use super::tree::{
    ChunkState, Output, largest_power_of_two_leq, parent_cv, parent_output, root_output,
    subtree_children,
};
use crate::error::{Error, Result};
use crate::hash::engine::{Hasher, SnapshotReader, SnapshotWriter, StateSnapshot, tag};
use crate::primitives::endian::{Endian, load_words_u32};

/// Deepest possible chaining-value stack: one entry per bit of a 2^64
/// byte input measured in chunks.
const MAX_DEPTH: usize = 54;

/// Incremental BLAKE3 in hash, keyed or key-derivation mode.
///
/// Completed chunks are pushed onto a stack of subtree chaining values.
/// Merging is lazy: before a new value is pushed, the stack is reduced to
/// `popcount(chunks so far)` entries, so the right edge of the tree is
/// never compressed until finalization decides which node is the root.
///
/// After finalization `update` fails with `AlreadyFinalized`; every
/// finalization and output reader replays the same output stream.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Blake3Hasher {
    key: [u32; 8],
    flags: u32,
    chunk: ChunkState,
    stack: Vec<[u32; 8]>,
    output_len: usize,
    finalized: bool,
}

impl Blake3Hasher {
    fn with_key(key: [u32; 8], mode: u32) -> Self {
        Self {
            key,
            flags: mode,
            chunk: ChunkState::new(&key, 0, mode),
            stack: Vec::with_capacity(MAX_DEPTH),
            output_len: OUT_LEN,
            finalized: false,
        }
    }

    /// Plain hashing with a 32-byte default digest.
    pub fn new() -> Self {
        Self::with_key(IV, 0)
    }

    /// Keyed hashing (MAC mode).
    pub fn new_keyed(key: &[u8; KEY_LEN]) -> Self {
        let mut words = [0u32; 8];
        load_words_u32(key, &mut words, Endian::Little);
        Self::with_key(words, flags::KEYED_HASH)
    }

    /// Key derivation: `context` selects a derived key, the key material is
    /// then supplied through `update`.
    pub fn new_derive_key(context: &str) -> Self {
        let context_key = root_output(context.as_bytes(), &IV, flags::DERIVE_KEY_CONTEXT);
        let mut bytes = [0u8; KEY_LEN];
        bytes.copy_from_slice(&context_key.root_block(0)[..KEY_LEN]);

        let mut words = [0u32; 8];
        load_words_u32(&bytes, &mut words, Endian::Little);
        bytes.zeroize();
        Self::with_key(words, flags::DERIVE_KEY_MATERIAL)
    }

    /// Sets the length produced by [`Hasher::finalize_into`].
    ///
    /// # Errors
    /// - `InvalidParameter` if `len` is zero.
    pub fn with_output_len(mut self, len: usize) -> Result<Self> {
        if len == 0 {
            return Err(Error::InvalidParameter("output length"));
        }
        self.output_len = len;
        Ok(self)
    }

    /// Total input bytes absorbed.
    pub fn count(&self) -> u64 {
        self.chunk.counter * CHUNK_LEN as u64 + self.chunk.len() as u64
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    fn merge_stack(&mut self, total_chunks: u64) {
        let target = total_chunks.count_ones() as usize;
        while self.stack.len() > target {
            let (Some(right), Some(left)) = (self.stack.pop(), self.stack.pop()) else {
                break;
            };
            self.stack.push(parent_cv(&left, &right, &self.key, self.flags));
        }
    }

    fn push_cv(&mut self, cv: [u32; 8], chunk_counter: u64) {
        self.merge_stack(chunk_counter);
        self.stack.push(cv);
    }

    fn absorb(&mut self, mut input: &[u8]) {
        if self.chunk.len() > 0 {
            let take = (CHUNK_LEN - self.chunk.len()).min(input.len());
            self.chunk.update(&input[..take]);
            input = &input[take..];
            if input.is_empty() {
                return;
            }

            // More input follows, so this chunk is not the root.
            let cv = self.chunk.output().chaining_value();
            let counter = self.chunk.counter;
            self.push_cv(cv, counter);
            self.chunk = ChunkState::new(&self.key, counter + 1, self.flags);
        }

        // Hash whole subtrees straight from the input. A subtree must be a
        // power-of-two number of chunks that evenly divides the chunks seen
        // so far, or the merge order would differ from single-call hashing.
        while input.len() > CHUNK_LEN {
            let mut subtree_len = largest_power_of_two_leq(input.len());
            let so_far = self.chunk.counter * CHUNK_LEN as u64;
            while ((subtree_len - 1) as u64) & so_far != 0 {
                subtree_len /= 2;
            }

            let counter = self.chunk.counter;
            let subtree_chunks = (subtree_len / CHUNK_LEN) as u64;
            let (subtree, rest) = input.split_at(subtree_len);

            if subtree_len <= CHUNK_LEN {
                let mut chunk = ChunkState::new(&self.key, counter, self.flags);
                chunk.update(subtree);
                self.push_cv(chunk.output().chaining_value(), counter);
            } else {
                let (left, right) = subtree_children(subtree, &self.key, counter, self.flags);
                self.push_cv(left, counter);
                self.push_cv(right, counter + subtree_chunks / 2);
            }

            self.chunk.counter += subtree_chunks;
            input = rest;
        }

        if !input.is_empty() {
            self.chunk.update(input);
            self.merge_stack(self.chunk.counter);
        }
    }

    fn final_output(&self) -> Output {
        if self.stack.is_empty() {
            return self.chunk.output();
        }

        let mut remaining = self.stack.len();
        let mut output = if self.chunk.len() > 0 {
            self.chunk.output()
        } else {
            // An empty current chunk means the last push was a subtree
            // pair, so at least two values are waiting.
            remaining -= 2;
            parent_output(
                &self.stack[remaining],
                &self.stack[remaining + 1],
                &self.key,
                self.flags,
            )
        };

        while remaining > 0 {
            remaining -= 1;
            output = parent_output(
                &self.stack[remaining],
                &output.chaining_value(),
                &self.key,
                self.flags,
            );
        }
        output
    }

    /// Finalizes and returns a seekable reader over the output stream.
    pub fn finalize_xof(&mut self) -> OutputReader {
        self.finalized = true;
        OutputReader::new(self.final_output())
    }
}

impl Default for Blake3Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for Blake3Hasher {
    fn update(&mut self, data: &[u8]) -> Result<()> {
        if self.finalized {
            return Err(Error::AlreadyFinalized);
        }
        self.absorb(data);
        Ok(())
    }

    fn finalize_into(&mut self, out: &mut [u8]) -> Result<usize> {
        let len = self.output_len;
        if out.len() < len {
            return Err(Error::InvalidParameter("output buffer shorter than digest"));
        }
        self.finalize_xof().read(&mut out[..len]);
        Ok(len)
    }

    fn output_len(&self) -> usize {
        self.output_len
    }

    fn reset(&mut self) {
        self.chunk = ChunkState::new(&self.key, 0, self.flags);
        self.stack.zeroize();
        self.finalized = false;
    }
}

impl StateSnapshot for Blake3Hasher {
    /// Layout after the header: key words, mode flags (u32), output length
    /// (u64), chunk chaining value, chunk counter (u64), blocks compressed
    /// (u8), buffered block bytes (length prefixed), stack depth (u8) and
    /// stack entries, finalized flag (u8).
    fn snapshot(&self) -> Vec<u8> {
        let mut writer = SnapshotWriter::new(tag::BLAKE3);
        writer.put_words_u32(&self.key);
        writer.put_u32(self.flags);
        writer.put_u64(self.output_len as u64);
        writer.put_words_u32(&self.chunk.cv);
        writer.put_u64(self.chunk.counter);
        writer.put_u8(self.chunk.blocks_compressed as u8);
        writer.put_bytes(&self.chunk.buf[..self.chunk.buf_len]);
        writer.put_u8(self.stack.len() as u8);
        for cv in &self.stack {
            writer.put_words_u32(cv);
        }
        writer.put_bool(self.finalized);
        writer.finish()
    }

    fn restore(bytes: &[u8]) -> Result<Self> {
        let mut reader = SnapshotReader::new(bytes, tag::BLAKE3)?;

        let mut key = [0u32; 8];
        reader.words_u32(&mut key)?;
        let mode = reader.u32()?;
        if !matches!(
            mode,
            0 | flags::KEYED_HASH | flags::DERIVE_KEY_CONTEXT | flags::DERIVE_KEY_MATERIAL
        ) {
            return Err(Error::MalformedState);
        }
        let output_len = usize::try_from(reader.u64()?).map_err(|_| Error::MalformedState)?;
        if output_len == 0 {
            return Err(Error::MalformedState);
        }

        let mut chunk = ChunkState::new(&key, 0, mode);
        reader.words_u32(&mut chunk.cv)?;
        chunk.counter = reader.u64()?;
        chunk.blocks_compressed = reader.u8()? as usize;
        let pending = reader.bytes(BLOCK_LEN)?;
        chunk.buf[..pending.len()].copy_from_slice(pending);
        chunk.buf_len = pending.len();

        // The final block of a chunk is always held back, so a chunk never
        // has all 16 blocks compressed or compressed blocks without a tail.
        let compressed = chunk.blocks_compressed;
        if compressed >= CHUNK_LEN / BLOCK_LEN || (compressed > 0 && chunk.buf_len == 0) {
            return Err(Error::MalformedState);
        }

        let depth = reader.u8()? as usize;
        // A partial chunk is preceded by a fully merged stack; an empty one
        // either starts the input or follows a subtree pair.
        let consistent = if chunk.len() > 0 {
            depth == chunk.counter.count_ones() as usize
        } else {
            (depth == 0) == (chunk.counter == 0) && depth != 1
        };
        if depth > MAX_DEPTH || !consistent {
            return Err(Error::MalformedState);
        }
        let mut stack = Vec::with_capacity(MAX_DEPTH);
        for _ in 0..depth {
            let mut cv = [0u32; 8];
            reader.words_u32(&mut cv)?;
            stack.push(cv);
        }

        let finalized = reader.bool()?;
        reader.finish()?;

        Ok(Self {
            key,
            flags: mode,
            chunk,
            stack,
            output_len,
            finalized,
        })
    }
}

/// Seekable view of a finalized root's output stream.
///
/// Output block `k` is the root compression with counter `k`, so any
/// offset can be reached without producing the bytes before it.
#[derive(Clone)]
pub struct OutputReader {
    root: Output,
    position: u64,
}

impl OutputReader {
    pub(crate) fn new(root: Output) -> Self {
        Self { root, position: 0 }
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn seek(&mut self, position: u64) {
        self.position = position;
    }

    /// Fills `out` from the current position and advances past it.
    pub fn read(&mut self, out: &mut [u8]) {
        let block_len = BLOCK_LEN as u64;
        let mut written = 0;

        while written < out.len() {
            let block = self.root.root_block(self.position / block_len);
            let offset = (self.position % block_len) as usize;
            let take = (BLOCK_LEN - offset).min(out.len() - written);

            out[written..written + take].copy_from_slice(&block[offset..offset + take]);
            written += take;
            self.position += take as u64;
        }
    }
}

fn root_hash(input: &[u8], key: &[u32; 8], mode: u32) -> [u8; OUT_LEN] {
    let mut out = [0u8; OUT_LEN];
    out.copy_from_slice(&root_output(input, key, mode).root_block(0)[..OUT_LEN]);
    out
}

/// BLAKE3 of `input` with the default 32-byte output.
pub fn blake3(input: &[u8]) -> [u8; OUT_LEN] {
    root_hash(input, &IV, 0)
}

/// Keyed BLAKE3 of `input`.
pub fn blake3_keyed(key: &[u8; KEY_LEN], input: &[u8]) -> [u8; OUT_LEN] {
    let mut words = [0u32; 8];
    load_words_u32(key, &mut words, Endian::Little);
    let out = root_hash(input, &words, flags::KEYED_HASH);
    words.zeroize();
    out
}

/// Derives a 32-byte key from `material` under a context string.
pub fn blake3_derive_key(context: &str, material: &[u8]) -> [u8; OUT_LEN] {
    let mut context_key = [0u8; KEY_LEN];
    context_key.copy_from_slice(
        &root_output(context.as_bytes(), &IV, flags::DERIVE_KEY_CONTEXT).root_block(0)[..KEY_LEN],
    );
    let mut words = [0u32; 8];
    load_words_u32(&context_key, &mut words, Endian::Little);
    context_key.zeroize();

    let out = root_hash(material, &words, flags::DERIVE_KEY_MATERIAL);
    words.zeroize();
    out
}

/// Fills `out` with the extended output of `input`.
pub fn blake3_xof(input: &[u8], out: &mut [u8]) {
    OutputReader::new(root_output(input, &IV, 0)).read(out);
}
