//! Chunk accumulation and subtree reduction.

use zeroize::Zeroize;

use super::compress::{BLOCK_LEN, CHUNK_LEN, compress, first_8_words, flags};
use crate::primitives::endian::{Endian, store_words_u32};

/// Everything needed to produce either a chaining value or root output
/// for one node. The choice is deferred until the caller knows whether
/// the node is the root.
#[derive(Clone)]
pub(crate) struct Output {
    input_cv: [u32; 8],
    block: [u8; BLOCK_LEN],
    block_len: u32,
    counter: u64,
    flags: u32,
}

impl Output {
    pub(crate) fn chaining_value(&self) -> [u32; 8] {
        first_8_words(compress(
            &self.input_cv,
            &self.block,
            self.block_len,
            self.counter,
            self.flags,
        ))
    }

    /// Output block `index` of the root: the same compression with the
    /// ROOT flag and the block index as counter.
    pub(crate) fn root_block(&self, index: u64) -> [u8; BLOCK_LEN] {
        let words = compress(
            &self.input_cv,
            &self.block,
            self.block_len,
            index,
            self.flags | flags::ROOT,
        );
        let mut out = [0u8; BLOCK_LEN];
        store_words_u32(&words, &mut out, Endian::Little);
        out
    }
}

#[derive(Clone, Zeroize)]
pub(crate) struct ChunkState {
    pub(crate) cv: [u32; 8],
    pub(crate) counter: u64,
    pub(crate) buf: [u8; BLOCK_LEN],
    pub(crate) buf_len: usize,
    pub(crate) blocks_compressed: usize,
    pub(crate) flags: u32,
}

impl ChunkState {
    pub(crate) fn new(key: &[u32; 8], counter: u64, mode: u32) -> Self {
        Self {
            cv: *key,
            counter,
            buf: [0u8; BLOCK_LEN],
            buf_len: 0,
            blocks_compressed: 0,
            flags: mode,
        }
    }

    pub(crate) fn len(&self) -> usize {
        BLOCK_LEN * self.blocks_compressed + self.buf_len
    }

    fn start_flag(&self) -> u32 {
        if self.blocks_compressed == 0 {
            flags::CHUNK_START
        } else {
            0
        }
    }

    fn fill_buf(&mut self, input: &mut &[u8]) {
        let take = (BLOCK_LEN - self.buf_len).min(input.len());
        self.buf[self.buf_len..self.buf_len + take].copy_from_slice(&input[..take]);
        self.buf_len += take;
        *input = &input[take..];
    }

    fn compress_block(&mut self, block: &[u8; BLOCK_LEN]) {
        let block_flags = self.flags | self.start_flag();
        self.cv = first_8_words(compress(
            &self.cv,
            block,
            BLOCK_LEN as u32,
            self.counter,
            block_flags,
        ));
        self.blocks_compressed += 1;
    }

    /// Absorbs input that fits in the chunk. The last block stays buffered
    /// because it needs the CHUNK_END flag.
    pub(crate) fn update(&mut self, mut input: &[u8]) {
        debug_assert!(self.len() + input.len() <= CHUNK_LEN);

        if self.buf_len > 0 {
            self.fill_buf(&mut input);
            if !input.is_empty() {
                let block = self.buf;
                self.compress_block(&block);
                self.buf = [0u8; BLOCK_LEN];
                self.buf_len = 0;
            }
        }

        while input.len() > BLOCK_LEN {
            let (head, rest) = input.split_at(BLOCK_LEN);
            let mut block = [0u8; BLOCK_LEN];
            block.copy_from_slice(head);
            self.compress_block(&block);
            input = rest;
        }

        self.fill_buf(&mut input);
    }

    pub(crate) fn output(&self) -> Output {
        Output {
            input_cv: self.cv,
            block: self.buf,
            block_len: self.buf_len as u32,
            counter: self.counter,
            flags: self.flags | self.start_flag() | flags::CHUNK_END,
        }
    }
}

pub(crate) fn parent_output(
    left: &[u32; 8],
    right: &[u32; 8],
    key: &[u32; 8],
    mode: u32,
) -> Output {
    let mut block = [0u8; BLOCK_LEN];
    store_words_u32(left, &mut block[..32], Endian::Little);
    store_words_u32(right, &mut block[32..], Endian::Little);
    Output {
        input_cv: *key,
        block,
        block_len: BLOCK_LEN as u32,
        counter: 0,
        flags: mode | flags::PARENT,
    }
}

pub(crate) fn parent_cv(left: &[u32; 8], right: &[u32; 8], key: &[u32; 8], mode: u32) -> [u32; 8] {
    parent_output(left, right, key, mode).chaining_value()
}

/// Largest power of two less than or equal to `n`.
pub(crate) fn largest_power_of_two_leq(n: usize) -> usize {
    ((n / 2) + 1).next_power_of_two()
}

/// Bytes in the left subtree of an input longer than one chunk: the
/// largest power-of-two number of chunks that leaves at least one byte on
/// the right.
fn left_len(content_len: usize) -> usize {
    debug_assert!(content_len > CHUNK_LEN);
    let full_chunks = (content_len - 1) / CHUNK_LEN;
    largest_power_of_two_leq(full_chunks) * CHUNK_LEN
}

fn join<A, B, RA, RB>(left: A, right: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    #[cfg(feature = "parallel")]
    return rayon::join(left, right);
    #[cfg(not(feature = "parallel"))]
    return (left(), right());
}

fn chunk_cv(input: &[u8], key: &[u32; 8], counter: u64, mode: u32) -> [u32; 8] {
    let mut chunk = ChunkState::new(key, counter, mode);
    chunk.update(input);
    chunk.output().chaining_value()
}

/// Chaining value of a non-root subtree starting at chunk `counter`.
fn subtree_cv(input: &[u8], key: &[u32; 8], counter: u64, mode: u32) -> [u32; 8] {
    if input.len() <= CHUNK_LEN {
        return chunk_cv(input, key, counter, mode);
    }
    let (left, right) = subtree_children(input, key, counter, mode);
    parent_cv(&left, &right, key, mode)
}

/// Chaining values of the two children of a subtree longer than one chunk.
///
/// The halves are hashed on separate rayon tasks when the `parallel`
/// feature is enabled.
pub(crate) fn subtree_children(
    input: &[u8],
    key: &[u32; 8],
    counter: u64,
    mode: u32,
) -> ([u32; 8], [u32; 8]) {
    let split = left_len(input.len());
    let (left, right) = input.split_at(split);
    let right_counter = counter + (split / CHUNK_LEN) as u64;

    join(
        || subtree_cv(left, key, counter, mode),
        || subtree_cv(right, key, right_counter, mode),
    )
}

/// Root node of a whole message hashed in one pass.
pub(crate) fn root_output(input: &[u8], key: &[u32; 8], mode: u32) -> Output {
    if input.len() <= CHUNK_LEN {
        let mut chunk = ChunkState::new(key, 0, mode);
        chunk.update(input);
        return chunk.output();
    }
    let (left, right) = subtree_children(input, key, 0, mode);
    parent_output(&left, &right, key, mode)
}
