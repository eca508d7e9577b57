use crate::error::{Error, Result};
use crate::hash::engine::{Hasher, SnapshotReader, SnapshotWriter, StateSnapshot, tag};
use crate::primitives::endian::load_u32_le;

const PRIME_1: u32 = 0x9E37_79B1;
const PRIME_2: u32 = 0x85EB_CA77;
const PRIME_3: u32 = 0xC2B2_AE3D;
const PRIME_4: u32 = 0x27D4_EB2F;
const PRIME_5: u32 = 0x1656_67B1;

const STRIPE_LEN: usize = 16;

#[inline(always)]
fn round(acc: u32, lane: u32) -> u32 {
    acc.wrapping_add(lane.wrapping_mul(PRIME_2))
        .rotate_left(13)
        .wrapping_mul(PRIME_1)
}

/// Seeded XXH32 with a 16-byte stripe buffer.
#[derive(Debug, Clone)]
pub struct Xxh32 {
    seed: u32,
    acc: [u32; 4],
    buffer: [u8; STRIPE_LEN],
    buffered: usize,
    total_len: u64,
}

impl Xxh32 {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            acc: Self::initial_acc(seed),
            buffer: [0u8; STRIPE_LEN],
            buffered: 0,
            total_len: 0,
        }
    }

    fn initial_acc(seed: u32) -> [u32; 4] {
        [
            seed.wrapping_add(PRIME_1).wrapping_add(PRIME_2),
            seed.wrapping_add(PRIME_2),
            seed,
            seed.wrapping_sub(PRIME_1),
        ]
    }

    /// The `Init` parameter.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    fn stripe(acc: &mut [u32; 4], stripe: &[u8]) {
        for (i, lane) in acc.iter_mut().enumerate() {
            *lane = round(*lane, load_u32_le(&stripe[4 * i..]));
        }
    }

    fn absorb(&mut self, mut data: &[u8]) {
        self.total_len = self.total_len.wrapping_add(data.len() as u64);

        if self.buffered + data.len() < STRIPE_LEN {
            self.buffer[self.buffered..self.buffered + data.len()].copy_from_slice(data);
            self.buffered += data.len();
            return;
        }

        if self.buffered > 0 {
            let take = STRIPE_LEN - self.buffered;
            self.buffer[self.buffered..].copy_from_slice(&data[..take]);
            data = &data[take..];
            let buffer = self.buffer;
            Self::stripe(&mut self.acc, &buffer);
        }

        let mut stripes = data.chunks_exact(STRIPE_LEN);
        for stripe in &mut stripes {
            Self::stripe(&mut self.acc, stripe);
        }

        let rest = stripes.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffered = rest.len();
    }

    /// Current digest. Does not change the state.
    pub fn digest(&self) -> u32 {
        let mut h = if self.total_len >= STRIPE_LEN as u64 {
            self.acc[0]
                .rotate_left(1)
                .wrapping_add(self.acc[1].rotate_left(7))
                .wrapping_add(self.acc[2].rotate_left(12))
                .wrapping_add(self.acc[3].rotate_left(18))
        } else {
            self.seed.wrapping_add(PRIME_5)
        };
        h = h.wrapping_add(self.total_len as u32);

        let mut tail = &self.buffer[..self.buffered];
        while tail.len() >= 4 {
            h = h
                .wrapping_add(load_u32_le(tail).wrapping_mul(PRIME_3))
                .rotate_left(17)
                .wrapping_mul(PRIME_4);
            tail = &tail[4..];
        }
        for &byte in tail {
            h = h
                .wrapping_add((byte as u32).wrapping_mul(PRIME_5))
                .rotate_left(11)
                .wrapping_mul(PRIME_1);
        }

        h ^= h >> 15;
        h = h.wrapping_mul(PRIME_2);
        h ^= h >> 13;
        h = h.wrapping_mul(PRIME_3);
        h ^ (h >> 16)
    }
}

impl Hasher for Xxh32 {
    fn update(&mut self, data: &[u8]) -> Result<()> {
        self.absorb(data);
        Ok(())
    }

    fn finalize_into(&mut self, out: &mut [u8]) -> Result<usize> {
        if out.len() < 4 {
            return Err(Error::InvalidParameter("output buffer shorter than digest"));
        }
        out[..4].copy_from_slice(&self.digest().to_be_bytes());
        Ok(4)
    }

    fn output_len(&self) -> usize {
        4
    }

    fn reset(&mut self) {
        *self = Self::new(self.seed);
    }
}

impl StateSnapshot for Xxh32 {
    /// Layout after the header: seed, four accumulators, buffered bytes
    /// (length prefixed), total length (u64).
    fn snapshot(&self) -> Vec<u8> {
        let mut writer = SnapshotWriter::new(tag::XXH32);
        writer.put_u32(self.seed);
        writer.put_words_u32(&self.acc);
        writer.put_bytes(&self.buffer[..self.buffered]);
        writer.put_u64(self.total_len);
        writer.finish()
    }

    fn restore(bytes: &[u8]) -> Result<Self> {
        let mut reader = SnapshotReader::new(bytes, tag::XXH32)?;
        let mut state = Xxh32::new(reader.u32()?);
        reader.words_u32(&mut state.acc)?;
        let pending = reader.bytes(STRIPE_LEN - 1)?;
        state.buffer[..pending.len()].copy_from_slice(pending);
        state.buffered = pending.len();
        state.total_len = reader.u64()?;
        reader.finish()?;

        if state.total_len < state.buffered as u64 {
            return Err(Error::MalformedState);
        }
        Ok(state)
    }
}

/// XXH32 of `input`.
pub fn xxh32(input: &[u8], seed: u32) -> u32 {
    let mut state = Xxh32::new(seed);
    state.absorb(input);
    state.digest()
}
