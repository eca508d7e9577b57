use crate::error::{Error, Result};
use crate::hash::engine::{Hasher, SnapshotReader, SnapshotWriter, StateSnapshot, tag};
use crate::primitives::endian::{load_u32_le, load_u64_le};

pub(crate) const PRIME_1: u64 = 0x9E37_79B1_85EB_CA87;
pub(crate) const PRIME_2: u64 = 0xC2B2_AE3D_27D4_EB4F;
pub(crate) const PRIME_3: u64 = 0x1656_67B1_9E37_79F9;
pub(crate) const PRIME_4: u64 = 0x85EB_CA77_C2B2_AE63;
pub(crate) const PRIME_5: u64 = 0x27D4_EB2F_1656_67C5;

const STRIPE_LEN: usize = 32;

#[inline(always)]
fn round(acc: u64, lane: u64) -> u64 {
    acc.wrapping_add(lane.wrapping_mul(PRIME_2))
        .rotate_left(31)
        .wrapping_mul(PRIME_1)
}

#[inline(always)]
fn merge_round(h: u64, acc: u64) -> u64 {
    (h ^ round(0, acc)).wrapping_mul(PRIME_1).wrapping_add(PRIME_4)
}

/// Final mixing shared with XXH3.
#[inline(always)]
pub(crate) fn avalanche(mut h: u64) -> u64 {
    h ^= h >> 33;
    h = h.wrapping_mul(PRIME_2);
    h ^= h >> 29;
    h = h.wrapping_mul(PRIME_3);
    h ^ (h >> 32)
}

/// Seeded XXH64 with a 32-byte stripe buffer.
#[derive(Debug, Clone)]
pub struct Xxh64 {
    seed: u64,
    acc: [u64; 4],
    buffer: [u8; STRIPE_LEN],
    buffered: usize,
    total_len: u64,
}

impl Xxh64 {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            acc: [
                seed.wrapping_add(PRIME_1).wrapping_add(PRIME_2),
                seed.wrapping_add(PRIME_2),
                seed,
                seed.wrapping_sub(PRIME_1),
            ],
            buffer: [0u8; STRIPE_LEN],
            buffered: 0,
            total_len: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn stripe(acc: &mut [u64; 4], stripe: &[u8]) {
        for (i, lane) in acc.iter_mut().enumerate() {
            *lane = round(*lane, load_u64_le(&stripe[8 * i..]));
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

    pub fn digest(&self) -> u64 {
        let [a, b, c, d] = self.acc;
        let mut h = if self.total_len >= STRIPE_LEN as u64 {
            let mut h = a
                .rotate_left(1)
                .wrapping_add(b.rotate_left(7))
                .wrapping_add(c.rotate_left(12))
                .wrapping_add(d.rotate_left(18));
            for lane in self.acc {
                h = merge_round(h, lane);
            }
            h
        } else {
            self.seed.wrapping_add(PRIME_5)
        };
        h = h.wrapping_add(self.total_len);

        let mut tail = &self.buffer[..self.buffered];
        while tail.len() >= 8 {
            h = (h ^ round(0, load_u64_le(tail)))
                .rotate_left(27)
                .wrapping_mul(PRIME_1)
                .wrapping_add(PRIME_4);
            tail = &tail[8..];
        }
        if tail.len() >= 4 {
            h = (h ^ (load_u32_le(tail) as u64).wrapping_mul(PRIME_1))
                .rotate_left(23)
                .wrapping_mul(PRIME_2)
                .wrapping_add(PRIME_3);
            tail = &tail[4..];
        }
        for &byte in tail {
            h = (h ^ (byte as u64).wrapping_mul(PRIME_5))
                .rotate_left(11)
                .wrapping_mul(PRIME_1);
        }

        avalanche(h)
    }
}

impl Hasher for Xxh64 {
    fn update(&mut self, data: &[u8]) -> Result<()> {
        self.absorb(data);
        Ok(())
    }

    fn finalize_into(&mut self, out: &mut [u8]) -> Result<usize> {
        if out.len() < 8 {
            return Err(Error::InvalidParameter("output buffer shorter than digest"));
        }
        out[..8].copy_from_slice(&self.digest().to_be_bytes());
        Ok(8)
    }

    fn output_len(&self) -> usize {
        8
    }

    fn reset(&mut self) {
        *self = Self::new(self.seed);
    }
}

impl StateSnapshot for Xxh64 {
    fn snapshot(&self) -> Vec<u8> {
        let mut writer = SnapshotWriter::new(tag::XXH64);
        writer.put_u64(self.seed);
        writer.put_words_u64(&self.acc);
        writer.put_bytes(&self.buffer[..self.buffered]);
        writer.put_u64(self.total_len);
        writer.finish()
    }

    fn restore(bytes: &[u8]) -> Result<Self> {
        let mut reader = SnapshotReader::new(bytes, tag::XXH64)?;
        let mut state = Xxh64::new(reader.u64()?);
        reader.words_u64(&mut state.acc)?;
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

/// XXH64 of `input`.
pub fn xxh64(input: &[u8], seed: u64) -> u64 {
    let mut state = Xxh64::new(seed);
    state.absorb(input);
    state.digest()
}
