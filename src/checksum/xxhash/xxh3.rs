//! XXH3 with 64-bit and 128-bit results.
//!
//! Inputs up to 240 bytes take dedicated short paths keyed by the default
//! secret and the seed. Longer inputs run the striped accumulator loop over
//! a secret derived from the seed; both widths share that loop and differ
//! only in how the accumulators are merged. The streaming state buffers 256
//! bytes and always keeps at least one byte back so the final stripe is
//! processed by `digest`, which works on a copy and leaves the state intact.

use crate::error::{Error, Result};
use crate::hash::engine::{Hasher, SnapshotReader, SnapshotWriter, StateSnapshot, tag};
use crate::primitives::endian::{Endian, load_u32_le, load_u64_le, store_u64};

use super::xxh64::{PRIME_1 as P64_1, PRIME_2 as P64_2, PRIME_3 as P64_3, PRIME_4 as P64_4};
use super::xxh64::{PRIME_5 as P64_5, avalanche as xxh64_avalanche};

const P32_1: u64 = 0x9E37_79B1;
const P32_2: u64 = 0x85EB_CA77;
const P32_3: u64 = 0xC2B2_AE3D;

const SECRET_LEN: usize = 192;
const STRIPE_LEN: usize = 64;
const BUFFER_LEN: usize = 256;
const BUFFER_STRIPES: usize = BUFFER_LEN / STRIPE_LEN;
const SECRET_CONSUME_RATE: usize = 8;
const SECRET_LIMIT: usize = SECRET_LEN - STRIPE_LEN;
const STRIPES_PER_BLOCK: usize = SECRET_LIMIT / SECRET_CONSUME_RATE;
const MERGE_ACCS_START: usize = 11;
const LAST_ACC_START: usize = 7;
const MIDSIZE_MAX: usize = 240;
const MIDSIZE_START_OFFSET: usize = 3;
const MIDSIZE_LAST_OFFSET: usize = 17;
const SECRET_SIZE_MIN: usize = 136;

const INIT_ACC: [u64; 8] = [P32_3, P64_1, P64_2, P64_3, P64_4, P32_2, P64_5, P32_1];

#[rustfmt::skip]
const DEFAULT_SECRET: [u8; SECRET_LEN] = [
    0xb8, 0xfe, 0x6c, 0x39, 0x23, 0xa4, 0x4b, 0xbe, 0x7c, 0x01, 0x81, 0x2c, 0xf7, 0x21, 0xad, 0x1c,
    0xde, 0xd4, 0x6d, 0xe9, 0x83, 0x90, 0x97, 0xdb, 0x72, 0x40, 0xa4, 0xa4, 0xb7, 0xb3, 0x67, 0x1f,
    0xcb, 0x79, 0xe6, 0x4e, 0xcc, 0xc0, 0xe5, 0x78, 0x82, 0x5a, 0xd0, 0x7d, 0xcc, 0xff, 0x72, 0x21,
    0xb8, 0x08, 0x46, 0x74, 0xf7, 0x43, 0x24, 0x8e, 0xe0, 0x35, 0x90, 0xe6, 0x81, 0x3a, 0x26, 0x4c,
    0x3c, 0x28, 0x52, 0xbb, 0x91, 0xc3, 0x00, 0xcb, 0x88, 0xd0, 0x65, 0x8b, 0x1b, 0x53, 0x2e, 0xa3,
    0x71, 0x64, 0x48, 0x97, 0xa2, 0x0d, 0xf9, 0x4e, 0x38, 0x19, 0xef, 0x46, 0xa9, 0xde, 0xac, 0xd8,
    0xa8, 0xfa, 0x76, 0x3f, 0xe3, 0x9c, 0x34, 0x3f, 0xf9, 0xdc, 0xbb, 0xc7, 0xc7, 0x0b, 0x4f, 0x1d,
    0x8a, 0x51, 0xe0, 0x4b, 0xcd, 0xb4, 0x59, 0x31, 0xc8, 0x9f, 0x7e, 0xc9, 0xd9, 0x78, 0x73, 0x64,
    0xea, 0xc5, 0xac, 0x83, 0x34, 0xd3, 0xeb, 0xc3, 0xc5, 0x81, 0xa0, 0xff, 0xfa, 0x13, 0x63, 0xeb,
    0x17, 0x0d, 0xdd, 0x51, 0xb7, 0xf0, 0xda, 0x49, 0xd3, 0x16, 0x55, 0x26, 0x29, 0xd4, 0x68, 0x9e,
    0x2b, 0x16, 0xbe, 0x58, 0x7d, 0x47, 0xa1, 0xfc, 0x8f, 0xf8, 0xb8, 0xd1, 0x7a, 0xd0, 0x31, 0xce,
    0x45, 0xcb, 0x3a, 0x8f, 0x95, 0x16, 0x04, 0x28, 0xaf, 0xd7, 0xfb, 0xca, 0xbb, 0x4b, 0x40, 0x7e,
];

/// 128-bit value as two halves.
#[derive(Clone, Copy)]
struct Pair {
    low: u64,
    high: u64,
}

impl Pair {
    fn value(self) -> u128 {
        ((self.high as u128) << 64) | self.low as u128
    }
}

#[inline(always)]
fn mul_128(lhs: u64, rhs: u64) -> Pair {
    let product = lhs as u128 * rhs as u128;
    Pair {
        low: product as u64,
        high: (product >> 64) as u64,
    }
}

#[inline(always)]
fn mul_fold_64(lhs: u64, rhs: u64) -> u64 {
    let product = mul_128(lhs, rhs);
    product.low ^ product.high
}

#[inline(always)]
fn xxh3_avalanche(mut h: u64) -> u64 {
    h ^= h >> 37;
    h = h.wrapping_mul(0x1656_6791_9E37_79F9);
    h ^ (h >> 32)
}

fn derive_secret(seed: u64) -> [u8; SECRET_LEN] {
    let mut secret = [0u8; SECRET_LEN];
    for (i, pair) in secret.chunks_exact_mut(16).enumerate() {
        let lo = load_u64_le(&DEFAULT_SECRET[16 * i..]).wrapping_add(seed);
        let hi = load_u64_le(&DEFAULT_SECRET[16 * i + 8..]).wrapping_sub(seed);
        store_u64(&mut pair[..8], lo, Endian::Little);
        store_u64(&mut pair[8..], hi, Endian::Little);
    }
    secret
}

// ------------------------------------------------------------
// Long inputs
// ------------------------------------------------------------

#[inline(always)]
fn accumulate_stripe(acc: &mut [u64; 8], stripe: &[u8], secret: &[u8]) {
    for i in 0..8 {
        let value = load_u64_le(&stripe[8 * i..]);
        let keyed = value ^ load_u64_le(&secret[8 * i..]);
        acc[i ^ 1] = acc[i ^ 1].wrapping_add(value);
        acc[i] = acc[i].wrapping_add((keyed & 0xFFFF_FFFF).wrapping_mul(keyed >> 32));
    }
}

fn accumulate(acc: &mut [u64; 8], input: &[u8], secret: &[u8], stripes: usize) {
    for n in 0..stripes {
        accumulate_stripe(
            acc,
            &input[n * STRIPE_LEN..],
            &secret[n * SECRET_CONSUME_RATE..],
        );
    }
}

fn scramble(acc: &mut [u64; 8], secret: &[u8]) {
    for (i, lane) in acc.iter_mut().enumerate() {
        let mut value = *lane;
        value ^= value >> 47;
        value ^= load_u64_le(&secret[8 * i..]);
        *lane = value.wrapping_mul(P32_1);
    }
}

/// Accumulates `stripes` stripes, scrambling once if a block boundary is crossed.
fn consume_stripes(
    acc: &mut [u64; 8],
    stripes_so_far: &mut usize,
    input: &[u8],
    stripes: usize,
    secret: &[u8],
) {
    let offset = *stripes_so_far * SECRET_CONSUME_RATE;
    if STRIPES_PER_BLOCK - *stripes_so_far <= stripes {
        let to_end = STRIPES_PER_BLOCK - *stripes_so_far;
        let after = stripes - to_end;
        accumulate(acc, input, &secret[offset..], to_end);
        scramble(acc, &secret[SECRET_LIMIT..]);
        accumulate(acc, &input[to_end * STRIPE_LEN..], secret, after);
        *stripes_so_far = after;
    } else {
        accumulate(acc, input, &secret[offset..], stripes);
        *stripes_so_far += stripes;
    }
}

fn mix_two_accs(acc: &[u64], secret: &[u8]) -> u64 {
    mul_fold_64(
        acc[0] ^ load_u64_le(secret),
        acc[1] ^ load_u64_le(&secret[8..]),
    )
}

fn merge_accs(acc: &[u64; 8], secret: &[u8], start: u64) -> u64 {
    let mut result = start;
    for i in 0..4 {
        result = result.wrapping_add(mix_two_accs(&acc[2 * i..], &secret[16 * i..]));
    }
    xxh3_avalanche(result)
}

fn finish_long(acc: &[u64; 8], secret: &[u8], len: u64) -> Pair {
    Pair {
        low: merge_accs(acc, &secret[MERGE_ACCS_START..], len.wrapping_mul(P64_1)),
        high: merge_accs(
            acc,
            &secret[SECRET_LEN - 64 - MERGE_ACCS_START..],
            !len.wrapping_mul(P64_2),
        ),
    }
}

/// Accumulators after the whole of `input`, more than 240 bytes long.
fn accumulate_long(input: &[u8], secret: &[u8; SECRET_LEN]) -> [u64; 8] {
    let mut acc = INIT_ACC;
    let block_len = STRIPE_LEN * STRIPES_PER_BLOCK;
    let blocks = (input.len() - 1) / block_len;

    for n in 0..blocks {
        accumulate(&mut acc, &input[n * block_len..], secret, STRIPES_PER_BLOCK);
        scramble(&mut acc, &secret[SECRET_LIMIT..]);
    }

    let stripes = ((input.len() - 1) - block_len * blocks) / STRIPE_LEN;
    accumulate(&mut acc, &input[blocks * block_len..], secret, stripes);
    accumulate_stripe(
        &mut acc,
        &input[input.len() - STRIPE_LEN..],
        &secret[SECRET_LIMIT - LAST_ACC_START..],
    );
    acc
}

// ------------------------------------------------------------
// 128-bit short inputs (up to 240 bytes)
// ------------------------------------------------------------

fn len_1_to_3(input: &[u8], secret: &[u8], seed: u64) -> Pair {
    let len = input.len();
    let c1 = input[0] as u32;
    let c2 = input[len >> 1] as u32;
    let c3 = input[len - 1] as u32;
    let combined_lo = (c1 << 16) | (c2 << 24) | c3 | ((len as u32) << 8);
    let combined_hi = combined_lo.swap_bytes().rotate_left(13);
    let flip_lo = ((load_u32_le(secret) ^ load_u32_le(&secret[4..])) as u64).wrapping_add(seed);
    let flip_hi =
        ((load_u32_le(&secret[8..]) ^ load_u32_le(&secret[12..])) as u64).wrapping_sub(seed);
    Pair {
        low: xxh64_avalanche(combined_lo as u64 ^ flip_lo),
        high: xxh64_avalanche(combined_hi as u64 ^ flip_hi),
    }
}

fn len_4_to_8(input: &[u8], secret: &[u8], mut seed: u64) -> Pair {
    let len = input.len();
    seed ^= ((seed as u32).swap_bytes() as u64) << 32;
    let input_lo = load_u32_le(input) as u64;
    let input_hi = load_u32_le(&input[len - 4..]) as u64;
    let flip = (load_u64_le(&secret[16..]) ^ load_u64_le(&secret[24..])).wrapping_add(seed);
    let keyed = (input_lo + (input_hi << 32)) ^ flip;

    let mut m = mul_128(keyed, P64_1.wrapping_add((len as u64) << 2));
    m.high = m.high.wrapping_add(m.low << 1);
    m.low ^= m.high >> 3;

    m.low ^= m.low >> 35;
    m.low = m.low.wrapping_mul(0x9FB2_1C65_1E98_DF25);
    m.low ^= m.low >> 28;
    m.high = xxh3_avalanche(m.high);
    m
}

fn len_9_to_16(input: &[u8], secret: &[u8], seed: u64) -> Pair {
    let len = input.len();
    let flip_lo = (load_u64_le(&secret[32..]) ^ load_u64_le(&secret[40..])).wrapping_sub(seed);
    let flip_hi = (load_u64_le(&secret[48..]) ^ load_u64_le(&secret[56..])).wrapping_add(seed);
    let input_lo = load_u64_le(input);
    let mut input_hi = load_u64_le(&input[len - 8..]);

    let mut m = mul_128(input_lo ^ input_hi ^ flip_lo, P64_1);
    m.low = m.low.wrapping_add(((len - 1) as u64) << 54);
    input_hi ^= flip_hi;
    m.high = m
        .high
        .wrapping_add(input_hi)
        .wrapping_add((input_hi & 0xFFFF_FFFF).wrapping_mul(P32_2 - 1));
    m.low ^= m.high.swap_bytes();

    let mut h = mul_128(m.low, P64_2);
    h.high = h.high.wrapping_add(m.high.wrapping_mul(P64_2));
    Pair {
        low: xxh3_avalanche(h.low),
        high: xxh3_avalanche(h.high),
    }
}

fn len_0_to_16(input: &[u8], secret: &[u8], seed: u64) -> Pair {
    match input.len() {
        9..=16 => len_9_to_16(input, secret, seed),
        4..=8 => len_4_to_8(input, secret, seed),
        1..=3 => len_1_to_3(input, secret, seed),
        _ => {
            let flip_lo = load_u64_le(&secret[64..]) ^ load_u64_le(&secret[72..]);
            let flip_hi = load_u64_le(&secret[80..]) ^ load_u64_le(&secret[88..]);
            Pair {
                low: xxh64_avalanche(seed ^ flip_lo),
                high: xxh64_avalanche(seed ^ flip_hi),
            }
        }
    }
}

#[inline(always)]
fn mix_16(input: &[u8], secret: &[u8], seed: u64) -> u64 {
    mul_fold_64(
        load_u64_le(input) ^ load_u64_le(secret).wrapping_add(seed),
        load_u64_le(&input[8..]) ^ load_u64_le(&secret[8..]).wrapping_sub(seed),
    )
}

fn mix_32(mut acc: Pair, first: &[u8], second: &[u8], secret: &[u8], seed: u64) -> Pair {
    acc.low = acc.low.wrapping_add(mix_16(first, secret, seed));
    acc.low ^= load_u64_le(second).wrapping_add(load_u64_le(&second[8..]));
    acc.high = acc.high.wrapping_add(mix_16(second, &secret[16..], seed));
    acc.high ^= load_u64_le(first).wrapping_add(load_u64_le(&first[8..]));
    acc
}

fn finish_mid(acc: Pair, len: usize, seed: u64) -> Pair {
    let low = acc.low.wrapping_add(acc.high);
    let high = acc
        .low
        .wrapping_mul(P64_1)
        .wrapping_add(acc.high.wrapping_mul(P64_4))
        .wrapping_add((len as u64).wrapping_sub(seed).wrapping_mul(P64_2));
    Pair {
        low: xxh3_avalanche(low),
        high: xxh3_avalanche(high).wrapping_neg(),
    }
}

fn len_17_to_128(input: &[u8], secret: &[u8], seed: u64) -> Pair {
    let len = input.len();
    let mut acc = Pair {
        low: (len as u64).wrapping_mul(P64_1),
        high: 0,
    };
    if len > 32 {
        if len > 64 {
            if len > 96 {
                acc = mix_32(acc, &input[48..], &input[len - 64..], &secret[96..], seed);
            }
            acc = mix_32(acc, &input[32..], &input[len - 48..], &secret[64..], seed);
        }
        acc = mix_32(acc, &input[16..], &input[len - 32..], &secret[32..], seed);
    }
    acc = mix_32(acc, input, &input[len - 16..], secret, seed);
    finish_mid(acc, len, seed)
}

fn len_129_to_240(input: &[u8], secret: &[u8], seed: u64) -> Pair {
    let len = input.len();
    let rounds = len / 32;
    let mut acc = Pair {
        low: (len as u64).wrapping_mul(P64_1),
        high: 0,
    };
    for i in 0..4 {
        acc = mix_32(
            acc,
            &input[32 * i..],
            &input[32 * i + 16..],
            &secret[32 * i..],
            seed,
        );
    }
    acc.low = xxh3_avalanche(acc.low);
    acc.high = xxh3_avalanche(acc.high);
    for i in 4..rounds {
        acc = mix_32(
            acc,
            &input[32 * i..],
            &input[32 * i + 16..],
            &secret[MIDSIZE_START_OFFSET + 32 * (i - 4)..],
            seed,
        );
    }
    acc = mix_32(
        acc,
        &input[len - 16..],
        &input[len - 32..],
        &secret[SECRET_SIZE_MIN - MIDSIZE_LAST_OFFSET - 16..],
        seed.wrapping_neg(),
    );
    finish_mid(acc, len, seed)
}

fn hash_short(input: &[u8], seed: u64) -> Pair {
    match input.len() {
        0..=16 => len_0_to_16(input, &DEFAULT_SECRET, seed),
        17..=128 => len_17_to_128(input, &DEFAULT_SECRET, seed),
        _ => len_129_to_240(input, &DEFAULT_SECRET, seed),
    }
}

// ------------------------------------------------------------
// 64-bit short inputs
// ------------------------------------------------------------

#[inline(always)]
fn rrmxmx(mut h: u64, len: u64) -> u64 {
    h ^= h.rotate_left(49) ^ h.rotate_left(24);
    h = h.wrapping_mul(0x9FB2_1C65_1E98_DF25);
    h ^= (h >> 35).wrapping_add(len);
    h = h.wrapping_mul(0x9FB2_1C65_1E98_DF25);
    h ^ (h >> 28)
}

fn len_0_to_16_64(input: &[u8], secret: &[u8], mut seed: u64) -> u64 {
    let len = input.len();
    match len {
        9..=16 => {
            let flip_lo =
                (load_u64_le(&secret[24..]) ^ load_u64_le(&secret[32..])).wrapping_add(seed);
            let flip_hi =
                (load_u64_le(&secret[40..]) ^ load_u64_le(&secret[48..])).wrapping_sub(seed);
            let lo = load_u64_le(input) ^ flip_lo;
            let hi = load_u64_le(&input[len - 8..]) ^ flip_hi;
            let acc = (len as u64)
                .wrapping_add(lo.swap_bytes())
                .wrapping_add(hi)
                .wrapping_add(mul_fold_64(lo, hi));
            xxh3_avalanche(acc)
        }
        4..=8 => {
            seed ^= ((seed as u32).swap_bytes() as u64) << 32;
            let first = load_u32_le(input) as u64;
            let last = load_u32_le(&input[len - 4..]) as u64;
            let flip = (load_u64_le(&secret[8..]) ^ load_u64_le(&secret[16..])).wrapping_sub(seed);
            rrmxmx((last + (first << 32)) ^ flip, len as u64)
        }
        1..=3 => {
            let c1 = input[0] as u32;
            let c2 = input[len >> 1] as u32;
            let c3 = input[len - 1] as u32;
            let combined = (c1 << 16) | (c2 << 24) | c3 | ((len as u32) << 8);
            let flip = (load_u32_le(secret) ^ load_u32_le(&secret[4..])) as u64;
            xxh64_avalanche(combined as u64 ^ flip.wrapping_add(seed))
        }
        _ => {
            let flip = load_u64_le(&secret[56..]) ^ load_u64_le(&secret[64..]);
            xxh64_avalanche(seed ^ flip)
        }
    }
}

fn len_17_to_128_64(input: &[u8], secret: &[u8], seed: u64) -> u64 {
    let len = input.len();
    let mut acc = (len as u64).wrapping_mul(P64_1);
    let mut mix = |offset: usize, tail: usize, key: usize| {
        acc = acc
            .wrapping_add(mix_16(&input[offset..], &secret[key..], seed))
            .wrapping_add(mix_16(&input[len - tail..], &secret[key + 16..], seed));
    };
    if len > 32 {
        if len > 64 {
            if len > 96 {
                mix(48, 64, 96);
            }
            mix(32, 48, 64);
        }
        mix(16, 32, 32);
    }
    mix(0, 16, 0);
    xxh3_avalanche(acc)
}

fn len_129_to_240_64(input: &[u8], secret: &[u8], seed: u64) -> u64 {
    let len = input.len();
    let mut acc = (len as u64).wrapping_mul(P64_1);
    for i in 0..8 {
        acc = acc.wrapping_add(mix_16(&input[16 * i..], &secret[16 * i..], seed));
    }
    acc = xxh3_avalanche(acc);
    for i in 8..len / 16 {
        let key = &secret[16 * (i - 8) + MIDSIZE_START_OFFSET..];
        acc = acc.wrapping_add(mix_16(&input[16 * i..], key, seed));
    }
    let key = &secret[SECRET_SIZE_MIN - MIDSIZE_LAST_OFFSET..];
    acc = acc.wrapping_add(mix_16(&input[len - 16..], key, seed));
    xxh3_avalanche(acc)
}

fn hash_short_64(input: &[u8], seed: u64) -> u64 {
    match input.len() {
        0..=16 => len_0_to_16_64(input, &DEFAULT_SECRET, seed),
        17..=128 => len_17_to_128_64(input, &DEFAULT_SECRET, seed),
        _ => len_129_to_240_64(input, &DEFAULT_SECRET, seed),
    }
}

fn finish_long_64(acc: &[u64; 8], secret: &[u8], len: u64) -> u64 {
    merge_accs(acc, &secret[MERGE_ACCS_START..], len.wrapping_mul(P64_1))
}

// ------------------------------------------------------------
// Streaming state
// ------------------------------------------------------------

/// Buffered accumulator state shared by both output widths.
#[derive(Clone)]
struct State {
    seed: u64,
    secret: [u8; SECRET_LEN],
    acc: [u64; 8],
    buffer: [u8; BUFFER_LEN],
    buffered: usize,
    stripes_so_far: usize,
    total_len: u64,
}

impl State {
    fn new(seed: u64) -> Self {
        Self {
            seed,
            secret: derive_secret(seed),
            acc: INIT_ACC,
            buffer: [0u8; BUFFER_LEN],
            buffered: 0,
            stripes_so_far: 0,
            total_len: 0,
        }
    }

    fn reset(&mut self) {
        self.acc = INIT_ACC;
        self.buffer = [0u8; BUFFER_LEN];
        self.buffered = 0;
        self.stripes_so_far = 0;
        self.total_len = 0;
    }

    fn absorb(&mut self, data: &[u8]) {
        self.total_len = self.total_len.wrapping_add(data.len() as u64);

        if self.buffered + data.len() <= BUFFER_LEN {
            self.buffer[self.buffered..self.buffered + data.len()].copy_from_slice(data);
            self.buffered += data.len();
            return;
        }

        let mut pos = 0;
        if self.buffered > 0 {
            pos = BUFFER_LEN - self.buffered;
            self.buffer[self.buffered..].copy_from_slice(&data[..pos]);
            consume_stripes(
                &mut self.acc,
                &mut self.stripes_so_far,
                &self.buffer,
                BUFFER_STRIPES,
                &self.secret,
            );
            self.buffered = 0;
        }

        if data.len() - pos > BUFFER_LEN {
            while data.len() - pos > BUFFER_LEN {
                consume_stripes(
                    &mut self.acc,
                    &mut self.stripes_so_far,
                    &data[pos..pos + BUFFER_LEN],
                    BUFFER_STRIPES,
                    &self.secret,
                );
                pos += BUFFER_LEN;
            }
            // Keep the last consumed stripe for the catch-up in `digest`.
            self.buffer[BUFFER_LEN - STRIPE_LEN..].copy_from_slice(&data[pos - STRIPE_LEN..pos]);
        }

        let rest = &data[pos..];
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffered = rest.len();
    }

    /// The whole input while it still fits the short paths.
    fn short_input(&self) -> Option<&[u8]> {
        (self.total_len <= MIDSIZE_MAX as u64).then(|| &self.buffer[..self.total_len as usize])
    }

    /// Accumulators with the pending stripes and the final stripe folded in.
    fn final_acc(&self) -> [u64; 8] {
        let mut acc = self.acc;
        if self.buffered >= STRIPE_LEN {
            let stripes = (self.buffered - 1) / STRIPE_LEN;
            let mut stripes_so_far = self.stripes_so_far;
            consume_stripes(
                &mut acc,
                &mut stripes_so_far,
                &self.buffer,
                stripes,
                &self.secret,
            );
            accumulate_stripe(
                &mut acc,
                &self.buffer[self.buffered - STRIPE_LEN..],
                &self.secret[SECRET_LIMIT - LAST_ACC_START..],
            );
        } else {
            let mut last = [0u8; STRIPE_LEN];
            let catchup = STRIPE_LEN - self.buffered;
            last[..catchup].copy_from_slice(&self.buffer[BUFFER_LEN - catchup..]);
            last[catchup..].copy_from_slice(&self.buffer[..self.buffered]);
            accumulate_stripe(
                &mut acc,
                &last,
                &self.secret[SECRET_LIMIT - LAST_ACC_START..],
            );
        }
        acc
    }

    /// Layout after the header: seed, eight accumulators, the whole 256-byte
    /// buffer (the tail stripe matters even when nothing is pending), buffered
    /// count, stripes in the current block, total length.
    fn write(&self, writer: &mut SnapshotWriter) {
        writer.put_u64(self.seed);
        writer.put_words_u64(&self.acc);
        writer.put_bytes(&self.buffer);
        writer.put_u32(self.buffered as u32);
        writer.put_u32(self.stripes_so_far as u32);
        writer.put_u64(self.total_len);
    }

    fn read(mut reader: SnapshotReader<'_>) -> Result<Self> {
        let mut state = State::new(reader.u64()?);
        reader.words_u64(&mut state.acc)?;
        let buffer = reader.bytes(BUFFER_LEN)?;
        if buffer.len() != BUFFER_LEN {
            return Err(Error::MalformedState);
        }
        state.buffer.copy_from_slice(buffer);
        state.buffered = reader.u32()? as usize;
        state.stripes_so_far = reader.u32()? as usize;
        state.total_len = reader.u64()?;
        reader.finish()?;

        let short = state.total_len <= BUFFER_LEN as u64;
        if state.buffered > BUFFER_LEN
            || state.stripes_so_far >= STRIPES_PER_BLOCK
            || (short && state.buffered as u64 != state.total_len)
            || (!short && state.buffered == 0)
        {
            return Err(Error::MalformedState);
        }
        Ok(state)
    }
}

/// Seeded streaming XXH3-64.
#[derive(Clone)]
pub struct Xxh3_64 {
    state: State,
}

impl Xxh3_64 {
    pub fn new(seed: u64) -> Self {
        Self {
            state: State::new(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.state.seed
    }

    /// Current 64-bit digest. Does not change the state.
    pub fn digest(&self) -> u64 {
        match self.state.short_input() {
            Some(input) => hash_short_64(input, self.state.seed),
            None => finish_long_64(
                &self.state.final_acc(),
                &self.state.secret,
                self.state.total_len,
            ),
        }
    }
}

impl Hasher for Xxh3_64 {
    fn update(&mut self, data: &[u8]) -> Result<()> {
        self.state.absorb(data);
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
        self.state.reset();
    }
}

impl StateSnapshot for Xxh3_64 {
    /// Same layout as [`Xxh3_128`] under its own tag.
    fn snapshot(&self) -> Vec<u8> {
        let mut writer = SnapshotWriter::new(tag::XXH3_64);
        self.state.write(&mut writer);
        writer.finish()
    }

    fn restore(bytes: &[u8]) -> Result<Self> {
        let state = State::read(SnapshotReader::new(bytes, tag::XXH3_64)?)?;
        Ok(Self { state })
    }
}

/// Seeded streaming XXH3-128.
#[derive(Clone)]
pub struct Xxh3_128 {
    state: State,
}

impl Xxh3_128 {
    pub fn new(seed: u64) -> Self {
        Self {
            state: State::new(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.state.seed
    }

    /// Current 128-bit digest. Does not change the state.
    pub fn digest(&self) -> u128 {
        match self.state.short_input() {
            Some(input) => hash_short(input, self.state.seed).value(),
            None => finish_long(
                &self.state.final_acc(),
                &self.state.secret,
                self.state.total_len,
            )
            .value(),
        }
    }
}

impl Hasher for Xxh3_128 {
    fn update(&mut self, data: &[u8]) -> Result<()> {
        self.state.absorb(data);
        Ok(())
    }

    fn finalize_into(&mut self, out: &mut [u8]) -> Result<usize> {
        if out.len() < 16 {
            return Err(Error::InvalidParameter("output buffer shorter than digest"));
        }
        out[..16].copy_from_slice(&self.digest().to_be_bytes());
        Ok(16)
    }

    fn output_len(&self) -> usize {
        16
    }

    fn reset(&mut self) {
        self.state.reset();
    }
}

impl StateSnapshot for Xxh3_128 {
    fn snapshot(&self) -> Vec<u8> {
        let mut writer = SnapshotWriter::new(tag::XXH3_128);
        self.state.write(&mut writer);
        writer.finish()
    }

    fn restore(bytes: &[u8]) -> Result<Self> {
        let state = State::read(SnapshotReader::new(bytes, tag::XXH3_128)?)?;
        Ok(Self { state })
    }
}

/// XXH3-64 of `input`.
pub fn xxh3_64(input: &[u8], seed: u64) -> u64 {
    if input.len() <= MIDSIZE_MAX {
        hash_short_64(input, seed)
    } else {
        let secret = derive_secret(seed);
        let acc = accumulate_long(input, &secret);
        finish_long_64(&acc, &secret, input.len() as u64)
    }
}

/// XXH3-128 of `input`.
pub fn xxh3_128(input: &[u8], seed: u64) -> u128 {
    if input.len() <= MIDSIZE_MAX {
        hash_short(input, seed).value()
    } else {
        let secret = derive_secret(seed);
        let acc = accumulate_long(input, &secret);
        finish_long(&acc, &secret, input.len() as u64).value()
    }
}
