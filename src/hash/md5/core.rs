use crate::error::Result;
use crate::hash::engine::{
    BlockCodec, LengthField, MdPadding, SnapshotReader, SnapshotWriter, StreamingHasher, tag,
};
use crate::primitives::endian::{Endian, load_words_u32, store_words_u32};

const INIT: [u32; 4] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476];

/// `floor(abs(sin(i + 1)) · 2^32)`.
const K: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee, 0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be, 0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa, 0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed, 0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c, 0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05, 0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039, 0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1, 0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

/// Rotation amounts, four per round.
const S: [[u32; 4]; 4] = [
    [7, 12, 17, 22],
    [5, 9, 14, 20],
    [4, 11, 16, 23],
    [6, 10, 15, 21],
];

pub fn compress(block: &[u8], state: &mut [u32; 4]) {
    let mut x = [0u32; 16];
    load_words_u32(&block[..64], &mut x, Endian::Little);

    let [mut a, mut b, mut c, mut d] = *state;

    for i in 0..64 {
        let round = i / 16;
        let (f, g) = match round {
            0 => ((b & c) | (!b & d), i),
            1 => ((d & b) | (!d & c), (5 * i + 1) % 16),
            2 => (b ^ c ^ d, (3 * i + 5) % 16),
            _ => (c ^ (b | !d), (7 * i) % 16),
        };

        let t = a
            .wrapping_add(f)
            .wrapping_add(K[i])
            .wrapping_add(x[g])
            .rotate_left(S[round][i % 4]);
        a = d;
        d = c;
        c = b;
        b = b.wrapping_add(t);
    }

    for (s, v) in state.iter_mut().zip([a, b, c, d]) {
        *s = s.wrapping_add(v);
    }
}

#[derive(Clone)]
pub struct Md5Codec {
    state: [u32; 4],
}

impl Default for Md5Codec {
    fn default() -> Self {
        Self { state: INIT }
    }
}

impl BlockCodec for Md5Codec {
    type Padder = MdPadding;

    const SNAPSHOT_TAG: u8 = tag::MD5;

    fn block_len(&self) -> usize {
        64
    }

    fn output_len(&self) -> usize {
        16
    }

    fn padder(&self) -> MdPadding {
        MdPadding {
            length: LengthField::U64,
            order: Endian::Little,
        }
    }

    fn reset(&mut self) {
        self.state = INIT;
    }

    fn compress(&mut self, block: &[u8], _consumed: u128) {
        compress(block, &mut self.state);
    }

    fn extract(&self, out: &mut [u8]) {
        store_words_u32(&self.state, out, Endian::Little);
    }

    fn write_state(&self, writer: &mut SnapshotWriter) {
        writer.put_words_u32(&self.state);
    }

    fn read_state(reader: &mut SnapshotReader<'_>) -> Result<Self> {
        let mut state = [0u32; 4];
        reader.words_u32(&mut state)?;
        Ok(Self { state })
    }
}

pub type Md5Hasher = StreamingHasher<Md5Codec, 64>;

pub fn md5(input: &[u8]) -> [u8; 16] {
    let mut out = [0u8; 16];
    Md5Hasher::oneshot(Md5Codec::default(), input, &mut out);
    out
}
