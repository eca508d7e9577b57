use crate::error::Result;
use crate::hash::engine::{
    BlockCodec, LengthField, MdPadding, SnapshotReader, SnapshotWriter, StreamingHasher, tag,
};
use crate::primitives::endian::{Endian, load_words_u32, store_words_u32};

const INIT: [u32; 4] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476];

const ROUND_2: u32 = 0x5a827999;
const ROUND_3: u32 = 0x6ed9eba1;

// Word order of rounds 2 and 3; round 1 reads the words in order.
const ORDER_2: [usize; 16] = [0, 4, 8, 12, 1, 5, 9, 13, 2, 6, 10, 14, 3, 7, 11, 15];
const ORDER_3: [usize; 16] = [0, 8, 4, 12, 2, 10, 6, 14, 1, 9, 5, 13, 3, 11, 7, 15];

pub fn compress(block: &[u8], state: &mut [u32; 4]) {
    let mut x = [0u32; 16];
    load_words_u32(&block[..64], &mut x, Endian::Little);

    let [mut a, mut b, mut c, mut d] = *state;

    for i in 0..48 {
        let (f, k, word, shift) = match i / 16 {
            0 => ((b & c) | (!b & d), 0, i, [3, 7, 11, 19][i % 4]),
            1 => (
                (b & c) | (b & d) | (c & d),
                ROUND_2,
                ORDER_2[i % 16],
                [3, 5, 9, 13][i % 4],
            ),
            _ => (b ^ c ^ d, ROUND_3, ORDER_3[i % 16], [3, 9, 11, 15][i % 4]),
        };

        let t = a
            .wrapping_add(f)
            .wrapping_add(x[word])
            .wrapping_add(k)
            .rotate_left(shift);
        a = d;
        d = c;
        c = b;
        b = t;
    }

    for (s, v) in state.iter_mut().zip([a, b, c, d]) {
        *s = s.wrapping_add(v);
    }
}

#[derive(Clone)]
pub struct Md4Codec {
    state: [u32; 4],
}

impl Default for Md4Codec {
    fn default() -> Self {
        Self { state: INIT }
    }
}

impl BlockCodec for Md4Codec {
    type Padder = MdPadding;

    const SNAPSHOT_TAG: u8 = tag::MD4;

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

pub type Md4Hasher = StreamingHasher<Md4Codec, 64>;

pub fn md4(input: &[u8]) -> [u8; 16] {
    let mut out = [0u8; 16];
    Md4Hasher::oneshot(Md4Codec::default(), input, &mut out);
    out
}
