use crate::error::Result;
use crate::hash::engine::{
    BlockCodec, LengthField, MdPadding, SnapshotReader, SnapshotWriter, StreamingHasher, tag,
};
use crate::primitives::endian::{Endian, load_words_u32, store_words_u32};

const INIT: [u32; 8] = [
    0x7380166f, 0x4914b2b9, 0x172442d7, 0xda8a0600, 0xa96f30bc, 0x163138aa, 0xe38dee4d, 0xb0fb0e4e,
];

const T_LOW: u32 = 0x79cc4519;
const T_HIGH: u32 = 0x7a879d8a;

#[inline(always)]
fn p0(x: u32) -> u32 {
    x ^ x.rotate_left(9) ^ x.rotate_left(17)
}

#[inline(always)]
fn p1(x: u32) -> u32 {
    x ^ x.rotate_left(15) ^ x.rotate_left(23)
}

pub fn compress(block: &[u8], state: &mut [u32; 8]) {
    let mut w = [0u32; 68];
    load_words_u32(&block[..64], &mut w[..16], Endian::Big);
    for j in 16..68 {
        w[j] = p1(w[j - 16] ^ w[j - 9] ^ w[j - 3].rotate_left(15))
            ^ w[j - 13].rotate_left(7)
            ^ w[j - 6];
    }

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for j in 0..64 {
        let (t, ff, gg) = if j < 16 {
            (T_LOW, a ^ b ^ c, e ^ f ^ g)
        } else {
            (T_HIGH, (a & b) | (a & c) | (b & c), (e & f) | (!e & g))
        };

        let a12 = a.rotate_left(12);
        let ss1 = a12
            .wrapping_add(e)
            .wrapping_add(t.rotate_left((j % 32) as u32))
            .rotate_left(7);
        let ss2 = ss1 ^ a12;
        let tt1 = ff
            .wrapping_add(d)
            .wrapping_add(ss2)
            .wrapping_add(w[j] ^ w[j + 4]);
        let tt2 = gg.wrapping_add(h).wrapping_add(ss1).wrapping_add(w[j]);

        d = c;
        c = b.rotate_left(9);
        b = a;
        a = tt1;
        h = g;
        g = f.rotate_left(19);
        f = e;
        e = p0(tt2);
    }

    for (s, x) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
        *s ^= x;
    }
}

#[derive(Clone)]
pub struct Sm3Codec {
    state: [u32; 8],
}

impl Default for Sm3Codec {
    fn default() -> Self {
        Self { state: INIT }
    }
}

impl BlockCodec for Sm3Codec {
    type Padder = MdPadding;

    const SNAPSHOT_TAG: u8 = tag::SM3;

    fn block_len(&self) -> usize {
        64
    }

    fn output_len(&self) -> usize {
        32
    }

    fn padder(&self) -> MdPadding {
        MdPadding {
            length: LengthField::U64,
            order: Endian::Big,
        }
    }

    fn reset(&mut self) {
        self.state = INIT;
    }

    fn compress(&mut self, block: &[u8], _consumed: u128) {
        compress(block, &mut self.state);
    }

    fn extract(&self, out: &mut [u8]) {
        store_words_u32(&self.state, out, Endian::Big);
    }

    fn write_state(&self, writer: &mut SnapshotWriter) {
        writer.put_words_u32(&self.state);
    }

    fn read_state(reader: &mut SnapshotReader<'_>) -> Result<Self> {
        let mut state = [0u32; 8];
        reader.words_u32(&mut state)?;
        Ok(Self { state })
    }
}

pub type Sm3Hasher = StreamingHasher<Sm3Codec, 64>;

pub fn sm3(input: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    Sm3Hasher::oneshot(Sm3Codec::default(), input, &mut out);
    out
}
