use crate::error::Result;
use crate::hash::engine::{
    BlockCodec, LengthField, MdPadding, SnapshotReader, SnapshotWriter, StreamingHasher, tag,
};
use crate::primitives::endian::{Endian, load_words_u32, store_words_u32};

const INIT: [u32; 5] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0];

const K: [u32; 4] = [0x5a827999, 0x6ed9eba1, 0x8f1bbcdc, 0xca62c1d6];

pub fn compress(block: &[u8], state: &mut [u32; 5]) {
    let mut w = [0u32; 80];
    load_words_u32(&block[..64], &mut w[..16], Endian::Big);
    for t in 16..80 {
        w[t] = (w[t - 3] ^ w[t - 8] ^ w[t - 14] ^ w[t - 16]).rotate_left(1);
    }

    let [mut a, mut b, mut c, mut d, mut e] = *state;

    for (t, &word) in w.iter().enumerate() {
        let f = match t / 20 {
            0 => (b & c) | (!b & d),
            2 => (b & c) | (b & d) | (c & d),
            _ => b ^ c ^ d,
        };

        let temp = a
            .rotate_left(5)
            .wrapping_add(f)
            .wrapping_add(e)
            .wrapping_add(K[t / 20])
            .wrapping_add(word);
        e = d;
        d = c;
        c = b.rotate_left(30);
        b = a;
        a = temp;
    }

    for (s, v) in state.iter_mut().zip([a, b, c, d, e]) {
        *s = s.wrapping_add(v);
    }
}

#[derive(Clone)]
pub struct Sha1Codec {
    state: [u32; 5],
}

impl Default for Sha1Codec {
    fn default() -> Self {
        Self { state: INIT }
    }
}

impl BlockCodec for Sha1Codec {
    type Padder = MdPadding;

    const SNAPSHOT_TAG: u8 = tag::SHA1;

    fn block_len(&self) -> usize {
        64
    }

    fn output_len(&self) -> usize {
        20
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
        let mut state = [0u32; 5];
        reader.words_u32(&mut state)?;
        Ok(Self { state })
    }
}

pub type Sha1Hasher = StreamingHasher<Sha1Codec, 64>;

pub fn sha1(input: &[u8]) -> [u8; 20] {
    let mut out = [0u8; 20];
    Sha1Hasher::oneshot(Sha1Codec::default(), input, &mut out);
    out
}
