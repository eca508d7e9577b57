use super::computations::all_rounds;
use super::{H224_INIT, H256_INIT};
use crate::error::{Error, Result};
use crate::hash::engine::{
    BlockCodec, LengthField, MdPadding, SnapshotReader, SnapshotWriter, StreamingHasher, tag,
};
use crate::primitives::endian::{Endian, load_words_u32, store_words_u32};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sha256Variant {
    Sha224,
    Sha256,
}

impl Sha256Variant {
    fn init(self) -> [u32; 8] {
        match self {
            Sha256Variant::Sha224 => H224_INIT,
            Sha256Variant::Sha256 => H256_INIT,
        }
    }

    fn output_len(self) -> usize {
        match self {
            Sha256Variant::Sha224 => 28,
            Sha256Variant::Sha256 => 32,
        }
    }
}

#[derive(Clone)]
pub struct Sha256Codec {
    state: [u32; 8],
    variant: Sha256Variant,
}

impl Sha256Codec {
    pub fn new(variant: Sha256Variant) -> Self {
        Self {
            state: variant.init(),
            variant,
        }
    }
}

#[inline(always)]
pub fn compress(block: &[u8], state: &mut [u32; 8]) {
    let mut w = [0u32; 16];
    load_words_u32(&block[..64], &mut w, Endian::Big);
    all_rounds(state, w);
}

impl BlockCodec for Sha256Codec {
    type Padder = MdPadding;

    const SNAPSHOT_TAG: u8 = tag::SHA256;

    fn block_len(&self) -> usize {
        64
    }

    fn output_len(&self) -> usize {
        self.variant.output_len()
    }

    fn padder(&self) -> MdPadding {
        MdPadding {
            length: LengthField::U64,
            order: Endian::Big,
        }
    }

    fn reset(&mut self) {
        self.state = self.variant.init();
    }

    fn compress(&mut self, block: &[u8], _consumed: u128) {
        compress(block, &mut self.state);
    }

    fn extract(&self, out: &mut [u8]) {
        store_words_u32(&self.state, out, Endian::Big);
    }

    fn write_state(&self, writer: &mut SnapshotWriter) {
        writer.put_u8(self.variant.output_len() as u8);
        writer.put_words_u32(&self.state);
    }

    fn read_state(reader: &mut SnapshotReader<'_>) -> Result<Self> {
        let variant = match reader.u8()? {
            28 => Sha256Variant::Sha224,
            32 => Sha256Variant::Sha256,
            _ => return Err(Error::MalformedState),
        };
        let mut state = [0u32; 8];
        reader.words_u32(&mut state)?;
        Ok(Self { state, variant })
    }
}

pub type Sha256Hasher = StreamingHasher<Sha256Codec, 64>;

impl StreamingHasher<Sha256Codec, 64> {
    pub fn sha224() -> Self {
        Self::new(Sha256Codec::new(Sha256Variant::Sha224))
    }

    pub fn sha256() -> Self {
        Self::new(Sha256Codec::new(Sha256Variant::Sha256))
    }
}

pub fn sha224(input: &[u8]) -> [u8; 28] {
    let mut out = [0u8; 28];
    Sha256Hasher::oneshot(Sha256Codec::new(Sha256Variant::Sha224), input, &mut out);
    out
}

pub fn sha256(input: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    Sha256Hasher::oneshot(Sha256Codec::new(Sha256Variant::Sha256), input, &mut out);
    out
}
