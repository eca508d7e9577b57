use super::permutation::keccak_f1600;
use crate::error::{Error, Result};
use crate::hash::engine::{
    BlockCodec, FinalizePolicy, KeccakPadding, SnapshotReader, SnapshotWriter, StreamingHasher,
    tag,
};

/// Domain-separation suffix of the original Keccak submission.
pub const KECCAK_SUFFIX: u8 = 0x01;
/// Domain-separation suffix of FIPS 202 SHA-3.
pub const SHA3_SUFFIX: u8 = 0x06;
/// Domain-separation suffix of the SHAKE extendable-output functions.
pub const SHAKE_SUFFIX: u8 = 0x1f;

/// Sponge state with its rate and finalization suffix.
#[derive(Clone)]
pub struct KeccakCodec {
    state: [u64; 25],
    bits: u32,
    suffix: u8,
    output_len: usize,
}

impl KeccakCodec {
    /// Builds a sponge with capacity `2 * bits`.
    ///
    /// # Errors
    /// - `InvalidParameter` if `bits` is not 128, 224, 256, 384 or 512, or
    ///   `output_len` is zero.
    pub fn new(bits: u32, suffix: u8, output_len: usize) -> Result<Self> {
        if !matches!(bits, 128 | 224 | 256 | 384 | 512) {
            return Err(Error::InvalidParameter("keccak output bits"));
        }
        if output_len == 0 {
            return Err(Error::InvalidParameter("output length"));
        }

        Ok(Self {
            state: [0u64; 25],
            bits,
            suffix,
            output_len,
        })
    }

    /// Bytes absorbed per permutation: `200 - 2 * bits / 8`.
    pub fn rate(&self) -> usize {
        200 - 2 * (self.bits as usize / 8)
    }

    /// The `Init` parameter: security level in bits.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn suffix(&self) -> u8 {
        self.suffix
    }
}

impl BlockCodec for KeccakCodec {
    type Padder = KeccakPadding;

    const SNAPSHOT_TAG: u8 = tag::KECCAK;

    const AFTER_FINAL: FinalizePolicy = FinalizePolicy::Replay;

    fn block_len(&self) -> usize {
        self.rate()
    }

    fn output_len(&self) -> usize {
        self.output_len
    }

    fn padder(&self) -> KeccakPadding {
        KeccakPadding {
            suffix: self.suffix,
        }
    }

    fn reset(&mut self) {
        self.state = [0u64; 25];
    }

    fn compress(&mut self, block: &[u8], _consumed: u128) {
        for (lane, chunk) in self.state.iter_mut().zip(block.chunks_exact(8)) {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(chunk);
            *lane ^= u64::from_le_bytes(bytes);
        }
        keccak_f1600(&mut self.state);
    }

    fn extract(&self, out: &mut [u8]) {
        XofReader::new(self.state, self.rate()).read(out);
    }

    fn write_state(&self, writer: &mut SnapshotWriter) {
        writer.put_u32(self.bits);
        writer.put_u8(self.suffix);
        writer.put_u64(self.output_len as u64);
        writer.put_words_u64(&self.state);
    }

    fn read_state(reader: &mut SnapshotReader<'_>) -> Result<Self> {
        let bits = reader.u32()?;
        let suffix = reader.u8()?;
        let output_len = usize::try_from(reader.u64()?).map_err(|_| Error::MalformedState)?;
        let mut codec =
            KeccakCodec::new(bits, suffix, output_len).map_err(|_| Error::MalformedState)?;
        reader.words_u64(&mut codec.state)?;
        Ok(codec)
    }
}

/// Squeezes output from a finalized sponge at any byte offset.
///
/// Output block `k` is the finalized state permuted `k` times; the reader
/// keeps the finalized state so it can move backwards without re-absorbing
/// the message.
#[derive(Clone)]
pub struct XofReader {
    base: [u64; 25],
    current: [u64; 25],
    rate: usize,
    block_index: u64,
    position: u64,
}

impl XofReader {
    fn new(base: [u64; 25], rate: usize) -> Self {
        Self {
            base,
            current: base,
            rate,
            block_index: 0,
            position: 0,
        }
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    /// Moves the read cursor to byte `position` of the output stream.
    pub fn seek(&mut self, position: u64) {
        self.position = position;
    }

    fn advance_to(&mut self, block: u64) {
        if block < self.block_index {
            self.current = self.base;
            self.block_index = 0;
        }
        while self.block_index < block {
            keccak_f1600(&mut self.current);
            self.block_index += 1;
        }
    }

    /// Fills `out` from the current position and advances past it.
    pub fn read(&mut self, out: &mut [u8]) {
        let rate = self.rate as u64;
        let mut written = 0;

        while written < out.len() {
            self.advance_to(self.position / rate);
            let offset = (self.position % rate) as usize;
            let take = (self.rate - offset).min(out.len() - written);

            for (i, byte) in out[written..written + take].iter_mut().enumerate() {
                let index = offset + i;
                *byte = (self.current[index / 8] >> (8 * (index % 8))) as u8;
            }

            written += take;
            self.position += take as u64;
        }
    }
}

pub type KeccakHasher = StreamingHasher<KeccakCodec, 168>;

impl StreamingHasher<KeccakCodec, 168> {
    fn fixed(bits: u32, suffix: u8) -> Result<Self> {
        if bits == 128 {
            return Err(Error::InvalidParameter("keccak output bits"));
        }
        Ok(Self::new(KeccakCodec::new(bits, suffix, bits as usize / 8)?))
    }

    /// Pre-standard Keccak with a 224, 256, 384 or 512-bit digest.
    pub fn keccak(bits: u32) -> Result<Self> {
        Self::fixed(bits, KECCAK_SUFFIX)
    }

    /// SHA3-224/256/384/512.
    pub fn sha3(bits: u32) -> Result<Self> {
        Self::fixed(bits, SHA3_SUFFIX)
    }

    pub fn shake128(output_len: usize) -> Result<Self> {
        Ok(Self::new(KeccakCodec::new(128, SHAKE_SUFFIX, output_len)?))
    }

    pub fn shake256(output_len: usize) -> Result<Self> {
        Ok(Self::new(KeccakCodec::new(256, SHAKE_SUFFIX, output_len)?))
    }

    /// Finalizes with an explicit domain suffix byte.
    ///
    /// The suffix only matters on the first finalization; afterwards the
    /// squeezed output is replayed unchanged.
    pub fn finalize_padded(&mut self, suffix: u8, out: &mut [u8]) -> Result<usize> {
        if !self.is_finalized() {
            self.codec_mut().suffix = suffix;
        }
        self.finalize_into(out)
    }

    /// Finalizes if needed and returns a seekable output stream.
    pub fn xof_reader(&mut self) -> Result<XofReader> {
        self.seal()?;
        let codec = self.codec();
        Ok(XofReader::new(codec.state, codec.rate()))
    }
}

fn oneshot<const L: usize>(bits: u32, suffix: u8, input: &[u8]) -> [u8; L] {
    let mut out = [0u8; L];
    let codec = KeccakCodec {
        state: [0u64; 25],
        bits,
        suffix,
        output_len: L,
    };
    KeccakHasher::oneshot(codec, input, &mut out);
    out
}

pub fn sha3_224(input: &[u8]) -> [u8; 28] {
    oneshot(224, SHA3_SUFFIX, input)
}

pub fn sha3_256(input: &[u8]) -> [u8; 32] {
    oneshot(256, SHA3_SUFFIX, input)
}

pub fn sha3_384(input: &[u8]) -> [u8; 48] {
    oneshot(384, SHA3_SUFFIX, input)
}

pub fn sha3_512(input: &[u8]) -> [u8; 64] {
    oneshot(512, SHA3_SUFFIX, input)
}

pub fn keccak256(input: &[u8]) -> [u8; 32] {
    oneshot(256, KECCAK_SUFFIX, input)
}

pub fn keccak512(input: &[u8]) -> [u8; 64] {
    oneshot(512, KECCAK_SUFFIX, input)
}
