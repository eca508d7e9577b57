use super::session::{Algorithm, Session};
use super::staging::Staging;
use crate::error::Result;

/// One hashing session driven through a staging buffer.
///
/// The calling convention mirrors a host that can only exchange bytes
/// through shared memory: write input into [`HashHost::buffer`], call
/// [`HashHost::update`] with its length, and read the digest back from the
/// front of the same buffer after [`HashHost::finalize`].
///
/// ```rust
/// use nebula_hash::host::{Algorithm, HashHost};
///
/// let mut host = HashHost::new(Algorithm::Crc32)?;
/// host.write(b"abc")?;
/// let len = host.calculate(3, 0xEDB8_8320, 0)?;
/// assert_eq!(host.output(len), [0x35, 0x24, 0x41, 0xc2]);
/// # Ok::<(), nebula_hash::Error>(())
/// ```
pub struct HashHost {
    algorithm: Algorithm,
    staging: Staging,
    session: Session,
    init_param: u64,
}

impl HashHost {
    /// Opens a session with the algorithm's default `Init` word.
    pub fn new(algorithm: Algorithm) -> Result<Self> {
        let staging = Staging::new();
        let init_param = algorithm.default_init();
        let session = Session::open(algorithm, init_param, staging.as_slice())?;

        Ok(Self {
            algorithm,
            staging,
            session,
            init_param,
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The staging buffer, for writing input or keys in place.
    pub fn buffer(&mut self) -> &mut [u8] {
        self.staging.as_mut_slice()
    }

    /// Copies `data` to the front of the staging buffer.
    pub fn write(&mut self, data: &[u8]) -> Result<usize> {
        self.staging.write(data)
    }

    /// The first `len` bytes of the staging buffer, typically the digest.
    pub fn output(&self, len: usize) -> &[u8] {
        &self.staging.as_slice()[..len.min(self.staging.as_slice().len())]
    }

    /// Starts over with the `Init` word `param`. Keys are read from the
    /// staging buffer.
    ///
    /// # Errors
    /// - `InvalidParameter` if `param` does not decode for this algorithm.
    ///   The current session is kept.
    pub fn init(&mut self, param: u64) -> Result<()> {
        self.session = Session::open(self.algorithm, param, self.staging.as_slice())?;
        self.init_param = param;
        Ok(())
    }

    /// The `Init` word of the current session.
    pub fn init_param(&self) -> u64 {
        self.init_param
    }

    /// Absorbs the first `len` staged bytes.
    pub fn update(&mut self, len: usize) -> Result<()> {
        let data = self.staging.input(len)?;
        self.session.update(data)
    }

    /// Writes the digest over the front of the staging buffer and returns
    /// its length.
    pub fn finalize(&mut self, final_param: u32) -> Result<usize> {
        self.session
            .finalize(final_param, self.staging.as_mut_slice())
    }

    /// Serialized session state; see [`StateSnapshot`](crate::hash::StateSnapshot).
    pub fn get_state(&self) -> Vec<u8> {
        self.session.snapshot()
    }

    /// Replaces the session with a snapshot of the same algorithm.
    ///
    /// # Errors
    /// - `MalformedState` if the bytes do not decode; the current session
    ///   is kept.
    pub fn set_state(&mut self, bytes: &[u8]) -> Result<()> {
        self.session = Session::restore(self.algorithm, bytes)?;
        Ok(())
    }

    /// `init`, `update` and `finalize` in one call.
    pub fn calculate(&mut self, len: usize, init_param: u64, final_param: u32) -> Result<usize> {
        self.init(init_param)?;
        self.update(len)?;
        self.finalize(final_param)
    }
}
