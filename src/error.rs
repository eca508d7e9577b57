//! Crate-wide error type.
//!
//! Every fallible operation in the crate reports one of four conditions.
//! Conformance bugs (a wrong block index, a wrong padding byte) are never
//! reported here: they only show up as digests that disagree with the
//! published vectors.

use core::fmt;

/// Errors returned by hashers, memory regions and key derivation functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A digest length, key length, polynomial or cost parameter is out of
    /// range. Always reported before any compression step runs.
    InvalidParameter(&'static str),
    /// A scratch region could not grow to `requested` bytes. The region
    /// keeps its previous committed size.
    OutOfMemory { requested: usize },
    /// `update` or `finalize` was called on a state that rejects further
    /// use once finalized.
    AlreadyFinalized,
    /// Snapshot bytes do not describe a valid state for this algorithm.
    MalformedState,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameter(name) => write!(f, "invalid parameter: {name}"),
            Error::OutOfMemory { requested } => {
                write!(f, "unable to commit {requested} bytes of scratch memory")
            }
            Error::AlreadyFinalized => f.write_str("hasher already finalized"),
            Error::MalformedState => f.write_str("malformed state snapshot"),
        }
    }
}

impl std::error::Error for Error {}
