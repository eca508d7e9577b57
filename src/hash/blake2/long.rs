//! Variable-length BLAKE2b, H' of RFC 9106 §3.3.
//!
//! Outputs of up to 64 bytes are a single BLAKE2b call over
//! `LE32(len) || input`. Longer outputs chain 64-byte digests and keep the
//! first 32 bytes of each, finishing with one digest sized to whatever
//! remains, so a length that is not a multiple of 32 still ends on a full
//! BLAKE2b invocation.

use super::blake2b::{BLAKE2B_MAX_OUT, Blake2bCodec, Blake2bHasher};
use super::params::Blake2Params;
use crate::error::{Error, Result};

fn digest(parts: &[&[u8]], out: &mut [u8]) -> Result<()> {
    let mut hasher = Blake2bHasher::new(Blake2bCodec::new(&Blake2Params::new(out.len()))?);
    for part in parts {
        hasher.absorb(part);
    }
    hasher.finalize_into(out)?;
    Ok(())
}

/// Computes `out_len` bytes of H'(input).
///
/// # Errors
/// - `InvalidParameter` if `out_len` is zero or does not fit in 32 bits.
pub fn blake2b_long(out_len: usize, input: &[u8]) -> Result<Vec<u8>> {
    if out_len == 0 {
        return Err(Error::InvalidParameter("output length"));
    }
    let prefix = u32::try_from(out_len)
        .map_err(|_| Error::InvalidParameter("output length"))?
        .to_le_bytes();

    let mut out = vec![0u8; out_len];
    if out_len <= BLAKE2B_MAX_OUT {
        digest(&[&prefix, input], &mut out)?;
        return Ok(out);
    }

    let mut v = [0u8; BLAKE2B_MAX_OUT];
    digest(&[&prefix, input], &mut v)?;
    out[..32].copy_from_slice(&v[..32]);

    let mut written = 32;
    while out_len - written > BLAKE2B_MAX_OUT {
        let previous = v;
        digest(&[&previous], &mut v)?;
        out[written..written + 32].copy_from_slice(&v[..32]);
        written += 32;
    }

    let previous = v;
    digest(&[&previous], &mut out[written..])?;
    Ok(out)
}
