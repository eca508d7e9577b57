//! PBKDF2 (RFC 8018 §5.2) over any HMAC in the crate.

use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::hash::engine::BlockCodec;
use crate::mac::hmac::{Hmac, HmacSha256, HmacSha512};

/// Fills `out` with PBKDF2 output for `mac` (already keyed with the
/// password), `salt` and `iterations`.
///
/// # Errors
/// - `InvalidParameter` if `iterations` is zero, `out` is empty, or `out`
///   would need more than `2^32 - 1` blocks.
pub fn pbkdf2<C: BlockCodec, const N: usize>(
    mac: &Hmac<C, N>,
    salt: &[u8],
    iterations: u32,
    out: &mut [u8],
) -> Result<()> {
    if iterations == 0 {
        return Err(Error::InvalidParameter("pbkdf2 iterations"));
    }
    if out.is_empty() {
        return Err(Error::InvalidParameter("pbkdf2 output length"));
    }

    let tag_len = mac.tag_len();
    if out.len().div_ceil(tag_len) > u32::MAX as usize {
        return Err(Error::InvalidParameter("pbkdf2 output length"));
    }

    let mut message = Zeroizing::new(Vec::with_capacity(salt.len() + 4));
    let mut u = Zeroizing::new(vec![0u8; tag_len]);
    let mut t = Zeroizing::new(vec![0u8; tag_len]);
    let mut previous = Zeroizing::new(vec![0u8; tag_len]);

    for (index, chunk) in out.chunks_mut(tag_len).enumerate() {
        message.clear();
        message.extend_from_slice(salt);
        message.extend_from_slice(&(index as u32 + 1).to_be_bytes());

        // U_1 = PRF(P, S || INT(i))
        mac.tag_of(&message, &mut u);
        t.copy_from_slice(&u);

        for _ in 1..iterations {
            previous.copy_from_slice(&u);
            mac.tag_of(&previous, &mut u);
            t.iter_mut().zip(u.iter()).for_each(|(t, u)| *t ^= u);
        }

        chunk.copy_from_slice(&t[..chunk.len()]);
    }

    Ok(())
}

/// PBKDF2-HMAC-SHA-256.
///
/// # Errors
/// See [`pbkdf2`].
pub fn pbkdf2_sha256(password: &[u8], salt: &[u8], iterations: u32, out: &mut [u8]) -> Result<()> {
    pbkdf2(&HmacSha256::sha256(password), salt, iterations, out)
}

/// PBKDF2-HMAC-SHA-512.
///
/// # Errors
/// See [`pbkdf2`].
pub fn pbkdf2_sha512(password: &[u8], salt: &[u8], iterations: u32, out: &mut [u8]) -> Result<()> {
    pbkdf2(&HmacSha512::sha512(password), salt, iterations, out)
}
