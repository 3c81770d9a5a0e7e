//! Key derivation: SP 800-108 counter mode and RFC 5869 HKDF.
//!
//! Provides:
//! - Counter-mode KDF with HMAC-SHA-256 as the PRF, the 32-bit counter
//!   placed before the fixed data (SP 800-108 §5.1)
//! - HKDF-SHA-256 extract-then-expand

use hkdf::Hkdf;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::CryptoError;
use crate::MAC_OUTPUT_SIZE;

type HmacSha256 = Hmac<Sha256>;

/// Fixed-data context length for the counter-mode KDF.
///
/// The harness never supplies fixed data; a fresh 8-byte context is drawn
/// per request and echoed back in the reply.
pub const FIXED_DATA_SIZE: usize = 8;

/// Derive `output_bytes` of keying material with the SP 800-108 counter-mode
/// construction: `K(i) = HMAC-SHA-256(key, BE32(i) || fixed_data)` for
/// `i` in `1..=n`, concatenated and truncated.
///
/// The block count `n = ceil(output_bytes / 32)` is computed in 32-bit
/// arithmetic, so `output_bytes + 31` overflowing u32 is rejected up front,
/// before the output buffer exists.
///
/// # Errors
///
/// Returns [`CryptoError::OutputLengthOverflow`] when the block-count
/// computation would overflow, [`CryptoError::MacInitFailed`] if the MAC
/// rejects the key.
pub fn counter_kdf(
    key: &[u8],
    fixed_data: &[u8; FIXED_DATA_SIZE],
    output_bytes: u32,
) -> Result<Vec<u8>, CryptoError> {
    let padded = output_bytes
        .checked_add(31)
        .ok_or(CryptoError::OutputLengthOverflow(output_bytes))?;
    let n = padded / 32;

    let base = HmacSha256::new_from_slice(key).map_err(|_| CryptoError::MacInitFailed)?;
    let mut out = Vec::with_capacity(n as usize * MAC_OUTPUT_SIZE);
    for i in 1..=n {
        let mut mac = base.clone();
        mac.update(&i.to_be_bytes());
        mac.update(fixed_data);
        out.extend_from_slice(&mac.finalize().into_bytes());
    }

    out.truncate(output_bytes as usize);
    Ok(out)
}

/// Derive `out.len()` bytes with HKDF-SHA-256 over (key material, salt,
/// info). An empty salt is equivalent to the RFC 5869 default of a
/// zero-filled salt of hash length.
///
/// # Errors
///
/// Returns [`CryptoError::ExpandLimitExceeded`] when the requested length is
/// beyond the 255-block expand limit.
pub fn hkdf_sha256(ikm: &[u8], salt: &[u8], info: &[u8], out: &mut [u8]) -> Result<(), CryptoError> {
    let hk = Hkdf::<Sha256>::new(Some(salt), ikm);
    hk.expand(info, out)
        .map_err(|_| CryptoError::ExpandLimitExceeded(out.len()))
}
