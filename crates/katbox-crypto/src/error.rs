//! Cryptographic error types.

use thiserror::Error;

/// Errors produced by the cryptographic constructions.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// XTS key length is neither 32 bytes (AES-128) nor 64 bytes (AES-256)
    #[error("invalid XTS key length: {0} bytes, wanted 32 or 64")]
    InvalidXtsKeyLength(usize),

    /// XTS message is not a whole number of blocks
    #[error("XTS message of {0} bytes is not a multiple of the 16-byte block size")]
    MisalignedMessage(usize),

    /// XTS message is empty
    #[error("XTS message is empty, need at least one block")]
    EmptyMessage,

    /// Requested KDF output overflows the 32-bit block-count computation
    #[error("KDF output length {0} overflows the block-count computation")]
    OutputLengthOverflow(u32),

    /// Requested HKDF output exceeds the RFC 5869 expand limit
    #[error("HKDF output length {0} exceeds the expand limit")]
    ExpandLimitExceeded(usize),

    /// MAC key was rejected by the underlying primitive
    #[error("MAC initialization failed")]
    MacInitFailed,

    /// OS random source failed
    #[error("random number generation failed")]
    RandomFailed,
}
