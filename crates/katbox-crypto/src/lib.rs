//! # KATBOX Crypto
//!
//! Cryptographic constructions exercised by the KATBOX conformance backend.
//!
//! This crate provides:
//! - SP 800-108 counter-mode KDF (HMAC-SHA-256 PRF, counter before fixed data)
//! - AES-XTS tweakable cipher mode (IEEE 1619, sector-number tweaks)
//! - HKDF-SHA-256 extract-and-expand derivation
//! - SP 800-90A `HMAC_DRBG` state machine (SHA-256 instantiation)
//! - Secure random generation for auto-generated test inputs
//!
//! ## Construction Suite
//!
//! | Construction | Standard | Underlying primitive |
//! |--------------|----------|----------------------|
//! | Counter KDF | SP 800-108 §5.1 | HMAC-SHA-256 |
//! | XTS | IEEE 1619 | AES-128 / AES-256 |
//! | HKDF | RFC 5869 | HMAC-SHA-256 |
//! | `HMAC_DRBG` | SP 800-90A §10.1.2 | HMAC-SHA-256 |
//!
//! The underlying primitives (the AES block cipher, HMAC, SHA-256, and the
//! HKDF schedule) come from the RustCrypto crates; the constructions above
//! are what this crate owns.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod drbg;
pub mod error;
pub mod kdf;
pub mod random;
pub mod xts;

pub use error::CryptoError;

/// Output size of the HMAC-SHA-256 PRF shared by every construction here.
pub const MAC_OUTPUT_SIZE: usize = 32;

/// AES block size; XTS operates on whole blocks only.
pub const XTS_BLOCK_SIZE: usize = 16;

/// XTS tweak size on the wire (low 8 bytes carry the sector number).
pub const XTS_TWEAK_SIZE: usize = 16;
