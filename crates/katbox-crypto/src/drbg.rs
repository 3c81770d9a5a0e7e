//! SP 800-90A `HMAC_DRBG`, SHA-256 instantiation.
//!
//! A deterministic random-bit generator holding a working key `K` and value
//! `V`, each one MAC output wide, plus a reseed counter. No derivation
//! function; entropy, nonce, and personalization are fed straight into the
//! update procedure. The conformance handlers drive the same engine through
//! different reseed/generate sequences, so the state transitions live here
//! and only the call order lives in the handlers.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::MAC_OUTPUT_SIZE;

type HmacSha256 = Hmac<Sha256>;

/// `HMAC_DRBG` working state (SP 800-90A §10.1.2).
///
/// The generator is fully deterministic given the seed material passed to
/// [`HmacDrbg::new`], [`HmacDrbg::reseed`], and [`HmacDrbg::generate`].
/// State is wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct HmacDrbg {
    key: [u8; MAC_OUTPUT_SIZE],
    value: [u8; MAC_OUTPUT_SIZE],
    reseed_counter: u64,
}

impl HmacDrbg {
    /// Instantiate from `entropy || nonce || personalization`
    /// (SP 800-90A §10.1.2.3): K = 0x00.., V = 0x01.., one update with the
    /// seed material, reseed counter 1.
    #[must_use]
    pub fn new(entropy: &[u8], nonce: &[u8], personalization: &[u8]) -> Self {
        let mut drbg = Self {
            key: [0x00; MAC_OUTPUT_SIZE],
            value: [0x01; MAC_OUTPUT_SIZE],
            reseed_counter: 1,
        };
        drbg.update(&[entropy, nonce, personalization]);
        drbg
    }

    /// Reseed from fresh entropy and optional additional input
    /// (SP 800-90A §10.1.2.4). Resets the reseed counter.
    pub fn reseed(&mut self, entropy: &[u8], additional_input: &[u8]) {
        self.update(&[entropy, additional_input]);
        self.reseed_counter = 1;
    }

    /// Fill `out` with generated bits (SP 800-90A §10.1.2.5).
    ///
    /// Nonempty additional input is folded into the state before generation;
    /// the post-generation update runs unconditionally, with the same
    /// additional input. An empty slice means no additional input.
    pub fn generate(&mut self, out: &mut [u8], additional_input: &[u8]) {
        if !additional_input.is_empty() {
            self.update(&[additional_input]);
        }

        let mut filled = 0;
        while filled < out.len() {
            self.value = self.keyed_mac(&[&self.value]);
            let take = (out.len() - filled).min(MAC_OUTPUT_SIZE);
            out[filled..filled + take].copy_from_slice(&self.value[..take]);
            filled += take;
        }

        self.update(&[additional_input]);
        self.reseed_counter += 1;
    }

    /// Requests served since instantiation or the last reseed.
    #[must_use]
    pub fn reseed_counter(&self) -> u64 {
        self.reseed_counter
    }

    /// `HMAC_DRBG` update procedure (SP 800-90A §10.1.2.2):
    /// K = HMAC(K, V || 0x00 || data); V = HMAC(K, V); and when `data` is
    /// nonempty, the same pair again with separator 0x01.
    fn update(&mut self, data: &[&[u8]]) {
        let nonempty = data.iter().any(|d| !d.is_empty());

        self.key = self.keyed_mac_with(&[0x00], data);
        self.value = self.keyed_mac(&[&self.value]);

        if nonempty {
            self.key = self.keyed_mac_with(&[0x01], data);
            self.value = self.keyed_mac(&[&self.value]);
        }
    }

    /// HMAC(K, V || separator || data...).
    fn keyed_mac_with(&self, separator: &[u8; 1], data: &[&[u8]]) -> [u8; MAC_OUTPUT_SIZE] {
        let mut parts: Vec<&[u8]> = Vec::with_capacity(data.len() + 2);
        parts.push(&self.value);
        parts.push(separator);
        parts.extend_from_slice(data);
        self.keyed_mac(&parts)
    }

    /// HMAC under the current working key over the concatenated parts.
    fn keyed_mac(&self, parts: &[&[u8]]) -> [u8; MAC_OUTPUT_SIZE] {
        // HMAC accepts keys of any length, so a 32-byte key cannot fail.
        let mut mac = HmacSha256::new_from_slice(&self.key).expect("HMAC accepts any key length");
        for part in parts {
            mac.update(part);
        }
        mac.finalize().into_bytes().into()
    }
}
