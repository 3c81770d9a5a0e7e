//! AES-XTS tweakable cipher mode (IEEE 1619).
//!
//! XTS encrypts sector-sized data under two AES keys: one for the data
//! blocks, one to encrypt the sector number into the initial tweak. The
//! tweak is multiplied by alpha in GF(2^128) between blocks.
//!
//! Only whole-block messages are supported; ciphertext stealing for partial
//! tail blocks is not part of the conformance surface.

use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes128, Aes256, Block};

use crate::error::CryptoError;
use crate::XTS_BLOCK_SIZE;

/// An XTS cipher instance over AES-128 or AES-256.
///
/// The XTS key is the concatenation of the data-unit key and the tweak key,
/// so the accepted key lengths are twice the AES key size: 32 bytes for
/// AES-128-XTS, 64 bytes for AES-256-XTS.
pub struct XtsCipher {
    keys: XtsKeys,
}

enum XtsKeys {
    Aes128(Box<KeyPair<Aes128>>),
    Aes256(Box<KeyPair<Aes256>>),
}

struct KeyPair<C> {
    data: C,
    tweak: C,
}

impl XtsCipher {
    /// Split `key` into the data/tweak halves and key both AES instances.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidXtsKeyLength`] unless `key` is exactly
    /// 32 or 64 bytes.
    pub fn new(key: &[u8]) -> Result<Self, CryptoError> {
        let keys = match key.len() {
            32 => {
                let (k1, k2) = key.split_at(16);
                XtsKeys::Aes128(Box::new(KeyPair {
                    data: Aes128::new_from_slice(k1)
                        .map_err(|_| CryptoError::InvalidXtsKeyLength(key.len()))?,
                    tweak: Aes128::new_from_slice(k2)
                        .map_err(|_| CryptoError::InvalidXtsKeyLength(key.len()))?,
                }))
            }
            64 => {
                let (k1, k2) = key.split_at(32);
                XtsKeys::Aes256(Box::new(KeyPair {
                    data: Aes256::new_from_slice(k1)
                        .map_err(|_| CryptoError::InvalidXtsKeyLength(key.len()))?,
                    tweak: Aes256::new_from_slice(k2)
                        .map_err(|_| CryptoError::InvalidXtsKeyLength(key.len()))?,
                }))
            }
            n => return Err(CryptoError::InvalidXtsKeyLength(n)),
        };
        Ok(Self { keys })
    }

    /// Encrypt `msg` in place as one data unit at `sector`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::EmptyMessage`] or
    /// [`CryptoError::MisalignedMessage`] when `msg` is not a nonzero whole
    /// number of blocks.
    pub fn encrypt_sector(&self, msg: &mut [u8], sector: u64) -> Result<(), CryptoError> {
        check_alignment(msg)?;
        match &self.keys {
            XtsKeys::Aes128(pair) => {
                let tweak = initial_tweak(&pair.tweak, sector);
                process_blocks(msg, tweak, |block| pair.data.encrypt_block(block));
            }
            XtsKeys::Aes256(pair) => {
                let tweak = initial_tweak(&pair.tweak, sector);
                process_blocks(msg, tweak, |block| pair.data.encrypt_block(block));
            }
        }
        Ok(())
    }

    /// Decrypt `msg` in place as one data unit at `sector`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::EmptyMessage`] or
    /// [`CryptoError::MisalignedMessage`] when `msg` is not a nonzero whole
    /// number of blocks.
    pub fn decrypt_sector(&self, msg: &mut [u8], sector: u64) -> Result<(), CryptoError> {
        check_alignment(msg)?;
        match &self.keys {
            XtsKeys::Aes128(pair) => {
                let tweak = initial_tweak(&pair.tweak, sector);
                process_blocks(msg, tweak, |block| pair.data.decrypt_block(block));
            }
            XtsKeys::Aes256(pair) => {
                let tweak = initial_tweak(&pair.tweak, sector);
                process_blocks(msg, tweak, |block| pair.data.decrypt_block(block));
            }
        }
        Ok(())
    }
}

fn check_alignment(msg: &[u8]) -> Result<(), CryptoError> {
    if msg.is_empty() {
        return Err(CryptoError::EmptyMessage);
    }
    if msg.len() % XTS_BLOCK_SIZE != 0 {
        return Err(CryptoError::MisalignedMessage(msg.len()));
    }
    Ok(())
}

/// T(0) = AES_enc(tweak_key, LE128(sector)).
fn initial_tweak<C: BlockEncrypt>(tweak_cipher: &C, sector: u64) -> [u8; XTS_BLOCK_SIZE] {
    let mut tweak = [0u8; XTS_BLOCK_SIZE];
    tweak[..8].copy_from_slice(&sector.to_le_bytes());
    let mut block = aes::cipher::Block::<C>::clone_from_slice(&tweak);
    tweak_cipher.encrypt_block(&mut block);
    tweak.copy_from_slice(&block);
    tweak
}

/// Run every block through `transform` masked by the running tweak:
/// out = transform(in ^ T) ^ T, then T <- T * alpha.
fn process_blocks<F>(msg: &mut [u8], mut tweak: [u8; XTS_BLOCK_SIZE], transform: F)
where
    F: Fn(&mut Block),
{
    for chunk in msg.chunks_exact_mut(XTS_BLOCK_SIZE) {
        xor_in_place(chunk, &tweak);
        transform(Block::from_mut_slice(chunk));
        xor_in_place(chunk, &tweak);
        gf_mul_alpha(&mut tweak);
    }
}

fn xor_in_place(chunk: &mut [u8], tweak: &[u8; XTS_BLOCK_SIZE]) {
    for (b, t) in chunk.iter_mut().zip(tweak.iter()) {
        *b ^= t;
    }
}

/// Multiply the tweak by alpha (x) in GF(2^128) with the IEEE 1619
/// little-endian convention: shift left across bytes, feedback 0x87 into
/// byte 0 on carry out of the top bit.
fn gf_mul_alpha(tweak: &mut [u8; XTS_BLOCK_SIZE]) {
    let mut carry = 0u8;
    for byte in tweak.iter_mut() {
        let next_carry = *byte >> 7;
        *byte = (*byte << 1) | carry;
        carry = next_carry;
    }
    if carry == 1 {
        tweak[0] ^= 0x87;
    }
}
