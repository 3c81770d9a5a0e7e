//! Property-based tests for the KATBOX backend
//!
//! Uses proptest to verify invariants across large input spaces.

use proptest::prelude::*;

// ============================================================================
// Wire Framing Properties
// ============================================================================

mod framing_properties {
    use super::*;
    use katbox_integration_tests::{decode_replies, encode_request};
    use std::io::Cursor;

    use katbox_core::{Channel, Reply};

    proptest! {
        /// Any in-limits request record reads back argument-for-argument.
        #[test]
        fn request_roundtrip(
            name in prop::collection::vec(any::<u8>(), 1..=30),
            operands in prop::collection::vec(
                prop::collection::vec(any::<u8>(), 0..256),
                0..8,
            ),
        ) {
            let mut args: Vec<&[u8]> = vec![&name];
            args.extend(operands.iter().map(Vec::as_slice));

            let mut channel = Channel::new(Cursor::new(encode_request(&args)), Vec::<u8>::new());
            let record = channel.read_record().expect("valid record");
            prop_assert_eq!(record.operands().len(), operands.len());
            for (read, sent) in record.operands().iter().zip(operands.iter()) {
                prop_assert_eq!(*read, sent.as_slice());
            }
        }

        /// A written reply parses back to the same payloads.
        #[test]
        fn reply_roundtrip(
            payloads in prop::collection::vec(
                prop::collection::vec(any::<u8>(), 0..256),
                0..=9,
            ),
        ) {
            let reply: Reply = payloads.clone();
            let mut channel = Channel::new(Cursor::new(Vec::new()), Vec::<u8>::new());
            channel.write_reply(&reply).expect("within limits");
            let written = channel.into_writer();

            let parsed = decode_replies(&written);
            prop_assert_eq!(parsed.len(), 1);
            prop_assert_eq!(&parsed[0], &payloads);
        }
    }
}

// ============================================================================
// AES-XTS Properties
// ============================================================================

mod xts_properties {
    use super::*;
    use katbox_crypto::xts::XtsCipher;

    proptest! {
        /// Decrypt inverts encrypt for both key sizes, any sector, any
        /// whole-block message.
        #[test]
        fn xts_roundtrip(
            key in prop::collection::vec(any::<u8>(), 32..=32),
            wide_key in prop::collection::vec(any::<u8>(), 64..=64),
            blocks in 1usize..8,
            sector in any::<u64>(),
        ) {
            for key in [&key, &wide_key] {
                let cipher = XtsCipher::new(key).expect("key");
                let plain: Vec<u8> = (0..blocks * 16).map(|i| (i & 0xff) as u8).collect();
                let mut msg = plain.clone();
                cipher.encrypt_sector(&mut msg, sector).expect("encrypt");
                prop_assert_ne!(&msg, &plain);
                cipher.decrypt_sector(&mut msg, sector).expect("decrypt");
                prop_assert_eq!(&msg, &plain);
            }
        }

        /// Every block of ciphertext differs from its plaintext block even
        /// for repeating plaintext: the tweak sequence masks positions.
        #[test]
        fn xts_blocks_position_dependent(
            key in prop::collection::vec(any::<u8>(), 32..=32),
            block in prop::collection::vec(any::<u8>(), 16..=16),
            sector in any::<u64>(),
        ) {
            let cipher = XtsCipher::new(&key).expect("key");
            let mut msg = Vec::new();
            msg.extend_from_slice(&block);
            msg.extend_from_slice(&block);
            cipher.encrypt_sector(&mut msg, sector).expect("encrypt");
            // Identical plaintext blocks encrypt differently by position.
            prop_assert_ne!(&msg[..16], &msg[16..]);
        }
    }
}

// ============================================================================
// KDF Properties
// ============================================================================

mod kdf_properties {
    use super::*;
    use katbox_crypto::kdf::{counter_kdf, hkdf_sha256, FIXED_DATA_SIZE};

    proptest! {
        /// Derived output is exactly the requested length and deterministic
        /// given key and fixed data.
        #[test]
        fn counter_kdf_length_and_determinism(
            key in prop::collection::vec(any::<u8>(), 0..64),
            fixed in any::<[u8; FIXED_DATA_SIZE]>(),
            len in 0u32..2048,
        ) {
            let first = counter_kdf(&key, &fixed, len).expect("derive");
            prop_assert_eq!(first.len(), len as usize);
            let second = counter_kdf(&key, &fixed, len).expect("derive");
            prop_assert_eq!(first, second);
        }

        /// A longer request extends a shorter one: truncation is the only
        /// difference between output lengths.
        #[test]
        fn counter_kdf_prefix_consistency(
            key in prop::collection::vec(any::<u8>(), 1..64),
            fixed in any::<[u8; FIXED_DATA_SIZE]>(),
            short in 1u32..256,
            extra in 1u32..256,
        ) {
            let small = counter_kdf(&key, &fixed, short).expect("derive");
            let large = counter_kdf(&key, &fixed, short + extra).expect("derive");
            prop_assert_eq!(&large[..short as usize], small.as_slice());
        }

        /// HKDF output is deterministic and exactly sized.
        #[test]
        fn hkdf_length_and_determinism(
            ikm in prop::collection::vec(any::<u8>(), 0..64),
            salt in prop::collection::vec(any::<u8>(), 0..64),
            info in prop::collection::vec(any::<u8>(), 0..64),
            len in 0usize..512,
        ) {
            let mut first = vec![0u8; len];
            let mut second = vec![0u8; len];
            hkdf_sha256(&ikm, &salt, &info, &mut first).expect("expand");
            hkdf_sha256(&ikm, &salt, &info, &mut second).expect("expand");
            prop_assert_eq!(first, second);
        }
    }
}

// ============================================================================
// HMAC_DRBG Properties
// ============================================================================

mod drbg_properties {
    use super::*;
    use katbox_crypto::drbg::HmacDrbg;

    proptest! {
        /// The generator is fully deterministic given its seed material.
        #[test]
        fn drbg_deterministic(
            entropy in prop::collection::vec(any::<u8>(), 16..48),
            nonce in prop::collection::vec(any::<u8>(), 8..24),
            pers in prop::collection::vec(any::<u8>(), 0..48),
            additional in prop::collection::vec(any::<u8>(), 0..48),
            len in 1usize..128,
        ) {
            let mut a = HmacDrbg::new(&entropy, &nonce, &pers);
            let mut b = HmacDrbg::new(&entropy, &nonce, &pers);
            let mut out_a = vec![0u8; len];
            let mut out_b = vec![0u8; len];
            a.generate(&mut out_a, &additional);
            b.generate(&mut out_b, &additional);
            prop_assert_eq!(out_a, out_b);
        }

        /// Reseeding between generates changes the stream relative to not
        /// reseeding.
        #[test]
        fn drbg_reseed_diverges(
            entropy in prop::collection::vec(any::<u8>(), 16..48),
            reseed_entropy in prop::collection::vec(any::<u8>(), 16..48),
        ) {
            let mut reseeded = HmacDrbg::new(&entropy, b"nonce", b"");
            let mut straight = HmacDrbg::new(&entropy, b"nonce", b"");
            reseeded.reseed(&reseed_entropy, b"");
            let mut out_a = [0u8; 32];
            let mut out_b = [0u8; 32];
            reseeded.generate(&mut out_a, b"");
            straight.generate(&mut out_b, b"");
            prop_assert_ne!(out_a, out_b);
        }
    }
}
