//! Fuzz target for the XTS mode
//!
//! Arbitrary keys, sectors, and block-aligned messages must round-trip;
//! everything else must be rejected without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;

use katbox_crypto::xts::XtsCipher;

fuzz_target!(|data: &[u8]| {
    if data.len() < 40 {
        return;
    }
    let (key, rest) = data.split_at(32);
    let (sector_bytes, msg) = rest.split_at(8);
    let sector = u64::from_le_bytes(sector_bytes.try_into().unwrap());

    let Ok(cipher) = XtsCipher::new(key) else {
        return;
    };

    let mut buf = msg.to_vec();
    match cipher.encrypt_sector(&mut buf, sector) {
        Ok(()) => {
            assert_eq!(buf.len(), msg.len());
            cipher.decrypt_sector(&mut buf, sector).expect("aligned");
            assert_eq!(buf, msg);
        }
        Err(_) => {
            // Misaligned or empty input; buffer must be untouched.
            assert_eq!(buf, msg);
        }
    }
});
