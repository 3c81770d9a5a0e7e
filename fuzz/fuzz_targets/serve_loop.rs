//! Fuzz target for the full serve loop
//!
//! Arbitrary input streams through dispatch and the handlers; the loop must
//! terminate with an error (end of stream at the latest) and never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;

use katbox_core::{serve, Channel, Registry};
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    let registry = Registry::new();
    let mut channel = Channel::new(Cursor::new(data.to_vec()), Vec::<u8>::new());
    let _ = serve(&mut channel, &registry);
});
