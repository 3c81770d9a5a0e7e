//! Fuzz target for record framing
//!
//! Feeds arbitrary bytes to the channel reader: malformed counts, lengths,
//! and truncated payloads must surface as errors, never as panics.

#![no_main]

use libfuzzer_sys::fuzz_target;

use katbox_core::Channel;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    let mut channel = Channel::new(Cursor::new(data.to_vec()), Vec::<u8>::new());
    // Every record that parses must satisfy the documented invariants.
    if let Ok(record) = channel.read_record() {
        let _ = record.name();
        assert!(record.operands().len() < 9);
    }
});
