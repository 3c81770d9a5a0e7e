//! Length-prefixed record framing over byte streams.
//!
//! Every record is `u32 argCount`, then one little-endian `u32` length per
//! argument, then the payloads concatenated in order. Requests carry the
//! operation name as argument 0; replies have no name slot. Bounds are
//! enforced while reading, before any payload is touched.

use std::io::{Read, Write};

use crate::error::ProtocolError;
use crate::{MAX_ARGS, MAX_ARG_LENGTH, MAX_NAME_LENGTH};

/// One reply record: owned result payloads, written in order.
pub type Reply = Vec<Vec<u8>>;

/// A framed record channel over a reader/writer pair.
///
/// The channel owns a scratch buffer for argument payloads; its capacity is
/// retained across records so steady-state reads do not reallocate. A
/// [`Record`] borrows that buffer and must be dropped before the next read.
pub struct Channel<R, W> {
    reader: R,
    writer: W,
    scratch: Vec<u8>,
    lengths: [usize; MAX_ARGS],
}

/// A parsed request record borrowed from the channel's scratch buffer.
#[derive(Debug)]
pub struct Record<'a> {
    args: Vec<&'a [u8]>,
}

impl<'a> Record<'a> {
    /// The operation name, argument 0, decoded as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::NameNotUtf8`] for a non-UTF-8 name.
    pub fn name(&self) -> Result<&'a str, ProtocolError> {
        std::str::from_utf8(self.args[0]).map_err(|_| ProtocolError::NameNotUtf8)
    }

    /// The operation-specific arguments, everything after the name.
    #[must_use]
    pub fn operands(&self) -> &[&'a [u8]] {
        &self.args[1..]
    }
}

impl<R: Read, W: Write> Channel<R, W> {
    /// Create a channel over `reader`/`writer`.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            scratch: Vec::new(),
            lengths: [0; MAX_ARGS],
        }
    }

    /// Read exactly one request record, blocking until it is complete.
    ///
    /// Argument count and lengths are validated before the payload bytes
    /// are read; the returned [`Record`] stays valid until the next call.
    ///
    /// # Errors
    ///
    /// Any [`ProtocolError`] leaves the stream unusable: either the limits
    /// were violated or the underlying read failed (including end of
    /// stream, which surfaces as an I/O error).
    pub fn read_record(&mut self) -> Result<Record<'_>, ProtocolError> {
        let mut word = [0u8; 4];
        self.reader.read_exact(&mut word)?;
        let arg_count = u32::from_le_bytes(word) as usize;
        if arg_count == 0 {
            return Err(ProtocolError::EmptyRecord);
        }
        if arg_count > MAX_ARGS {
            return Err(ProtocolError::TooManyArguments { count: arg_count });
        }

        let mut len_words = [0u8; 4 * MAX_ARGS];
        self.reader.read_exact(&mut len_words[..4 * arg_count])?;

        let mut need = 0usize;
        for i in 0..arg_count {
            let w = &len_words[4 * i..4 * i + 4];
            let len = u32::from_le_bytes([w[0], w[1], w[2], w[3]]) as usize;
            if i == 0 && len > MAX_NAME_LENGTH {
                return Err(ProtocolError::NameTooLong { len });
            }
            if len > MAX_ARG_LENGTH {
                return Err(ProtocolError::ArgumentTooLong { len });
            }
            self.lengths[i] = len;
            need += len;
        }

        // Grow only; retained capacity is the reuse the steady state needs.
        if self.scratch.len() < need {
            self.scratch.resize(need, 0);
        }
        self.reader.read_exact(&mut self.scratch[..need])?;

        let mut args = Vec::with_capacity(arg_count);
        let mut rest: &[u8] = &self.scratch[..need];
        for &len in &self.lengths[..arg_count] {
            let (head, tail) = rest.split_at(len);
            args.push(head);
            rest = tail;
        }
        Ok(Record { args })
    }

    /// Write one reply record and flush it.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::TooManyArguments`] when the reply exceeds
    /// the argument limit, or the underlying write error.
    pub fn write_reply(&mut self, reply: &Reply) -> Result<(), ProtocolError> {
        if reply.len() > MAX_ARGS {
            return Err(ProtocolError::TooManyArguments { count: reply.len() });
        }

        let mut header = [0u8; 4 * (1 + MAX_ARGS)];
        header[..4].copy_from_slice(&(reply.len() as u32).to_le_bytes());
        for (i, arg) in reply.iter().enumerate() {
            header[4 * (i + 1)..4 * (i + 2)].copy_from_slice(&(arg.len() as u32).to_le_bytes());
        }

        self.writer.write_all(&header[..4 * (1 + reply.len())])?;
        for arg in reply {
            self.writer.write_all(arg)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Tear down the channel and recover the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}
