//! Error types for the KATBOX protocol core.
//!
//! Two levels, kept apart on purpose: [`ProtocolError`] means the framing
//! itself can no longer be trusted and the stream is unrecoverable;
//! [`RequestError`] means one request carried arguments a handler rejects.
//! The serve loop's policy today treats both as fatal, but handlers never
//! decide that themselves.

use thiserror::Error;

use crate::{MAX_ARGS, MAX_ARG_LENGTH, MAX_NAME_LENGTH};

/// Top-level failure of the serve loop.
#[derive(Debug, Error)]
pub enum Error {
    /// Framing or dispatch violation
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// A handler rejected its arguments
    #[error("request failed: {0}")]
    Request(#[from] RequestError),
}

/// Violations of the wire framing or of dispatch; always fatal because the
/// protocol has no way to resynchronize mid-record.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A record announced zero arguments
    #[error("invalid, zero-argument operation requested")]
    EmptyRecord,

    /// A record announced more arguments than the protocol allows
    #[error("operation requested with {count} args, but {max} is the limit", max = MAX_ARGS)]
    TooManyArguments {
        /// Announced argument count
        count: usize,
    },

    /// The operation-name argument exceeds the name limit
    #[error("operation with name of length {len} exceeded limit of {max}", max = MAX_NAME_LENGTH)]
    NameTooLong {
        /// Announced name length
        len: usize,
    },

    /// An argument exceeds the per-argument limit
    #[error("operation with argument of length {len} exceeded limit of {max}", max = MAX_ARG_LENGTH)]
    ArgumentTooLong {
        /// Announced argument length
        len: usize,
    },

    /// The operation name is not UTF-8
    #[error("operation name is not valid UTF-8")]
    NameNotUtf8,

    /// No handler is registered under the requested name
    #[error("unknown operation {0:?}")]
    UnknownOperation(String),

    /// The underlying stream failed or ended
    #[error("channel I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-request failures raised by handlers. Locally recoverable in
/// principle; the loop policy decides what they cost.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Handler invoked with the wrong number of operands
    #[error("{operation} received {actual} args, wanted {expected}")]
    WrongOperandCount {
        /// Operation name
        operation: &'static str,
        /// Expected operand count
        expected: usize,
        /// Received operand count
        actual: usize,
    },

    /// A u32 wire argument was not exactly 4 bytes
    #[error("uint32 argument was {0} bytes long")]
    MalformedLength(usize),

    /// A parameter value outside the advertised capabilities
    #[error("unsupported {what} {value:?}")]
    UnsupportedParameter {
        /// Which parameter was rejected
        what: &'static str,
        /// The offending value, lossily decoded
        value: String,
    },

    /// Tweak bytes do not encode a sector number
    #[error("tweak with invalid structure, only 'number' tweaks are supported")]
    InvalidTweak,

    /// The cryptographic construction rejected the inputs
    #[error(transparent)]
    Crypto(#[from] katbox_crypto::CryptoError),
}
