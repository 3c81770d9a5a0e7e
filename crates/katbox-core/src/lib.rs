//! # KATBOX Core
//!
//! Protocol plumbing for the KATBOX conformance backend.
//!
//! This crate provides:
//! - The length-prefixed multi-argument record framing over arbitrary
//!   byte streams, with bounds enforcement and buffer reuse
//! - The immutable operation registry and the dispatch/serve loop
//! - The request handlers that marshal wire arguments into the
//!   constructions in `katbox-crypto`
//! - The two-level error taxonomy (protocol vs. per-request failures)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         Serve loop                              │
//! │   (read one record, dispatch, write one reply, repeat)          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                         Registry                                │
//! │   (operation name -> handler, frozen at startup)                │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                         Channel                                 │
//! │   (length-prefixed records over stdin/stdout, reused buffers)   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod channel;
pub mod dispatch;
pub mod error;
pub mod handlers;

pub use channel::{Channel, Record, Reply};
pub use dispatch::{serve, Registry};
pub use error::{Error, ProtocolError, RequestError};

/// Maximum number of arguments in one record, requests and replies alike.
pub const MAX_ARGS: usize = 9;

/// Maximum length of any single argument payload.
pub const MAX_ARG_LENGTH: usize = 1 << 20;

/// Maximum length of argument 0 of a request, the operation name.
pub const MAX_NAME_LENGTH: usize = 30;
