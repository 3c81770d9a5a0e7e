//! Operation registry and the serve loop.
//!
//! The registry is built once at startup and never mutated afterwards; the
//! serve loop is the single owner of the channel, the registry, and all
//! per-request state, so nothing here needs synchronization.

use std::collections::HashMap;
use std::io::{Read, Write};

use crate::channel::{Channel, Reply};
use crate::error::{Error, ProtocolError, RequestError};
use crate::handlers;

/// A request handler: trailing wire arguments in, reply payloads out.
pub type Handler = fn(&[&[u8]]) -> Result<Reply, RequestError>;

/// Immutable operation-name-to-handler table.
pub struct Registry {
    operations: HashMap<&'static str, Handler>,
}

impl Registry {
    /// Build the full operation catalogue.
    #[must_use]
    pub fn new() -> Self {
        let mut operations: HashMap<&'static str, Handler> = HashMap::new();
        operations.insert("getConfig", handlers::get_config as Handler);
        operations.insert("KDF-counter", handlers::kdf_counter);
        operations.insert("AES-XTS/encrypt", handlers::xts_encrypt);
        operations.insert("AES-XTS/decrypt", handlers::xts_decrypt);
        operations.insert("HKDF/SHA2-256", handlers::hkdf);
        operations.insert("hmacDRBG-reseed/SHA2-256", handlers::drbg_reseed);
        operations.insert("hmacDRBG-pr/SHA2-256", handlers::drbg_prediction_resistance);
        Self { operations }
    }

    /// Look up `name` and run its handler over `operands`.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::UnknownOperation`] for an unregistered name, or the
    /// handler's own [`RequestError`].
    pub fn dispatch(&self, name: &str, operands: &[&[u8]]) -> Result<Reply, Error> {
        let handler = self
            .operations
            .get(name)
            .ok_or_else(|| ProtocolError::UnknownOperation(name.to_owned()))?;
        Ok(handler(operands)?)
    }

    /// Registered operation names, for diagnostics.
    pub fn operation_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.operations.keys().copied()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the request/reply loop until the stream ends or a request fails.
///
/// One record in, one reply out, strictly in turn. The loop never returns
/// `Ok`: its lifetime is bound to the harness holding the other end of the
/// channel, and the first error of any kind - framing violation, unknown
/// operation, handler rejection, I/O failure - ends the process loop.
///
/// # Errors
///
/// The terminal [`Error`]; end-of-stream surfaces as a protocol-level I/O
/// error.
pub fn serve<R: Read, W: Write>(channel: &mut Channel<R, W>, registry: &Registry) -> Result<(), Error> {
    loop {
        let record = channel.read_record()?;
        let name = record.name()?;
        let operands = record.operands();
        tracing::debug!(operation = name, operands = operands.len(), "dispatching request");
        let reply = registry.dispatch(name, operands)?;
        channel.write_reply(&reply)?;
    }
}
