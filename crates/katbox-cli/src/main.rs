//! KATBOX conformance responder
//!
//! Driven entirely through length-prefixed records on stdin/stdout by an
//! ACVP-style validation harness; diagnostics and fatal errors go to
//! stderr so the reply stream stays clean.

use std::io;

use anyhow::Context;
use katbox_core::{serve, Channel, Registry};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Logging must stay off stdout: the harness reads replies there.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();

    let registry = Registry::new();
    tracing::debug!("operation registry ready");

    let mut channel = Channel::new(io::stdin().lock(), io::stdout().lock());
    serve(&mut channel, &registry).context("request loop ended")
}
