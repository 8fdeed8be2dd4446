//! Installs the global `tracing` subscriber for the `lox` binary.
//!
//! Events go to stderr as compact `LEVEL message fields` lines without
//! timestamps, leaving stdout to the token listing.

use std::io;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::DEFAULT_LOG_FILTER;

/// Installs a subscriber filtered by `filter` (`EnvFilter` directives).
///
/// An unparsable filter falls back to the default level. Calling this when a
/// global subscriber already exists leaves the existing one in place.
pub fn init(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_target(false)
        .with_level(true)
        .with_ansi(false)
        .with_writer(io::stderr)
        .compact();

    if Registry::default().with(filter).with(layer).try_init().is_err() {
        tracing::debug!("global subscriber already installed");
    }
}
