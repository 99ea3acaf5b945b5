//! Tracing subscriber setup for processes embedding the dispatcher.

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs a global fmt subscriber.
///
/// `RUST_LOG` takes precedence over `log_level` when set. Returns an error
/// when a global subscriber is already installed.
pub fn init(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))
}
