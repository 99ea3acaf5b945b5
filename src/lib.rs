//! NotifyKit - multi-channel notification dispatcher
//!
//! Sends a title and message body to email and a fixed set of push, webhook
//! and bot services. Every channel is attempted independently; a channel
//! that is unconfigured or fails never prevents the others from running.
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! use notifykit::{config::Config, dispatcher::Dispatcher};
//!
//! let config = Config::from_env()?;
//! let dispatcher = Dispatcher::with_default_transports(&config)?;
//! for result in dispatcher.push_message("Build Failed", "job 42 failed").await {
//!     println!("{}", result);
//! }
//! # Ok(())
//! # }
//! ```

pub mod channels;
pub mod config;
pub mod core;
pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod transport;

// Re-export core types for convenience
pub use crate::core::*;
pub use crate::dispatcher::Dispatcher;
pub use crate::error::{NotifyError, TransportError};
