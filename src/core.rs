//! Core domain types and service traits for NotifyKit
//!
//! This module defines the request and outcome types that flow through a
//! dispatch, and the `Channel` contract every delivery adapter implements.

use crate::error::NotifyError;
use async_trait::async_trait;
use std::fmt;

/// How the message body should be rendered by channels that care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageFormat {
    /// Plain text.
    #[default]
    Plain,
    /// HTML (email) or the channel's rich rendering.
    Rich,
}

/// A single notification to be fanned out across every channel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationRequest {
    /// Subject line / heading of the notification
    pub title: String,
    /// Message body, passed through verbatim
    pub content: String,
    /// Body rendering hint
    pub format: MessageFormat,
}

impl NotificationRequest {
    /// Creates a new request.
    pub fn new(title: impl Into<String>, content: impl Into<String>, format: MessageFormat) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            format,
        }
    }

    /// Creates a plain-text request.
    pub fn plain(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(title, content, MessageFormat::Plain)
    }
}

/// The result of one channel invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The channel accepted the message.
    Delivered,
    /// The channel is not configured; nothing was sent.
    Skipped(String),
    /// Delivery was attempted and failed.
    Failed(String),
}

impl Outcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Outcome::Delivered)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    /// Short label used for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Delivered => "delivered",
            Outcome::Skipped(_) => "skipped",
            Outcome::Failed(_) => "failed",
        }
    }
}

impl From<Result<(), NotifyError>> for Outcome {
    fn from(result: Result<(), NotifyError>) -> Self {
        match result {
            Ok(()) => Outcome::Delivered,
            Err(e @ NotifyError::ConfigurationMissing { .. }) => Outcome::Skipped(e.to_string()),
            Err(e) => Outcome::Failed(e.to_string()),
        }
    }
}

/// Per-channel record produced by every dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelResult {
    /// Display name of the channel, e.g. "DingTalk"
    pub channel: &'static str,
    pub outcome: Outcome,
}

impl fmt::Display for ChannelResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Delivered => write!(f, "[{}]: Message push successful!", self.channel),
            Outcome::Skipped(reason) => {
                write!(f, "[{}]: Message push skipped! Reason: {}", self.channel, reason)
            }
            Outcome::Failed(reason) => {
                write!(f, "[{}]: Message push failed! Reason: {}", self.channel, reason)
            }
        }
    }
}

// =============================================================================
// Service Traits
// =============================================================================

/// A delivery adapter for one external service.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name used in results and logs
    fn name(&self) -> &'static str;

    /// Attempts a single delivery of the request.
    ///
    /// Implementations must not panic or return early with an error: missing
    /// configuration becomes `Outcome::Skipped` and every other problem
    /// `Outcome::Failed`.
    async fn send(&self, request: &NotificationRequest) -> Outcome;
}
