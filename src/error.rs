//! Error types for channel delivery.

use thiserror::Error;

/// Errors raised by a transport while performing a single outbound call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("SMTP session failed: {0}")]
    Smtp(String),

    #[error("could not build message: {0}")]
    Message(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else {
            TransportError::Http(e.to_string())
        }
    }
}

/// Errors raised inside a channel adapter. They never leave the adapter:
/// `Outcome::from` turns them into a skipped or failed outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("{channel} configuration not set (missing {})", .missing.join(", "))]
    ConfigurationMissing {
        channel: &'static str,
        missing: Vec<&'static str>,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("unexpected status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("service rejected the message: {0}")]
    Protocol(String),
}

impl NotifyError {
    /// A `ConfigurationMissing` error for a single absent field.
    pub(crate) fn not_set(channel: &'static str, field: &'static str) -> Self {
        NotifyError::ConfigurationMissing {
            channel,
            missing: vec![field],
        }
    }

    /// A `ConfigurationMissing` error listing every field flagged as absent.
    pub(crate) fn missing(channel: &'static str, fields: &[(&'static str, bool)]) -> Self {
        let missing = fields
            .iter()
            .filter(|(_, present)| !present)
            .map(|(name, _)| *name)
            .collect();
        NotifyError::ConfigurationMissing { channel, missing }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_lists_only_absent_fields() {
        let err = NotifyError::missing(
            "Email",
            &[("EMAIL_USER", true), ("EMAIL_PASS", false), ("EMAIL_TO", false)],
        );
        assert_eq!(
            err.to_string(),
            "Email configuration not set (missing EMAIL_PASS, EMAIL_TO)"
        );
        assert_eq!(
            NotifyError::not_set("Feishu", "FEISHU_WEBHOOK").to_string(),
            "Feishu configuration not set (missing FEISHU_WEBHOOK)"
        );
    }

    #[test]
    fn test_transport_error_is_transparent() {
        let err = NotifyError::from(TransportError::Timeout);
        assert_eq!(err.to_string(), "request timed out");
    }
}
