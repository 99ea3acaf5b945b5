//! Outbound transports used by the channel adapters.
//!
//! Channels never talk to the network directly. They hand a fully built
//! request to an `HttpTransport` or `MailTransport`, which keeps the adapters
//! testable with spies and lets callers swap the production clients.

pub mod http;
pub mod smtp;

use crate::core::MessageFormat;
use crate::error::TransportError;
use async_trait::async_trait;
use serde_json::Value;

pub use http::ReqwestTransport;
pub use smtp::SmtpMailTransport;

/// Status and body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a single JSON POST.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Posts `body` as JSON to `url`.
    ///
    /// # Returns
    /// * `Ok(HttpResponse)` for any response received, including non-2xx
    /// * `Err` for timeouts and connection or protocol errors
    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse, TransportError>;
}

/// A single email ready to be handed to an SMTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    /// SMTP host to connect to
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Display name shown in the `From` header
    pub sender_name: String,
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub format: MessageFormat,
}

impl OutgoingMail {
    /// MIME subtype of the body: `plain` or `html`.
    pub fn subtype(&self) -> &'static str {
        match self.format {
            MessageFormat::Plain => "plain",
            MessageFormat::Rich => "html",
        }
    }
}

/// Delivers one email in one SMTP session.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), TransportError>;
}
