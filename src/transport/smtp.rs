//! SMTP delivery over implicit TLS using `lettre`.

use crate::core::MessageFormat;
use crate::error::TransportError;
use crate::transport::{MailTransport, OutgoingMail};
use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Opens one SMTPS session per mail, bounded by `timeout`.
#[derive(Debug, Clone)]
pub struct SmtpMailTransport {
    timeout: Duration,
}

impl SmtpMailTransport {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

/// Renders the MIME message for `mail`.
pub fn build_message(mail: &OutgoingMail) -> Result<Message, TransportError> {
    let from_address: Address = mail
        .from
        .parse()
        .map_err(|e| TransportError::Message(format!("invalid sender address: {}", e)))?;
    let to: Mailbox = mail
        .to
        .parse()
        .map_err(|e| TransportError::Message(format!("invalid recipient address: {}", e)))?;
    let content_type = match mail.format {
        MessageFormat::Plain => ContentType::TEXT_PLAIN,
        MessageFormat::Rich => ContentType::TEXT_HTML,
    };

    Message::builder()
        .from(Mailbox::new(Some(mail.sender_name.clone()), from_address))
        .to(to)
        .subject(mail.subject.clone())
        .header(content_type)
        .body(mail.body.clone())
        .map_err(|e| TransportError::Message(e.to_string()))
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    #[instrument(skip(self, mail), fields(host = %mail.host, port = mail.port))]
    async fn send(&self, mail: &OutgoingMail) -> Result<(), TransportError> {
        let message = build_message(mail)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&mail.host)
            .map_err(|e| TransportError::Smtp(e.to_string()))?
            .port(mail.port)
            .credentials(Credentials::new(mail.username.clone(), mail.password.clone()))
            .timeout(Some(self.timeout))
            .build();

        match tokio::time::timeout(self.timeout, transport.send(message)).await {
            Ok(Ok(response)) => {
                debug!(code = %response.code(), "SMTP server accepted the message");
                Ok(())
            }
            Ok(Err(e)) => {
                error!(error = %e, "SMTP delivery failed");
                Err(TransportError::Smtp(e.to_string()))
            }
            Err(_) => {
                error!("SMTP session timed out");
                Err(TransportError::Timeout)
            }
        }
    }
}
