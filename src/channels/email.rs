//! Email over SMTPS.

use crate::config::{present, Config, EmailConfig};
use crate::core::{Channel, NotificationRequest, Outcome};
use crate::error::NotifyError;
use crate::transport::{MailTransport, OutgoingMail};
use async_trait::async_trait;
use lettre::Address;
use std::sync::Arc;
use tracing::instrument;

const NAME: &str = "Email";

/// Display name used in the `From` header.
pub const SENDER_NAME: &str = "newapi.ai Assistant";

pub struct Email {
    config: EmailConfig,
    port: u16,
    transport: Arc<dyn MailTransport>,
}

impl Email {
    pub fn from_config(config: &Config, transport: Arc<dyn MailTransport>) -> Self {
        Self {
            config: config.email.clone(),
            port: config.smtp_port,
            transport,
        }
    }

    /// Validates the configuration and builds the mail.
    pub fn prepare(&self, request: &NotificationRequest) -> Result<OutgoingMail, NotifyError> {
        let (user, pass, to) = match (
            present(&self.config.user),
            present(&self.config.pass),
            present(&self.config.to),
        ) {
            (Some(user), Some(pass), Some(to)) => (user, pass, to),
            (user, pass, to) => {
                return Err(NotifyError::missing(
                    NAME,
                    &[
                        ("EMAIL_USER", user.is_some()),
                        ("EMAIL_PASS", pass.is_some()),
                        ("EMAIL_TO", to.is_some()),
                    ],
                ))
            }
        };

        let sender: Address = user.parse().map_err(|e| {
            NotifyError::InvalidConfiguration(format!(
                "EMAIL_USER '{}' is not an email address: {}",
                user, e
            ))
        })?;
        let host = match present(&self.config.smtp_server) {
            Some(host) => host.to_string(),
            None => format!("smtp.{}", sender.domain()),
        };

        Ok(OutgoingMail {
            host,
            port: self.port,
            username: user.to_string(),
            password: pass.to_string(),
            sender_name: SENDER_NAME.to_string(),
            from: user.to_string(),
            to: to.to_string(),
            subject: request.title.clone(),
            body: request.content.clone(),
            format: request.format,
        })
    }

    async fn try_send(&self, request: &NotificationRequest) -> Result<(), NotifyError> {
        let mail = self.prepare(request)?;
        self.transport.send(&mail).await?;
        Ok(())
    }
}

#[async_trait]
impl Channel for Email {
    fn name(&self) -> &'static str {
        NAME
    }

    #[instrument(skip_all, fields(channel = NAME))]
    async fn send(&self, request: &NotificationRequest) -> Outcome {
        self.try_send(request).await.into()
    }
}
