//! Delivery adapters, one per external service.
//!
//! Every HTTP service follows the same shape: validate configuration, build a
//! JSON request, POST it once, inspect the reply. Those services implement
//! `WebhookChannel` and are wrapped in `HttpChannel`, which owns the
//! delivery step. Email has its own `Channel` implementation.

pub mod dingtalk;
pub mod email;
pub mod feishu;
pub mod pushplus;
pub mod serverpush;
pub mod telegram;
pub mod wecom;

use crate::core::{Channel, NotificationRequest, Outcome};
use crate::error::NotifyError;
use crate::transport::HttpTransport;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;

pub use dingtalk::DingTalk;
pub use email::Email;
pub use feishu::Feishu;
pub use pushplus::PushPlus;
pub use serverpush::ServerPush;
pub use telegram::Telegram;
pub use wecom::WeCom;

/// A fully built outbound request.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookRequest {
    pub url: String,
    pub body: Value,
}

/// The per-service half of an HTTP channel.
pub trait WebhookChannel: Send + Sync {
    fn name(&self) -> &'static str;

    /// Validates configuration and builds the request.
    ///
    /// Returns `NotifyError::ConfigurationMissing` when a required field is
    /// absent.
    fn prepare(&self, request: &NotificationRequest) -> Result<WebhookRequest, NotifyError>;

    /// Inspects a 2xx JSON reply for an explicit rejection.
    fn check_response(&self, _body: &Value) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Delivers a `WebhookChannel` request through an `HttpTransport`.
pub struct HttpChannel<C> {
    inner: C,
    transport: Arc<dyn HttpTransport>,
}

impl<C: WebhookChannel> HttpChannel<C> {
    pub fn new(inner: C, transport: Arc<dyn HttpTransport>) -> Self {
        Self { inner, transport }
    }

    async fn try_send(&self, request: &NotificationRequest) -> Result<(), NotifyError> {
        let prepared = self.inner.prepare(request)?;
        let response = self
            .transport
            .post_json(&prepared.url, &prepared.body)
            .await?;

        if !response.is_success() {
            return Err(NotifyError::HttpStatus {
                status: response.status,
                body: response.body,
            });
        }

        let reply: Value = serde_json::from_str(&response.body)
            .map_err(|e| NotifyError::Protocol(format!("malformed response: {}", e)))?;
        self.inner.check_response(&reply)
    }
}

#[async_trait]
impl<C: WebhookChannel> Channel for HttpChannel<C> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    #[instrument(skip_all, fields(channel = self.inner.name()))]
    async fn send(&self, request: &NotificationRequest) -> Outcome {
        self.try_send(request).await.into()
    }
}

/// `{msgtype: "text", text: {content: "{title}\n{content}"}}`, shared by
/// DingTalk and WeChat Work.
pub(crate) fn text_message(request: &NotificationRequest) -> Value {
    json!({
        "msgtype": "text",
        "text": { "content": format!("{}\n{}", request.title, request.content) },
    })
}

/// Fails when `field` is present in `reply` and differs from `expected`.
pub(crate) fn expect_code(
    reply: &Value,
    field: &str,
    expected: i64,
    message_field: &str,
) -> Result<(), NotifyError> {
    match reply.get(field) {
        Some(code) if code.as_i64() != Some(expected) => {
            let message = reply
                .get(message_field)
                .and_then(Value::as_str)
                .unwrap_or("no message");
            Err(NotifyError::Protocol(format!("{}={}: {}", field, code, message)))
        }
        _ => Ok(()),
    }
}
