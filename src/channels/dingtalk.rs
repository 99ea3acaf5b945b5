//! DingTalk custom robot with optional request signing.
//!
//! When a secret is configured, every request carries `timestamp` and `sign`
//! query parameters, where `sign` is the percent-encoded base64 of
//! HMAC-SHA256 keyed by the secret over `"{timestamp}\n{secret}"`. The
//! signature depends on the current time and is recomputed on every call.

use crate::channels::{expect_code, text_message, WebhookChannel, WebhookRequest};
use crate::config::{present, Config};
use crate::core::NotificationRequest;
use crate::error::NotifyError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const NAME: &str = "DingTalk";

pub struct DingTalk {
    webhook: Option<String>,
    secret: Option<String>,
}

impl DingTalk {
    pub fn from_config(config: &Config) -> Self {
        Self {
            webhook: config.dingtalk.webhook.clone(),
            secret: config.dingtalk.secret.clone(),
        }
    }
}

/// Computes the URL-encoded signature for `timestamp_ms`.
pub fn sign(secret: &str, timestamp_ms: i64) -> Result<String, NotifyError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| NotifyError::InvalidConfiguration(format!("DINGDING_SECRET: {}", e)))?;
    mac.update(format!("{}\n{}", timestamp_ms, secret).as_bytes());
    let digest = mac.finalize().into_bytes();
    Ok(urlencoding::encode(&STANDARD.encode(digest)).into_owned())
}

/// Appends `timestamp` and `sign` to the webhook URL.
pub fn signed_url(webhook: &str, secret: &str, timestamp_ms: i64) -> Result<String, NotifyError> {
    let signature = sign(secret, timestamp_ms)?;
    let separator = if webhook.contains('?') { '&' } else { '?' };
    Ok(format!(
        "{}{}timestamp={}&sign={}",
        webhook, separator, timestamp_ms, signature
    ))
}

impl WebhookChannel for DingTalk {
    fn name(&self) -> &'static str {
        NAME
    }

    fn prepare(&self, request: &NotificationRequest) -> Result<WebhookRequest, NotifyError> {
        let webhook =
            present(&self.webhook).ok_or_else(|| NotifyError::not_set(NAME, "DINGDING_WEBHOOK"))?;

        let url = match present(&self.secret) {
            Some(secret) => signed_url(webhook, secret, Utc::now().timestamp_millis())?,
            None => webhook.to_string(),
        };

        Ok(WebhookRequest {
            url,
            body: text_message(request),
        })
    }

    fn check_response(&self, body: &Value) -> Result<(), NotifyError> {
        expect_code(body, "errcode", 0, "errmsg")
    }
}
