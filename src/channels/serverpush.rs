//! ServerPush (ServerChan Turbo).

use crate::channels::{expect_code, WebhookChannel, WebhookRequest};
use crate::config::{present, Config};
use crate::core::NotificationRequest;
use crate::error::NotifyError;
use serde_json::{json, Value};

const NAME: &str = "Server Push";

pub struct ServerPush {
    key: Option<String>,
    base: String,
}

impl ServerPush {
    pub fn from_config(config: &Config) -> Self {
        Self {
            key: config.serverpush.key.clone(),
            base: config.endpoints.serverpush_base.clone(),
        }
    }
}

impl WebhookChannel for ServerPush {
    fn name(&self) -> &'static str {
        NAME
    }

    fn prepare(&self, request: &NotificationRequest) -> Result<WebhookRequest, NotifyError> {
        let key = present(&self.key).ok_or_else(|| NotifyError::not_set(NAME, "SERVERPUSHKEY"))?;

        Ok(WebhookRequest {
            url: format!("{}/{}.send", self.base.trim_end_matches('/'), key),
            body: json!({
                "title": request.title,
                "desp": request.content,
            }),
        })
    }

    fn check_response(&self, body: &Value) -> Result<(), NotifyError> {
        expect_code(body, "code", 0, "message")
    }
}
