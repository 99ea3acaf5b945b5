//! PushPlus push service.

use crate::channels::{expect_code, WebhookChannel, WebhookRequest};
use crate::config::{present, Config};
use crate::core::NotificationRequest;
use crate::error::NotifyError;
use serde_json::{json, Value};

const NAME: &str = "PushPlus";

pub struct PushPlus {
    token: Option<String>,
    url: String,
}

impl PushPlus {
    pub fn from_config(config: &Config) -> Self {
        Self {
            token: config.pushplus.token.clone(),
            url: config.endpoints.pushplus_url.clone(),
        }
    }
}

impl WebhookChannel for PushPlus {
    fn name(&self) -> &'static str {
        NAME
    }

    fn prepare(&self, request: &NotificationRequest) -> Result<WebhookRequest, NotifyError> {
        let token = present(&self.token).ok_or_else(|| NotifyError::not_set(NAME, "PUSHPLUS_TOKEN"))?;

        Ok(WebhookRequest {
            url: self.url.clone(),
            body: json!({
                "token": token,
                "title": request.title,
                "content": request.content,
                "template": "html",
            }),
        })
    }

    // PushPlus answers 200 with {"code": 200} on success.
    fn check_response(&self, body: &Value) -> Result<(), NotifyError> {
        expect_code(body, "code", 200, "msg")
    }
}
