//! WeChat Work group robot.

use crate::channels::{expect_code, text_message, WebhookChannel, WebhookRequest};
use crate::config::{present, Config};
use crate::core::NotificationRequest;
use crate::error::NotifyError;
use serde_json::Value;

const NAME: &str = "WeChat Work";

pub struct WeCom {
    webhook: Option<String>,
}

impl WeCom {
    pub fn from_config(config: &Config) -> Self {
        Self {
            webhook: config.wecom.webhook.clone(),
        }
    }
}

impl WebhookChannel for WeCom {
    fn name(&self) -> &'static str {
        NAME
    }

    fn prepare(&self, request: &NotificationRequest) -> Result<WebhookRequest, NotifyError> {
        let webhook =
            present(&self.webhook).ok_or_else(|| NotifyError::not_set(NAME, "WEIXIN_WEBHOOK"))?;

        Ok(WebhookRequest {
            url: webhook.to_string(),
            body: text_message(request),
        })
    }

    fn check_response(&self, body: &Value) -> Result<(), NotifyError> {
        expect_code(body, "errcode", 0, "errmsg")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prepare_builds_text_message() {
        let mut config = Config::default();
        config.wecom.webhook =
            Some("https://qyapi.weixin.qq.com/cgi-bin/webhook/send?key=abc".to_string());

        let prepared = WeCom::from_config(&config)
            .prepare(&NotificationRequest::plain("Deploy", "done"))
            .unwrap();

        assert_eq!(
            prepared.url,
            "https://qyapi.weixin.qq.com/cgi-bin/webhook/send?key=abc"
        );
        assert_eq!(
            prepared.body,
            json!({"msgtype": "text", "text": {"content": "Deploy\ndone"}})
        );
    }

    #[test]
    fn test_check_response_rejection() {
        let wecom = WeCom::from_config(&Config::default());
        let err = wecom
            .check_response(&json!({"errcode": 93000, "errmsg": "invalid webhook url"}))
            .unwrap_err();
        assert!(err.to_string().contains("invalid webhook url"));
    }
}
