//! Feishu (Lark) custom bot, sent as an interactive card.

use crate::channels::{expect_code, WebhookChannel, WebhookRequest};
use crate::config::{present, Config};
use crate::core::NotificationRequest;
use crate::error::NotifyError;
use serde_json::{json, Value};

const NAME: &str = "Feishu";

pub struct Feishu {
    webhook: Option<String>,
}

impl Feishu {
    pub fn from_config(config: &Config) -> Self {
        Self {
            webhook: config.feishu.webhook.clone(),
        }
    }
}

impl WebhookChannel for Feishu {
    fn name(&self) -> &'static str {
        NAME
    }

    fn prepare(&self, request: &NotificationRequest) -> Result<WebhookRequest, NotifyError> {
        let webhook =
            present(&self.webhook).ok_or_else(|| NotifyError::not_set(NAME, "FEISHU_WEBHOOK"))?;

        Ok(WebhookRequest {
            url: webhook.to_string(),
            body: json!({
                "msg_type": "interactive",
                "card": {
                    "elements": [
                        { "tag": "markdown", "content": request.content, "text_align": "left" }
                    ],
                    "header": {
                        "template": "blue",
                        "title": { "content": request.title, "tag": "plain_text" },
                    },
                },
            }),
        })
    }

    // Current API replies with `code`, older bots with `StatusCode`.
    fn check_response(&self, body: &Value) -> Result<(), NotifyError> {
        expect_code(body, "code", 0, "msg")?;
        expect_code(body, "StatusCode", 0, "StatusMessage")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feishu() -> Feishu {
        let mut config = Config::default();
        config.feishu.webhook = Some("https://open.feishu.cn/open-apis/bot/v2/hook/x".to_string());
        Feishu::from_config(&config)
    }

    #[test]
    fn test_prepare_builds_card() {
        let prepared = feishu()
            .prepare(&NotificationRequest::plain("Nightly", "**3** jobs failed"))
            .unwrap();

        assert_eq!(prepared.url, "https://open.feishu.cn/open-apis/bot/v2/hook/x");
        assert_eq!(prepared.body["msg_type"], "interactive");
        assert_eq!(
            prepared.body["card"]["elements"][0],
            json!({"tag": "markdown", "content": "**3** jobs failed", "text_align": "left"})
        );
        assert_eq!(prepared.body["card"]["header"]["template"], "blue");
        assert_eq!(
            prepared.body["card"]["header"]["title"],
            json!({"content": "Nightly", "tag": "plain_text"})
        );
    }

    #[test]
    fn test_check_response_accepts_both_reply_styles() {
        let channel = feishu();
        assert!(channel.check_response(&json!({"code": 0, "msg": "success"})).is_ok());
        assert!(channel.check_response(&json!({"StatusCode": 0})).is_ok());
        assert!(channel
            .check_response(&json!({"code": 19021, "msg": "sign match fail"}))
            .is_err());
    }
}
