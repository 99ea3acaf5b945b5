//! Telegram Bot API `sendMessage`.

use crate::channels::{WebhookChannel, WebhookRequest};
use crate::config::{present, Config};
use crate::core::NotificationRequest;
use crate::error::NotifyError;
use serde_json::{json, Value};

const NAME: &str = "Telegram";

pub struct Telegram {
    bot_token: Option<String>,
    chat_id: Option<String>,
    api_base: String,
}

impl Telegram {
    pub fn from_config(config: &Config) -> Self {
        Self {
            bot_token: config.telegram.bot_token.clone(),
            chat_id: config.telegram.chat_id.clone(),
            api_base: config.endpoints.telegram_api_base.clone(),
        }
    }
}

impl WebhookChannel for Telegram {
    fn name(&self) -> &'static str {
        NAME
    }

    fn prepare(&self, request: &NotificationRequest) -> Result<WebhookRequest, NotifyError> {
        let (token, chat_id) = match (present(&self.bot_token), present(&self.chat_id)) {
            (Some(token), Some(chat_id)) => (token, chat_id),
            (token, chat_id) => {
                return Err(NotifyError::missing(
                    NAME,
                    &[
                        ("TELEGRAM_BOT_TOKEN", token.is_some()),
                        ("TELEGRAM_CHAT_ID", chat_id.is_some()),
                    ],
                ))
            }
        };

        Ok(WebhookRequest {
            url: format!(
                "{}/bot{}/sendMessage",
                self.api_base.trim_end_matches('/'),
                token
            ),
            body: json!({
                "chat_id": chat_id,
                "text": format!("*{}*\n{}", request.title, request.content),
                "parse_mode": "Markdown",
            }),
        })
    }

    fn check_response(&self, body: &Value) -> Result<(), NotifyError> {
        if body.get("ok").and_then(Value::as_bool) == Some(false) {
            let description = body
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("no description");
            return Err(NotifyError::Protocol(description.to_string()));
        }
        Ok(())
    }
}
