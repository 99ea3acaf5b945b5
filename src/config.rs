//! Configuration management for NotifyKit
//!
//! This module defines the main `Config` struct and its per-channel
//! sub-structs. It uses the `figment` crate to layer built-in defaults, an
//! optional TOML file, the well-known channel environment variables
//! (`EMAIL_USER`, `PUSHPLUS_TOKEN`, ...) and `NOTIFYKIT_`-prefixed
//! overrides for tunables. The result is immutable for the process lifetime.

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    value::{Dict, Value},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Channel environment variables and the `(section, field)` each one
/// populates.
const CHANNEL_ENV_VARS: &[(&str, &str, &str)] = &[
    ("EMAIL_USER", "email", "user"),
    ("EMAIL_PASS", "email", "pass"),
    ("EMAIL_TO", "email", "to"),
    ("CUSTOM_SMTP_SERVER", "email", "smtp_server"),
    ("PUSHPLUS_TOKEN", "pushplus", "token"),
    ("SERVERPUSHKEY", "serverpush", "key"),
    ("DINGDING_WEBHOOK", "dingtalk", "webhook"),
    ("DINGDING_SECRET", "dingtalk", "secret"),
    ("FEISHU_WEBHOOK", "feishu", "webhook"),
    ("WEIXIN_WEBHOOK", "wecom", "webhook"),
    ("TELEGRAM_BOT_TOKEN", "telegram", "bot_token"),
    ("TELEGRAM_CHAT_ID", "telegram", "chat_id"),
];

/// The main configuration struct for the dispatcher.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// The logging level used by `logging::init`.
    pub log_level: String,
    /// Upper bound for every HTTP call, in seconds.
    pub http_timeout_seconds: u64,
    /// Upper bound for an SMTP session, in seconds.
    pub smtp_timeout_seconds: u64,
    /// Port used for implicit-TLS SMTP.
    pub smtp_port: u16,
    /// Fixed service endpoints.
    pub endpoints: EndpointConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub pushplus: PushPlusConfig,
    #[serde(default)]
    pub serverpush: ServerPushConfig,
    #[serde(default)]
    pub dingtalk: DingTalkConfig,
    #[serde(default)]
    pub feishu: FeishuConfig,
    #[serde(default)]
    pub wecom: WeComConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
}

/// Service endpoints that are not part of a channel's credentials.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct EndpointConfig {
    /// PushPlus send endpoint.
    pub pushplus_url: String,
    /// ServerPush base URL; the key is appended as `/{key}.send`.
    pub serverpush_base: String,
    /// Telegram Bot API base URL.
    pub telegram_api_base: String,
}

/// SMTP credentials. Required: `user`, `pass`, `to`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct EmailConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Overrides the `smtp.<sender domain>` default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_server: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct PushPlusConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct ServerPushConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// DingTalk robot webhook. The secret enables signed requests.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct DingTalkConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct FeishuConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct WeComConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct TelegramConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,
}

impl Config {
    /// Loads the configuration, layering defaults, an optional TOML file and
    /// the environment.
    ///
    /// # Arguments
    /// * `config_path` - Optional path to a TOML configuration file. A
    ///   missing file is treated as empty.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }
        let config: Config = figment
            .merge(channel_env())
            // Tunables, e.g. NOTIFYKIT_HTTP_TIMEOUT_SECONDS=10
            .merge(Env::prefixed("NOTIFYKIT_").split("__"))
            .extract()?;
        Ok(config)
    }

    /// Loads the configuration from defaults and the environment only.
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            http_timeout_seconds: 30,
            smtp_timeout_seconds: 30,
            smtp_port: 465,
            endpoints: EndpointConfig {
                pushplus_url: "http://www.pushplus.plus/send".to_string(),
                serverpush_base: "https://sctapi.ftqq.com".to_string(),
                telegram_api_base: "https://api.telegram.org".to_string(),
            },
            email: EmailConfig::default(),
            pushplus: PushPlusConfig::default(),
            serverpush: ServerPushConfig::default(),
            dingtalk: DingTalkConfig::default(),
            feishu: FeishuConfig::default(),
            wecom: WeComConfig::default(),
            telegram: TelegramConfig::default(),
        }
    }
}

/// Returns the value if it is set and non-empty.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Provider for the unprefixed channel variables.
///
/// Values are taken verbatim as strings: `Env` would parse `00123456` as a
/// number and `[abc]` as an array, neither of which is a valid credential.
fn channel_env() -> Serialized<Dict> {
    let mut sections = Dict::new();
    for (var, section, field) in CHANNEL_ENV_VARS {
        let Ok(value) = std::env::var(var) else {
            continue;
        };
        let entry = sections
            .entry(section.to_string())
            .or_insert_with(|| Value::from(Dict::new()));
        if let Value::Dict(_, fields) = entry {
            fields.insert(field.to_string(), Value::from(value));
        }
    }
    Serialized::defaults(sections)
}
