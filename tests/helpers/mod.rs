#![allow(dead_code)]

pub mod spy_transport;

use notifykit::config::Config;

/// A config with every channel configured against unroutable endpoints.
pub fn fully_configured() -> Config {
    let mut config = Config::default();
    config.email.user = Some("bot@example.com".to_string());
    config.email.pass = Some("hunter2".to_string());
    config.email.to = Some("ops@example.com".to_string());
    config.pushplus.token = Some("pp-token".to_string());
    config.serverpush.key = Some("SCT123".to_string());
    config.dingtalk.webhook =
        Some("https://oapi.dingtalk.com/robot/send?access_token=abc".to_string());
    config.dingtalk.secret = Some("s3cr3t".to_string());
    config.feishu.webhook = Some("https://open.feishu.cn/open-apis/bot/v2/hook/x".to_string());
    config.wecom.webhook =
        Some("https://qyapi.weixin.qq.com/cgi-bin/webhook/send?key=k".to_string());
    config.telegram.bot_token = Some("123abc".to_string());
    config.telegram.chat_id = Some("42".to_string());
    config
}
