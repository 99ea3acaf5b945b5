//! The dispatcher fans a notification out to every channel.
//!
//! Channels are attempted in a fixed declaration order and each one is fully
//! isolated: a skipped, failed or even panicking channel never prevents the
//! next one from running, and `push` itself cannot fail.

use crate::channels::{DingTalk, Email, Feishu, HttpChannel, PushPlus, ServerPush, Telegram, WeCom};
use crate::config::Config;
use crate::core::{Channel, ChannelResult, MessageFormat, NotificationRequest, Outcome};
use crate::error::TransportError;
use crate::transport::{HttpTransport, MailTransport, ReqwestTransport, SmtpMailTransport};
use futures::future::join_all;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

/// Holds the statically configured list of channels.
pub struct Dispatcher {
    channels: Vec<Box<dyn Channel>>,
}

impl Dispatcher {
    /// Creates a dispatcher over an explicit channel list.
    pub fn new(channels: Vec<Box<dyn Channel>>) -> Self {
        Self { channels }
    }

    /// Builds the standard channel set in declaration order: Email, PushPlus,
    /// Server Push, DingTalk, Feishu, WeChat Work, Telegram.
    pub fn from_config(
        config: &Config,
        http: Arc<dyn HttpTransport>,
        mail: Arc<dyn MailTransport>,
    ) -> Self {
        let channels: Vec<Box<dyn Channel>> = vec![
            Box::new(Email::from_config(config, mail)),
            Box::new(HttpChannel::new(PushPlus::from_config(config), http.clone())),
            Box::new(HttpChannel::new(ServerPush::from_config(config), http.clone())),
            Box::new(HttpChannel::new(DingTalk::from_config(config), http.clone())),
            Box::new(HttpChannel::new(Feishu::from_config(config), http.clone())),
            Box::new(HttpChannel::new(WeCom::from_config(config), http.clone())),
            Box::new(HttpChannel::new(Telegram::from_config(config), http)),
        ];
        Self::new(channels)
    }

    /// Builds the standard channel set backed by `reqwest` and `lettre`.
    pub fn with_default_transports(config: &Config) -> Result<Self, TransportError> {
        let http = ReqwestTransport::new(Duration::from_secs(config.http_timeout_seconds))?;
        let mail = SmtpMailTransport::new(Duration::from_secs(config.smtp_timeout_seconds));
        Ok(Self::from_config(config, Arc::new(http), Arc::new(mail)))
    }

    /// Names of the channels, in the order they are attempted.
    pub fn channel_names(&self) -> Vec<&'static str> {
        self.channels.iter().map(|c| c.name()).collect()
    }

    /// Sends a plain-text notification to every channel.
    pub async fn push_message(&self, title: &str, content: &str) -> Vec<ChannelResult> {
        self.push(title, content, MessageFormat::Plain).await
    }

    /// Sends a notification to every channel, one after another.
    ///
    /// Always returns one result per channel, in declaration order.
    #[instrument(skip(self, content), fields(channels = self.channels.len()))]
    pub async fn push(&self, title: &str, content: &str, format: MessageFormat) -> Vec<ChannelResult> {
        let request = NotificationRequest::new(title, content, format);
        let mut results = Vec::with_capacity(self.channels.len());
        for channel in &self.channels {
            results.push(invoke(channel.as_ref(), &request).await);
        }
        results
    }

    /// Sends a notification to every channel at once.
    ///
    /// Results are returned in declaration order, exactly as `push` would.
    #[instrument(skip(self, content), fields(channels = self.channels.len()))]
    pub async fn push_concurrent(
        &self,
        title: &str,
        content: &str,
        format: MessageFormat,
    ) -> Vec<ChannelResult> {
        let request = NotificationRequest::new(title, content, format);
        join_all(
            self.channels
                .iter()
                .map(|channel| invoke(channel.as_ref(), &request)),
        )
        .await
    }
}

/// Runs one channel, converting a panic into `Outcome::Failed`.
async fn invoke(channel: &dyn Channel, request: &NotificationRequest) -> ChannelResult {
    let name = channel.name();
    let start = Instant::now();

    let outcome = match AssertUnwindSafe(channel.send(request)).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(payload) => Outcome::Failed(format!("channel panicked: {}", panic_message(&*payload))),
    };

    metrics::histogram!("notification_send_duration_seconds", "channel" => name)
        .record(start.elapsed().as_secs_f64());
    metrics::counter!("notifications_total", "channel" => name, "outcome" => outcome.label())
        .increment(1);

    let result = ChannelResult {
        channel: name,
        outcome,
    };
    match &result.outcome {
        Outcome::Failed(_) => warn!(channel = name, "{}", result),
        _ => info!(channel = name, "{}", result),
    }
    result
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
