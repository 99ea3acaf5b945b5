//! Recording transports for dispatch tests.

use async_trait::async_trait;
use notifykit::transport::{HttpResponse, HttpTransport, MailTransport, OutgoingMail};
use notifykit::TransportError;
use serde_json::Value;
use std::sync::Mutex;

type Responder = Box<dyn Fn(&str) -> Result<HttpResponse, TransportError> + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub url: String,
    pub body: Value,
}

/// Records every POST and answers with a canned response.
pub struct SpyHttpTransport {
    requests: Mutex<Vec<RecordedRequest>>,
    responder: Responder,
}

impl SpyHttpTransport {
    pub fn with_responder<F>(responder: F) -> Self
    where
        F: Fn(&str) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
    {
        Self {
            requests: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        }
    }

    /// Answers every request with `200 {}`.
    pub fn ok() -> Self {
        Self::with_responder(|_| {
            Ok(HttpResponse {
                status: 200,
                body: "{}".to_string(),
            })
        })
    }

    /// Fails every request with `error`.
    pub fn failing(error: TransportError) -> Self {
        Self::with_responder(move |_| Err(error.clone()))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for SpyHttpTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            body: body.clone(),
        });
        (self.responder)(url)
    }
}

/// Records every mail and returns a fixed result.
pub struct SpyMailTransport {
    sent: Mutex<Vec<OutgoingMail>>,
    result: Result<(), TransportError>,
}

impl SpyMailTransport {
    pub fn ok() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            result: Ok(()),
        }
    }

    pub fn failing(error: TransportError) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            result: Err(error),
        }
    }

    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for SpyMailTransport {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(mail.clone());
        self.result.clone()
    }
}
