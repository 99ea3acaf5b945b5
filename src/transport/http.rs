//! A `reqwest`-backed HTTP transport.

use crate::error::TransportError;
use crate::transport::{HttpResponse, HttpTransport};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Posts JSON payloads with a bounded per-request timeout.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a new `ReqwestTransport`.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Http(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, body))]
    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse, TransportError> {
        let response = self.client.post(url).json(body).send().await;

        match response {
            Ok(res) => {
                let status = res.status().as_u16();
                let text = res.text().await.map_err(TransportError::from)?;
                debug!(status, "HTTP request completed");
                Ok(HttpResponse { status, body: text })
            }
            Err(e) => {
                error!(error = %e, "HTTP request failed");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_post_json_success() {
        // Arrange
        let server = MockServer::start().await;
        let payload = json!({ "msgtype": "text", "text": { "content": "hi" } });

        Mock::given(method("POST"))
            .and(path("/webhook"))
            .and(body_json(&payload))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"errcode":0}"#))
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();

        // Act
        let response = transport
            .post_json(&format!("{}/webhook", server.uri()), &payload)
            .await
            .unwrap();

        // Assert
        assert!(response.is_success());
        assert_eq!(response.body, r#"{"errcode":0}"#);
    }

    #[tokio::test]
    async fn test_post_json_returns_non_success_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/webhook"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();
        let response = transport
            .post_json(&format!("{}/webhook", server.uri()), &json!({}))
            .await
            .unwrap();

        assert!(!response.is_success());
        assert_eq!(response.status, 500);
        assert_eq!(response.body, "boom");
    }

    #[tokio::test]
    async fn test_post_json_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/webhook"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new(Duration::from_millis(200)).unwrap();
        let result = transport
            .post_json(&format!("{}/webhook", server.uri()), &json!({}))
            .await;

        assert_eq!(result, Err(TransportError::Timeout));
    }

    #[tokio::test]
    async fn test_post_json_connection_refused() {
        // Bind and drop a listener to get a port nothing is listening on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = ReqwestTransport::new(Duration::from_secs(2)).unwrap();
        let result = transport
            .post_json(&format!("http://{}/webhook", addr), &json!({}))
            .await;

        assert!(result.is_err());
    }
}
