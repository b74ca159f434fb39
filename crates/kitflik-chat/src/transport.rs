//! Transport abstraction for the prompt endpoint

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::error::{Error, Result};

/// Transport for exchanging a prompt for a plaintext reply.
///
/// One operation: send the raw user prompt, get the reply body. The trait
/// seam exists so the event loop can be driven by a mock in tests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a prompt and return the reply body verbatim.
    async fn send(&self, prompt: &str) -> Result<String>;
}

/// HTTP transport: `POST`s the prompt as a UTF-8 plaintext body to a fixed
/// endpoint and reads the plaintext response body. No envelope, no JSON.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Create a transport for the given endpoint URL
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// The endpoint this transport posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, prompt: &str) -> Result<String> {
        tracing::debug!(endpoint = %self.endpoint, "sending prompt");

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(prompt.to_string())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                code: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Canned transport used to exercise the trait seam.
    struct FixedTransport {
        reply: std::result::Result<String, u16>,
    }

    #[async_trait]
    impl Transport for FixedTransport {
        async fn send(&self, _prompt: &str) -> Result<String> {
            match &self.reply {
                Ok(body) => Ok(body.clone()),
                Err(code) => Err(Error::Status { code: *code }),
            }
        }
    }

    #[tokio::test]
    async fn test_trait_object_dispatch() {
        let transport: Box<dyn Transport> = Box::new(FixedTransport {
            reply: Ok("Hello!".to_string()),
        });
        let body = transport.send("Hi").await.unwrap();
        assert_eq!(body, "Hello!");
    }

    #[tokio::test]
    async fn test_trait_object_failure() {
        let transport: Box<dyn Transport> = Box::new(FixedTransport { reply: Err(502) });
        let err = transport.send("Hi").await.unwrap_err();
        assert!(matches!(err, Error::Status { code: 502 }));
    }

    #[test]
    fn test_endpoint_accessor() {
        let t = HttpTransport::new("http://localhost:8080/api/recommend");
        assert_eq!(t.endpoint(), "http://localhost:8080/api/recommend");
    }
}
