//! Shared HTTP client for the service adapters.
//!
//! Every adapter goes through [`HttpClient`], which issues a single GET,
//! treats any status >= 400 as a failure, and decodes the body as JSON or
//! text. The response is owned by the call and dropped on every exit path,
//! so the underlying connection is always handed back to the pool.

use std::time::Duration;

use serde_json::Value;

use crate::config::ServiceConfig;
use crate::error::ServiceError;

/// Thin GET-only wrapper around a configured [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
}

/// Build a [`reqwest::Client`] configured for the upstream APIs.
///
/// The client has:
/// - Timeout from config
/// - The configured User-Agent
/// - At most 10 redirects
///
/// # Errors
///
/// Returns [`ServiceError::Http`] if the client cannot be constructed.
pub fn build_client(config: &ServiceConfig) -> Result<reqwest::Client, ServiceError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| ServiceError::Http(format!("failed to build HTTP client: {e}")))
}

impl HttpClient {
    /// Create a client from the shared service configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Http`] if the client cannot be constructed.
    pub fn new(config: &ServiceConfig) -> Result<Self, ServiceError> {
        Ok(Self {
            inner: build_client(config)?,
        })
    }

    /// GET `url` and decode the body as JSON.
    pub async fn get_json(&self, url: &str) -> Result<Value, ServiceError> {
        self.get_json_with_headers(url, &[]).await
    }

    /// GET `url` with extra request headers and decode the body as JSON.
    pub async fn get_json_with_headers(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<Value, ServiceError> {
        let response = self.send(url, headers).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ServiceError::Http(format!("response read failed: {e}")))?;
        tracing::trace!(bytes = bytes.len(), "JSON response received");
        serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::Parse(format!("invalid JSON: {e}")))
    }

    /// GET `url` and return the body as text.
    pub async fn get_text(&self, url: &str) -> Result<String, ServiceError> {
        let response = self.send(url, &[]).await?;
        let text = response
            .text()
            .await
            .map_err(|e| ServiceError::Http(format!("response read failed: {e}")))?;
        tracing::trace!(bytes = text.len(), "text response received");
        Ok(text)
    }

    async fn send(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<reqwest::Response, ServiceError> {
        tracing::trace!(url, "GET");
        let mut request = self.inner.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ServiceError::Http(format!("request failed: {e}")))?;

        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(ServiceError::Status(status.as_u16(), url.to_string()));
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_client_with_default_config() {
        let config = ServiceConfig::default();
        assert!(build_client(&config).is_ok());
    }

    #[test]
    fn http_client_with_custom_ua() {
        let config = ServiceConfig {
            user_agent: "CustomBot/1.0".into(),
            ..Default::default()
        };
        assert!(HttpClient::new(&config).is_ok());
    }

    #[tokio::test]
    async fn unreachable_host_is_http_error() {
        let config = ServiceConfig {
            timeout_seconds: 2,
            ..Default::default()
        };
        let client = HttpClient::new(&config).expect("client");
        let err = client
            .get_json("http://127.0.0.1:1/nothing")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Http(_)));
    }
}
