use std::time::Duration;

use async_trait::async_trait;
use cafe_core::testing::InMemoryBackend;
use cafe_core::{ApiConfig, ApiTransport, TransportError};
use reqwest::RequestBuilder;
use serde_json::Value;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Talks to a running cafe backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, config })
    }

    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn exchange(&self, request: RequestBuilder) -> Result<Value, TransportError> {
        let response = request
            .send()
            .await
            .map_err(|err| TransportError::Unreachable(err.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| TransportError::Unreachable(err.to_string()))?;
        log::debug!("{status} {text}");
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait(?Send)]
impl ApiTransport for HttpTransport {
    async fn post_json(&self, path: &str, body: Value) -> Result<Value, TransportError> {
        let url = self.config.url(path);
        log::debug!("POST {url}");
        self.exchange(self.client.post(url).json(&body)).await
    }

    async fn get_json(&self, path: &str) -> Result<Value, TransportError> {
        let url = self.config.url(path);
        log::debug!("GET {url}");
        self.exchange(self.client.get(url)).await
    }
}

/// Backend a scenario runs against.
#[derive(Debug, Clone)]
pub enum TesterTransport {
    /// In-process model of the backend. It can be taken offline.
    Scripted(InMemoryBackend),
    Http(HttpTransport),
}

impl TesterTransport {
    /// Take the scripted backend offline or back online. Returns `false` for a
    /// live backend, which cannot be switched.
    pub fn set_online(&self, online: bool) -> bool {
        match self {
            Self::Scripted(backend) => {
                backend.set_online(online);
                true
            }
            Self::Http(_) => false,
        }
    }

    pub const fn is_scripted(&self) -> bool {
        matches!(self, Self::Scripted(_))
    }
}

#[async_trait(?Send)]
impl ApiTransport for TesterTransport {
    async fn post_json(&self, path: &str, body: Value) -> Result<Value, TransportError> {
        match self {
            Self::Scripted(backend) => backend.post_json(path, body).await,
            Self::Http(http) => http.post_json(path, body).await,
        }
    }

    async fn get_json(&self, path: &str) -> Result<Value, TransportError> {
        match self {
            Self::Scripted(backend) => backend.get_json(path).await,
            Self::Http(http) => http.get_json(path).await,
        }
    }
}
