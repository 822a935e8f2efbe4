//! Browser `fetch` transport for the cafe backend.
use async_trait::async_trait;
use cafe_core::{ApiConfig, ApiTransport, SessionClient, TransportError};
use serde_json::Value;

use crate::dom;
use crate::storage::LocalSessionStore;

pub type WebSessionClient = SessionClient<WebTransport, LocalSessionStore>;

/// Backend address: `CAFE_API_URL` at build time, otherwise port 5000 on the
/// host that served the page.
#[must_use]
pub fn api_config() -> ApiConfig {
    ApiConfig::resolve(option_env!("CAFE_API_URL"), &dom::page_hostname())
}

#[must_use]
pub fn session_client() -> WebSessionClient {
    SessionClient::new(WebTransport::new(api_config()), LocalSessionStore)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebTransport {
    config: ApiConfig,
}

impl WebTransport {
    #[must_use]
    pub const fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    async fn exchange(&self, path: &str, body: Option<&str>) -> Result<Value, TransportError> {
        let url = self.config.url(path);
        let text = dom::fetch_text(&url, body)
            .await
            .map_err(|err| TransportError::Unreachable(dom::js_error_message(&err)))?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait(?Send)]
impl ApiTransport for WebTransport {
    async fn post_json(&self, path: &str, body: Value) -> Result<Value, TransportError> {
        self.exchange(path, Some(&body.to_string())).await
    }

    async fn get_json(&self, path: &str) -> Result<Value, TransportError> {
        self.exchange(path, None).await
    }
}
