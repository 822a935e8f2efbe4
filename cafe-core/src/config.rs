//! Backend location.
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_API_PORT;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    /// Backend address for a page served from `hostname`: the API runs on the
    /// same host, port 5000.
    #[must_use]
    pub fn for_page_host(hostname: &str) -> Self {
        let host = match hostname.trim() {
            "" | "localhost" => "localhost",
            other => other,
        };
        Self::new(&format!("http://{host}:{DEFAULT_API_PORT}"))
    }

    /// Prefer an explicit override, otherwise derive from the page host.
    #[must_use]
    pub fn resolve(override_url: Option<&str>, hostname: &str) -> Self {
        override_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map_or_else(|| Self::for_page_host(hostname), Self::new)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::for_page_host("localhost")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localhost_maps_to_local_api() {
        assert_eq!(
            ApiConfig::for_page_host("localhost").base_url(),
            "http://localhost:5000"
        );
        assert_eq!(ApiConfig::for_page_host("").base_url(), "http://localhost:5000");
    }

    #[test]
    fn remote_host_keeps_hostname() {
        let cfg = ApiConfig::for_page_host("10.0.0.12");
        assert_eq!(cfg.url("/login"), "http://10.0.0.12:5000/login");
        assert_eq!(cfg.url("save-order"), "http://10.0.0.12:5000/save-order");
    }

    #[test]
    fn override_wins_and_is_trimmed() {
        let cfg = ApiConfig::resolve(Some(" https://api.cafe.test/ "), "localhost");
        assert_eq!(cfg.base_url(), "https://api.cafe.test");
        let cfg = ApiConfig::resolve(Some(""), "shop.example");
        assert_eq!(cfg.base_url(), "http://shop.example:5000");
    }
}
