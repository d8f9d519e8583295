//! Configuration management
//!
//! Every field has a default so partial config files are valid.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_PATH, DEFAULT_API_ORIGIN, DEFAULT_DEV_HOST, DEFAULT_DEV_PORT,
    DEFAULT_LANGUAGE, DEFAULT_PROXY_TARGET,
};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub dev_server: DevServerConfig,
    pub defaults: RequestDefaults,
}

/// Backend API client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Scheme + authority the base path is resolved against
    /// (default `http://localhost:3000`, the dev server).
    pub origin: String,
    /// Path every operation is scoped under (default `/api`).
    pub base_path: String,
    pub user_agent: Option<String>,
    /// Request timeout. `None` keeps the transport default.
    pub timeout_secs: Option<u64>,
}

impl ApiConfig {
    /// Configuration pointing straight at a base URL, e.g. a mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { origin: base_url.into(), base_path: String::new(), ..Self::default() }
    }

    /// Absolute base URL with no trailing slash, e.g. `http://localhost:3000/api`.
    pub fn base_url(&self) -> String {
        let origin = self.origin.trim_end_matches('/');
        let path = self.base_path.trim_matches('/');
        if path.is_empty() {
            origin.to_string()
        } else {
            format!("{origin}/{path}")
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_API_ORIGIN.to_string(),
            base_path: DEFAULT_API_BASE_PATH.to_string(),
            user_agent: None,
            timeout_secs: None,
        }
    }
}

/// Development server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevServerConfig {
    pub host: String,
    pub port: u16,
    /// Requests whose path starts with this prefix are proxied.
    pub proxy_prefix: String,
    pub proxy_target: String,
    /// Rewrite the `Host` header to the proxy target.
    pub change_origin: bool,
    /// Built frontend assets; `index.html` is served for SPA routes.
    pub static_dir: Option<String>,
}

impl DevServerConfig {
    /// `host:port` socket address string.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_DEV_HOST.to_string(),
            port: DEFAULT_DEV_PORT,
            proxy_prefix: DEFAULT_API_BASE_PATH.to_string(),
            proxy_target: DEFAULT_PROXY_TARGET.to_string(),
            change_origin: true,
            static_dir: None,
        }
    }
}

/// Defaults applied to requests when the caller does not specify a value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestDefaults {
    /// Language tag for import/upload (default `"zh"`).
    pub language: String,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self { language: DEFAULT_LANGUAGE.to_string() }
    }
}
