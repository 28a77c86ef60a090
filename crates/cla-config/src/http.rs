//! Outbound HTTP settings shared by the registry and GitHub clients.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    /// Outbound proxy, either a URL or the bare `host:port` form.
    #[serde(default)]
    pub proxy: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            proxy: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl HttpConfig {
    /// Proxy as a URL, if one is configured.
    ///
    /// `host:port` is read as `http://host:port`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a bare proxy value has no
    /// numeric port.
    pub fn proxy_url(&self) -> Result<Option<String>, ConfigError> {
        let proxy = self.proxy.trim();
        if proxy.is_empty() {
            return Ok(None);
        }
        if proxy.contains("://") {
            return Ok(Some(proxy.to_string()));
        }

        let invalid = || ConfigError::InvalidValue {
            field: String::from("http.proxy"),
            reason: format!("expected 'host:port', got '{proxy}'"),
        };
        let (host, port) = proxy.rsplit_once(':').ok_or_else(invalid)?;
        if host.is_empty() || port.parse::<u16>().is_err() {
            return Err(invalid());
        }
        Ok(Some(format!("http://{proxy}")))
    }
}
