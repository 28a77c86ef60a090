//! Webhook server configuration.

use serde::{Deserialize, Serialize};

const fn default_port() -> u16 {
    8080
}

fn default_bind() -> String {
    String::from("0.0.0.0")
}

fn default_allowed_owners() -> Vec<String> {
    vec![String::from("SciTools")]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebhookConfig {
    /// Shared secret configured on the GitHub webhook.
    #[serde(default)]
    pub secret: String,

    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Repository owners whose pull requests are checked.
    #[serde(default = "default_allowed_owners")]
    pub allowed_owners: Vec<String>,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            bind: default_bind(),
            port: default_port(),
            allowed_owners: default_allowed_owners(),
        }
    }
}

impl WebhookConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.secret.is_empty()
    }

    /// `bind:port` for the listener.
    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}
