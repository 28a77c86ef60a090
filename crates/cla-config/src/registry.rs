//! Signatory registry location.

use cla_core::DEFAULT_REGISTRY_URL;
use serde::{Deserialize, Serialize};

fn default_url() -> String {
    String::from(DEFAULT_REGISTRY_URL)
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistryConfig {
    /// URL of the `contributors.json` document.
    #[serde(default = "default_url")]
    pub url: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { url: default_url() }
    }
}
