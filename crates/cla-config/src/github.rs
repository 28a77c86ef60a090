//! GitHub API configuration.

use cla_core::{DEFAULT_API_URL, DEFAULT_USER_AGENT};
use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    String::from(DEFAULT_API_URL)
}

fn default_user_agent() -> String {
    String::from(DEFAULT_USER_AGENT)
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GithubConfig {
    /// API token used as `Authorization: token <TOKEN>`.
    #[serde(default)]
    pub token: String,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_url: default_api_url(),
            user_agent: default_user_agent(),
        }
    }
}

impl GithubConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.token.is_empty() && !self.user_agent.is_empty()
    }
}
