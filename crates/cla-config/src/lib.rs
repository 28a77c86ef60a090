//! # cla-config
//!
//! Layered configuration loading for the CLA checker using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CLA_CHECKER_*` prefix, `__` as separator)
//! 2. Bare `TOKEN`, `WEBHOOK_SECRET`, `PORT` and `http_proxy` variables
//! 3. Project-level `./cla-checker.toml`
//! 4. User-level `~/.config/cla-checker/config.toml`
//! 5. Built-in defaults
//!
//! Configuration is read once at process start and passed down explicitly;
//! nothing re-reads it per request.
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CLA_CHECKER_GITHUB__TOKEN` -> `github.token`,
//! `CLA_CHECKER_WEBHOOK__ALLOWED_OWNERS` -> `webhook.allowed_owners`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use cla_config::ClaConfig;
//!
//! let config = ClaConfig::load_with_dotenv().expect("config");
//! let github = config.require_github().expect("token");
//! println!("GitHub API: {}", github.api_url);
//! ```

mod error;
mod github;
mod http;
mod registry;
mod webhook;

pub use error::ConfigError;
pub use github::GithubConfig;
pub use http::HttpConfig;
pub use registry::RegistryConfig;
pub use webhook::WebhookConfig;

use cla_core::StatusSettings;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Bare variable names understood for compatibility with existing deployments.
const LEGACY_ENV_KEYS: [&str; 4] = ["TOKEN", "WEBHOOK_SECRET", "PORT", "HTTP_PROXY"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ClaConfig {
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub webhook: WebhookConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub status: StatusSettings,
}

impl ClaConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing .env is the normal case in deployments.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from("cla-checker.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: bare legacy variables
        figment = figment.merge(
            Env::raw()
                .only(&LEGACY_ENV_KEYS)
                .map(|key| legacy_key(key.as_str()).into()),
        );

        // Layer 4: prefixed environment variables (highest priority)
        figment.merge(Env::prefixed("CLA_CHECKER_").split("__"))
    }

    /// The GitHub section, if a token is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when the token is missing.
    pub fn require_github(&self) -> Result<&GithubConfig, ConfigError> {
        if self.github.is_configured() {
            Ok(&self.github)
        } else {
            Err(ConfigError::NotConfigured {
                section: String::from("github"),
                missing: String::from("token (set TOKEN or CLA_CHECKER_GITHUB__TOKEN)"),
            })
        }
    }

    /// The webhook section, if a shared secret is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when the secret is missing, and
    /// [`ConfigError::InvalidValue`] when no repository owner is allowed.
    pub fn require_webhook(&self) -> Result<&WebhookConfig, ConfigError> {
        if !self.webhook.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: String::from("webhook"),
                missing: String::from(
                    "secret (set WEBHOOK_SECRET or CLA_CHECKER_WEBHOOK__SECRET)",
                ),
            });
        }
        if self
            .webhook
            .allowed_owners
            .iter()
            .all(|owner| owner.trim().is_empty())
        {
            return Err(ConfigError::InvalidValue {
                field: String::from("webhook.allowed_owners"),
                reason: String::from("at least one repository owner is required"),
            });
        }
        Ok(&self.webhook)
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cla-checker").join("config.toml"))
    }
}

/// Map a bare variable name onto its nested config key.
fn legacy_key(key: &str) -> String {
    let mapped = match key.to_ascii_lowercase().as_str() {
        "token" => "github.token",
        "webhook_secret" => "webhook.secret",
        "port" => "webhook.port",
        "http_proxy" => "http.proxy",
        _ => return key.to_ascii_lowercase(),
    };
    String::from(mapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = ClaConfig::default();
        assert!(!config.github.is_configured());
        assert!(!config.webhook.is_configured());
        assert_eq!(config.status.context, "SciTools-CLA-checker");
    }

    #[test]
    fn missing_token_is_reported() {
        let err = ClaConfig::default().require_github().unwrap_err();
        assert!(matches!(err, ConfigError::NotConfigured { ref section, .. } if section == "github"));
    }

    #[test]
    fn missing_secret_is_reported() {
        let err = ClaConfig::default().require_webhook().unwrap_err();
        assert!(err.to_string().contains("webhook"));
    }

    #[test]
    fn empty_owner_list_is_rejected() {
        let mut config = ClaConfig::default();
        config.webhook.secret = String::from("s3cret");
        assert!(config.require_webhook().is_ok());

        config.webhook.allowed_owners = Vec::new();
        let err = config.require_webhook().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "webhook.allowed_owners"));

        config.webhook.allowed_owners = vec![String::from("  ")];
        assert!(config.require_webhook().is_err());
    }

    #[test]
    fn legacy_keys_map_to_sections() {
        assert_eq!(legacy_key("TOKEN"), "github.token");
        assert_eq!(legacy_key("http_proxy"), "http.proxy");
        assert_eq!(legacy_key("HTTP_PROXY"), "http.proxy");
        assert_eq!(legacy_key("PORT"), "webhook.port");
        assert_eq!(legacy_key("WEBHOOK_SECRET"), "webhook.secret");
    }
}
