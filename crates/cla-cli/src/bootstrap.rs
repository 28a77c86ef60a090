use std::time::Duration;

use anyhow::Context;
use cla_config::ClaConfig;
use cla_github::GithubClient;
use cla_registry::SignatoryRegistry;

pub fn load_config() -> anyhow::Result<ClaConfig> {
    ClaConfig::load_with_dotenv().context("failed to load configuration")
}

/// The one HTTP client shared by the registry and GitHub clients.
pub fn http_client(config: &ClaConfig) -> anyhow::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .user_agent(config.github.user_agent.as_str())
        .timeout(Duration::from_secs(config.http.timeout_secs));

    if let Some(proxy) = config.http.proxy_url()? {
        tracing::debug!(%proxy, "routing outbound requests through proxy");
        let proxy = reqwest::Proxy::all(&proxy)
            .with_context(|| format!("invalid proxy URL '{proxy}'"))?;
        builder = builder.proxy(proxy);
    }

    builder.build().context("failed to build HTTP client")
}

pub fn registry(config: &ClaConfig, http: reqwest::Client) -> SignatoryRegistry {
    SignatoryRegistry::new(http, config.registry.url.as_str())
}

/// GitHub client; fails when no token is configured.
pub fn github(config: &ClaConfig, http: reqwest::Client) -> anyhow::Result<GithubClient> {
    let github = config.require_github()?;
    Ok(GithubClient::new(http, github.token.as_str())
        .with_api_url(github.api_url.as_str())
        .with_user_agent(github.user_agent.as_str()))
}
