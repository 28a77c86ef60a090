use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use cla_config::ClaConfig;
use cla_webhook::WebhookGateway;
use tokio::net::TcpListener;

use crate::bootstrap;
use crate::cli::root_commands::ServeArgs;

/// Handle `cla-checker serve`. Runs until the process is stopped.
pub async fn handle(args: &ServeArgs, config: &ClaConfig) -> anyhow::Result<ExitCode> {
    let webhook = config.require_webhook()?;
    let http = bootstrap::http_client(config)?;
    let registry = bootstrap::registry(config, http.clone());
    let github = bootstrap::github(config, http)?;
    let registry_url = registry.url().to_string();

    let gateway = WebhookGateway::new(
        registry,
        github,
        webhook.secret.as_bytes(),
        config.status.clone(),
    )
    .with_allowed_owners(webhook.allowed_owners.iter().cloned());

    let addr = match args.port {
        Some(port) => format!("{}:{port}", webhook.bind),
        None => webhook.listen_addr(),
    };
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        %addr,
        owners = ?webhook.allowed_owners,
        registry = %registry_url,
        "starting CLA webhook gateway"
    );
    cla_webhook::serve(listener, Arc::new(gateway))
        .await
        .context("webhook server stopped")?;
    Ok(ExitCode::SUCCESS)
}
