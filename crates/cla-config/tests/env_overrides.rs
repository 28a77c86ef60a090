//! Environment variable precedence.

use cla_config::ClaConfig;
use figment::Jail;

#[test]
fn legacy_variables_fill_config_values() {
    Jail::expect_with(|jail| {
        jail.set_env("TOKEN", "legacy-token");
        jail.set_env("WEBHOOK_SECRET", "legacy-secret");
        jail.set_env("PORT", "9090");
        jail.set_env("http_proxy", "http://proxy.local:8080");

        let config = ClaConfig::figment().extract::<ClaConfig>()?;
        assert_eq!(config.github.token, "legacy-token");
        assert_eq!(config.webhook.secret, "legacy-secret");
        assert_eq!(config.webhook.port, 9090);
        assert_eq!(config.http.proxy, "http://proxy.local:8080");
        Ok(())
    });
}

#[test]
fn prefixed_variables_beat_legacy_variables() {
    Jail::expect_with(|jail| {
        jail.set_env("TOKEN", "legacy-token");
        jail.set_env("CLA_CHECKER_GITHUB__TOKEN", "prefixed-token");

        let config = ClaConfig::figment().extract::<ClaConfig>()?;
        assert_eq!(config.github.token, "prefixed-token");
        Ok(())
    });
}

#[test]
fn environment_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_file("cla-checker.toml", "[webhook]\nsecret = \"from-file\"\n")?;
        jail.set_env("CLA_CHECKER_WEBHOOK__SECRET", "from-env");

        let config = ClaConfig::figment().extract::<ClaConfig>()?;
        assert_eq!(config.webhook.secret, "from-env");
        Ok(())
    });
}
