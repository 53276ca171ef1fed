//! Watcher configuration: TOML file merged with environment overrides.
//!
//! Everything has a default, so a bare `kumo run` tracks GLD and publishes a
//! snapshot without any file present. Notification is enabled only when the
//! SMTP section is complete AND at least one recipient is configured; the
//! SMTP password never lives in the file, only in `KUMO_SMTP_PASSWORD`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_TICKER: &str = "GLD";
pub const DEFAULT_LEDGER_PATH: &str = "data/signal-history.json";
pub const DEFAULT_SNAPSHOT_PATH: &str = "public/snapshot.json";

/// Raw TOML shape. All sections optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    watch: WatchSection,
    notify: NotifySection,
    paths: PathsSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct WatchSection {
    ticker: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct NotifySection {
    recipients: Vec<String>,
    smtp_host: Option<String>,
    smtp_port: Option<u16>,
    smtp_user: Option<String>,
    from: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PathsSection {
    ledger: Option<PathBuf>,
    snapshot: Option<PathBuf>,
}

/// Resolved configuration as the runner consumes it.
#[derive(Debug, Clone)]
pub struct Config {
    pub ticker: String,
    pub recipients: Vec<String>,
    pub smtp: Option<SmtpConfig>,
    pub ledger_path: PathBuf,
    pub snapshot_path: PathBuf,
}

/// Complete SMTP transport settings. Absence means snapshot-only mode.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub from: String,
}

impl Config {
    /// Load from an optional TOML file, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                toml::from_str(&content)
                    .with_context(|| format!("parsing config file {}", path.display()))?
            }
            None => ConfigFile::default(),
        };
        Ok(Self::resolve(file, |name| env::var(name).ok()))
    }

    fn resolve(file: ConfigFile, env: impl Fn(&str) -> Option<String>) -> Self {
        let ticker = env("KUMO_TICKER")
            .or(file.watch.ticker)
            .unwrap_or_else(|| DEFAULT_TICKER.to_string());

        let recipients = match env("KUMO_RECIPIENTS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string)
                .collect(),
            None => file.notify.recipients,
        };

        let smtp = match (
            file.notify.smtp_host,
            file.notify.smtp_user,
            file.notify.from,
            env("KUMO_SMTP_PASSWORD"),
        ) {
            (Some(host), Some(user), Some(from), Some(password)) => Some(SmtpConfig {
                host,
                port: file.notify.smtp_port.unwrap_or(587),
                user,
                password,
                from,
            }),
            _ => None,
        };

        let ledger_path = env("KUMO_LEDGER_PATH")
            .map(PathBuf::from)
            .or(file.paths.ledger)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LEDGER_PATH));

        let snapshot_path = env("KUMO_SNAPSHOT_PATH")
            .map(PathBuf::from)
            .or(file.paths.snapshot)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH));

        Self {
            ticker,
            recipients,
            smtp,
            ledger_path,
            snapshot_path,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::resolve(ConfigFile::default(), |_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_without_file_or_env() {
        let config = Config::resolve(ConfigFile::default(), no_env);
        assert_eq!(config.ticker, "GLD");
        assert!(config.recipients.is_empty());
        assert!(config.smtp.is_none());
        assert_eq!(config.ledger_path, PathBuf::from(DEFAULT_LEDGER_PATH));
        assert_eq!(config.snapshot_path, PathBuf::from(DEFAULT_SNAPSHOT_PATH));
    }

    #[test]
    fn file_values_apply() {
        let file: ConfigFile = toml::from_str(
            r#"
            [watch]
            ticker = "SLV"

            [notify]
            recipients = ["ops@example.com", "alerts@example.com"]
            smtp_host = "smtp.example.com"
            smtp_user = "watcher@example.com"
            from = "watcher@example.com"

            [paths]
            ledger = "/var/lib/kumo/history.json"
            snapshot = "/srv/www/snapshot.json"
            "#,
        )
        .unwrap();

        let config = Config::resolve(file, no_env);
        assert_eq!(config.ticker, "SLV");
        assert_eq!(config.recipients.len(), 2);
        // No password in the environment: notification stays disabled.
        assert!(config.smtp.is_none());
        assert_eq!(config.ledger_path, PathBuf::from("/var/lib/kumo/history.json"));
    }

    #[test]
    fn smtp_enabled_only_with_password_from_env() {
        let file: ConfigFile = toml::from_str(
            r#"
            [notify]
            recipients = ["ops@example.com"]
            smtp_host = "smtp.example.com"
            smtp_port = 2525
            smtp_user = "watcher@example.com"
            from = "watcher@example.com"
            "#,
        )
        .unwrap();

        let config = Config::resolve(file, |name| {
            (name == "KUMO_SMTP_PASSWORD").then(|| "hunter2".to_string())
        });

        let smtp = config.smtp.expect("smtp should be configured");
        assert_eq!(smtp.host, "smtp.example.com");
        assert_eq!(smtp.port, 2525);
        assert_eq!(smtp.password, "hunter2");
    }

    #[test]
    fn env_overrides_file() {
        let file: ConfigFile = toml::from_str(
            r#"
            [watch]
            ticker = "SLV"

            [notify]
            recipients = ["file@example.com"]
            "#,
        )
        .unwrap();

        let config = Config::resolve(file, |name| match name {
            "KUMO_TICKER" => Some("IAU".to_string()),
            "KUMO_RECIPIENTS" => Some("a@example.com, b@example.com".to_string()),
            "KUMO_SNAPSHOT_PATH" => Some("/tmp/snap.json".to_string()),
            _ => None,
        });

        assert_eq!(config.ticker, "IAU");
        assert_eq!(
            config.recipients,
            vec!["a@example.com".to_string(), "b@example.com".to_string()]
        );
        assert_eq!(config.snapshot_path, PathBuf::from("/tmp/snap.json"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let parsed: Result<ConfigFile, _> = toml::from_str("[watch]\nsymbol = \"GLD\"\n");
        assert!(parsed.is_err());
    }
}
