//! Application-level configuration loaded from the process environment.

use std::env;

use thiserror::Error;
use tracing::{info, warn};

const TOKEN_ENV: &str = "TELEGRAM_TOKEN";
const DATABASE_URL_ENV: &str = "DATABASE_URL";
const BASE_URL_ENV: &str = "BASE_URL";
const ADMIN_ID_ENV: &str = "ADMIN_ID";
const WEBHOOK_SECRET_ENV: &str = "WEBHOOK_SECRET";
const TELEGRAM_API_URL_ENV: &str = "TELEGRAM_API_URL";
const PORT_ENVS: [&str; 2] = ["PORT", "SERVER_PORT"];

/// Telegram Bot API host used when [`TELEGRAM_API_URL_ENV`] is not set.
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
const DEFAULT_PORT: u16 = 8080;
/// Administrator id meaning "nobody may run admin commands".
pub const NO_ADMIN: i64 = 0;

/// Failures raised while reading the environment at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is absent or empty.
    #[error("required environment variable `{var}` is not set")]
    MissingEnvVar { var: &'static str },
    /// A variable is set but cannot be parsed.
    #[error("environment variable `{var}` has invalid value `{value}`")]
    InvalidEnvVar { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Bot API token from `TELEGRAM_TOKEN`.
    pub telegram_token: String,
    /// PostgreSQL connection string from `DATABASE_URL`.
    pub database_url: String,
    /// Externally reachable URL of this service, used only to register the webhook.
    pub base_url: Option<String>,
    /// Telegram user allowed to run `/raffle` and `/export`; [`NO_ADMIN`] disables them.
    pub admin_id: i64,
    /// Expected `X-Telegram-Bot-Api-Secret-Token` value, when set.
    pub webhook_secret: Option<String>,
    /// Bot API host without trailing slash.
    pub telegram_api_url: String,
    /// HTTP listen port.
    pub port: u16,
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as absent so `FOO=` behaves like an unset variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let telegram_token = get(TOKEN_ENV).ok_or(ConfigError::MissingEnvVar { var: TOKEN_ENV })?;
        let database_url = get(DATABASE_URL_ENV).ok_or(ConfigError::MissingEnvVar {
            var: DATABASE_URL_ENV,
        })?;

        let base_url = get(BASE_URL_ENV).map(|url| url.trim_end_matches('/').to_owned());
        if base_url.is_none() {
            warn!(var = BASE_URL_ENV, "not set; webhook registration is disabled");
        }

        let admin_id = match get(ADMIN_ID_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidEnvVar {
                    var: ADMIN_ID_ENV,
                    value: raw,
                })?,
            None => NO_ADMIN,
        };
        if admin_id == NO_ADMIN {
            info!("no administrator configured; admin commands are disabled");
        }

        let port = match PORT_ENVS.iter().find_map(|var| get(*var).map(|raw| (*var, raw))) {
            Some((var, raw)) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidEnvVar { var, value: raw })?,
            None => DEFAULT_PORT,
        };

        let telegram_api_url = get(TELEGRAM_API_URL_ENV)
            .map(|url| url.trim_end_matches('/').to_owned())
            .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_owned());

        Ok(Self {
            telegram_token,
            database_url,
            base_url,
            admin_id,
            webhook_secret: get(WEBHOOK_SECRET_ENV),
            telegram_api_url,
            port,
        })
    }

    /// Full URL Telegram should deliver updates to, if a base URL is known.
    pub fn webhook_url(&self) -> Option<String> {
        self.base_url
            .as_deref()
            .map(|base| format!("{base}{}", crate::routes::webhook::WEBHOOK_PATH))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn minimal_environment_uses_defaults() {
        let config =
            AppConfig::from_lookup(lookup(&[("TELEGRAM_TOKEN", "t"), ("DATABASE_URL", "postgres://db")]))
                .unwrap();

        assert_eq!(config.telegram_token, "t");
        assert_eq!(config.database_url, "postgres://db");
        assert_eq!(config.admin_id, NO_ADMIN);
        assert_eq!(config.port, 8080);
        assert_eq!(config.telegram_api_url, DEFAULT_TELEGRAM_API_URL);
        assert!(config.base_url.is_none());
        assert!(config.webhook_secret.is_none());
        assert!(config.webhook_url().is_none());
    }

    #[test]
    fn missing_token_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://db")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar { var: "TELEGRAM_TOKEN" }));
    }

    #[test]
    fn missing_database_url_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("TELEGRAM_TOKEN", "t"), ("DATABASE_URL", "  ")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar { var: "DATABASE_URL" }));
    }

    #[test]
    fn malformed_admin_id_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[
            ("TELEGRAM_TOKEN", "t"),
            ("DATABASE_URL", "postgres://db"),
            ("ADMIN_ID", "boss"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar { var: "ADMIN_ID", .. }));
    }

    #[test]
    fn webhook_url_joins_base_url_without_double_slash() {
        let config = AppConfig::from_lookup(lookup(&[
            ("TELEGRAM_TOKEN", "t"),
            ("DATABASE_URL", "postgres://db"),
            ("BASE_URL", "https://bot.example.com/"),
            ("ADMIN_ID", "42"),
            ("SERVER_PORT", "9000"),
        ]))
        .unwrap();

        assert_eq!(config.admin_id, 42);
        assert_eq!(config.port, 9000);
        assert_eq!(
            config.webhook_url().as_deref(),
            Some("https://bot.example.com/webhook")
        );
    }
}
