//! Configuration for the bot, read once from the environment at startup.

use crate::error::ConfigError;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
const DEFAULT_RETRY_SECS: u64 = 600;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

const DEFAULT_LOG_FILE: &str = "homework_bot.log";
const DEFAULT_LOG_MAX_BYTES: u64 = 50_000_000;
const DEFAULT_LOG_BACKUPS: usize = 5;

/// The three secrets the bot cannot run without.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl Credentials {
    /// Names of the environment variables that are empty or unset.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("PRACTICUM_TOKEN", &self.practicum_token),
            ("TELEGRAM_TOKEN", &self.telegram_token),
            ("TELEGRAM_CHAT_ID", &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

// Tokens must never end up in log lines.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(value: &str) -> &'static str {
            if value.is_empty() {
                "<empty>"
            } else {
                "<redacted>"
            }
        }
        f.debug_struct("Credentials")
            .field("practicum_token", &redact(&self.practicum_token))
            .field("telegram_token", &redact(&self.telegram_token))
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

/// Runtime configuration for the watcher.
#[derive(Clone, Debug)]
pub struct Config {
    pub credentials: Credentials,
    pub endpoint: String,
    pub telegram_api_url: String,
    pub retry_time: Duration,
    pub request_timeout: Duration,
}

impl Config {
    /// Create configuration from environment variables, loading `.env` first.
    ///
    /// Missing tokens are left empty here; see [`check_tokens`].
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).unwrap_or_default();

        Ok(Self {
            credentials: Credentials {
                practicum_token: var("PRACTICUM_TOKEN"),
                telegram_token: var("TELEGRAM_TOKEN"),
                telegram_chat_id: var("TELEGRAM_CHAT_ID"),
            },
            endpoint: lookup("PRACTICUM_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.into()),
            telegram_api_url: lookup("TELEGRAM_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.into()),
            retry_time: Duration::from_secs(positive_secs(
                "RETRY_TIME",
                lookup("RETRY_TIME"),
                DEFAULT_RETRY_SECS,
            )?),
            request_timeout: Duration::from_secs(positive_secs(
                "REQUEST_TIMEOUT",
                lookup("REQUEST_TIMEOUT"),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
        })
    }
}

/// True only when all three secrets are non-empty.
pub fn check_tokens(config: &Config) -> bool {
    config.credentials.missing().is_empty()
}

fn positive_secs(key: &'static str, raw: Option<String>, default: u64) -> Result<u64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let invalid = |reason: &str| ConfigError::Invalid {
        key,
        value: raw.clone(),
        reason: reason.to_string(),
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(invalid("must be greater than zero")),
        Ok(secs) => Ok(secs),
        Err(e) => Err(invalid(&e.to_string())),
    }
}

/// Configuration for the rotating log file.
#[derive(Clone, Debug)]
pub struct LogConfig {
    pub file: PathBuf,
    pub max_bytes: u64,
    pub backups: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_LOG_FILE),
            max_bytes: DEFAULT_LOG_MAX_BYTES,
            backups: DEFAULT_LOG_BACKUPS,
        }
    }
}

impl LogConfig {
    /// Create configuration from environment variables, loading `.env` first.
    /// Unparseable numbers fall back to the defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();
        Self {
            file: env::var("LOG_FILE").map(PathBuf::from).unwrap_or(defaults.file),
            max_bytes: env::var("LOG_MAX_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_bytes),
            backups: env::var("LOG_BACKUPS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.backups),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[
            ("PRACTICUM_TOKEN", "p"),
            ("TELEGRAM_TOKEN", "t"),
            ("TELEGRAM_CHAT_ID", "42"),
        ])
        .unwrap();

        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.telegram_api_url, DEFAULT_TELEGRAM_API_URL);
        assert_eq!(config.retry_time, Duration::from_secs(600));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(check_tokens(&config));
    }

    #[test]
    fn test_missing_tokens_are_loaded_empty() {
        let config = config_from(&[]).unwrap();
        assert!(!check_tokens(&config));
        assert_eq!(
            config.credentials.missing(),
            vec!["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"]
        );

        let config = config_from(&[("PRACTICUM_TOKEN", "p"), ("TELEGRAM_TOKEN", "")]).unwrap();
        assert!(!check_tokens(&config));
        assert_eq!(
            config.credentials.missing(),
            vec!["TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"]
        );
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("RETRY_TIME", "30"),
            ("REQUEST_TIMEOUT", " 5 "),
            ("PRACTICUM_ENDPOINT", "http://127.0.0.1:9000/api/"),
            ("TELEGRAM_API_URL", "http://127.0.0.1:9001/"),
        ])
        .unwrap();

        assert_eq!(config.retry_time, Duration::from_secs(30));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.endpoint, "http://127.0.0.1:9000/api/");
        assert_eq!(config.telegram_api_url, "http://127.0.0.1:9001");
    }

    #[test]
    fn test_invalid_intervals_are_rejected() {
        let err = config_from(&[("RETRY_TIME", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "RETRY_TIME", .. }));

        let err = config_from(&[("REQUEST_TIMEOUT", "ten")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "REQUEST_TIMEOUT", .. }));

        let err = config_from(&[("RETRY_TIME", "-1")]).unwrap_err();
        assert!(err.to_string().contains("RETRY_TIME"));
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let credentials = Credentials {
            practicum_token: "secret-practicum".to_string(),
            telegram_token: "secret-telegram".to_string(),
            telegram_chat_id: "42".to_string(),
        };
        let rendered = format!("{:?}", credentials);
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
