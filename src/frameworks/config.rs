// Runtime settings: built-in defaults, then an optional TOML file, then env vars.

use crate::use_cases::MatchmakerSettings;
use serde::Deserialize;
use std::{env, fmt, net::SocketAddr, path::PathBuf, time::Duration};

pub const CONFIG_PATH_VAR: &str = "MATCHMAKER_CONFIG";

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MATCH_SIZE: usize = 1;
const DEFAULT_TICKET_TTL_SECONDS: u64 = 1800;
const DEFAULT_REQUEST_TTL_SECONDS: u64 = 30;
const DEFAULT_SWEEP_INTERVAL_MS: u64 = 500;

/// Fully resolved server configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub match_size: usize,
    pub ticket_ttl_seconds: u64,
    pub request_ttl_seconds: u64,
    pub sweep_interval: Duration,
    pub secret: Vec<u8>,
}

// Keeps the shared secret out of logs and panic messages.
impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("addr", &self.addr)
            .field("match_size", &self.match_size)
            .field("ticket_ttl_seconds", &self.ticket_ttl_seconds)
            .field("request_ttl_seconds", &self.request_ttl_seconds)
            .field("sweep_interval", &self.sweep_interval)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl ServerConfig {
    pub fn matchmaker_settings(&self) -> MatchmakerSettings {
        MatchmakerSettings {
            match_size: self.match_size,
            ticket_ttl_seconds: self.ticket_ttl_seconds,
        }
    }
}

// Errors that abort startup.
#[derive(Debug)]
pub enum ConfigError {
    ReadFile { path: PathBuf, error: std::io::Error },
    ParseFile { path: PathBuf, error: toml::de::Error },
    InvalidValue { key: &'static str, value: String },
    MissingSecret,
    InvalidSecret,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ReadFile { path, error } => {
                write!(f, "failed to read {}: {error}", path.display())
            }
            ConfigError::ParseFile { path, error } => {
                write!(f, "failed to parse {}: {error}", path.display())
            }
            ConfigError::InvalidValue { key, value } => write!(f, "invalid {key}: {value:?}"),
            ConfigError::MissingSecret => write!(f, "MATCHMAKER_SECRET must be set"),
            ConfigError::InvalidSecret => {
                write!(f, "MATCHMAKER_SECRET must be a non-empty hex string")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// Shape of the optional TOML file; every key may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub addr: Option<String>,
    pub match_size: Option<usize>,
    pub ticket_ttl_seconds: Option<u64>,
    pub request_ttl_seconds: Option<u64>,
    pub sweep_interval_ms: Option<u64>,
    pub secret: Option<String>,
}

impl FileConfig {
    pub fn parse(path: PathBuf, contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|error| ConfigError::ParseFile { path, error })
    }
}

// Load from the process environment, reading the TOML file it points at.
pub fn load() -> Result<ServerConfig, ConfigError> {
    let file = match env::var(CONFIG_PATH_VAR) {
        Ok(path) => {
            let path = PathBuf::from(path);
            let contents = std::fs::read_to_string(&path).map_err(|error| {
                ConfigError::ReadFile {
                    path: path.clone(),
                    error,
                }
            })?;
            FileConfig::parse(path, &contents)?
        }
        Err(_) => FileConfig::default(),
    };

    resolve(file, |key| env::var(key).ok())
}

// Merge file values with overrides from `lookup` (env vars in production).
pub fn resolve(
    file: FileConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ServerConfig, ConfigError> {
    let addr = lookup("MATCHMAKER_ADDR")
        .or(file.addr)
        .unwrap_or_else(|| DEFAULT_ADDR.to_string());
    let addr: SocketAddr = addr.parse().map_err(|_| ConfigError::InvalidValue {
        key: "MATCHMAKER_ADDR",
        value: addr.clone(),
    })?;

    let match_size = override_or(&lookup, "MATCHMAKER_MATCH_SIZE", file.match_size)?
        .unwrap_or(DEFAULT_MATCH_SIZE);
    if match_size == 0 {
        return Err(ConfigError::InvalidValue {
            key: "MATCHMAKER_MATCH_SIZE",
            value: "0".to_string(),
        });
    }

    let ticket_ttl_seconds = override_or(
        &lookup,
        "MATCHMAKER_TICKET_TTL_SECONDS",
        file.ticket_ttl_seconds,
    )?
    .unwrap_or(DEFAULT_TICKET_TTL_SECONDS);

    let request_ttl_seconds = override_or(
        &lookup,
        "MATCHMAKER_REQUEST_TTL_SECONDS",
        file.request_ttl_seconds,
    )?
    .unwrap_or(DEFAULT_REQUEST_TTL_SECONDS);

    let sweep_interval_ms = override_or(
        &lookup,
        "MATCHMAKER_SWEEP_INTERVAL_MS",
        file.sweep_interval_ms,
    )?
    .unwrap_or(DEFAULT_SWEEP_INTERVAL_MS);
    if sweep_interval_ms == 0 {
        return Err(ConfigError::InvalidValue {
            key: "MATCHMAKER_SWEEP_INTERVAL_MS",
            value: "0".to_string(),
        });
    }

    let secret_hex = lookup("MATCHMAKER_SECRET")
        .or(file.secret)
        .ok_or(ConfigError::MissingSecret)?;
    let secret = hex::decode(secret_hex.trim()).map_err(|_| ConfigError::InvalidSecret)?;
    if secret.is_empty() {
        return Err(ConfigError::InvalidSecret);
    }

    Ok(ServerConfig {
        addr,
        match_size,
        ticket_ttl_seconds,
        request_ttl_seconds,
        sweep_interval: Duration::from_millis(sweep_interval_ms),
        secret,
    })
}

fn override_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    fallback: Option<T>,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(fallback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn when_only_secret_is_set_then_defaults_apply() {
        let config = resolve(FileConfig::default(), env_of(&[("MATCHMAKER_SECRET", "0a0b")]))
            .expect("expected config to resolve");

        assert_eq!(config.addr, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.match_size, 1);
        assert_eq!(config.ticket_ttl_seconds, 1800);
        assert_eq!(config.request_ttl_seconds, 30);
        assert_eq!(config.sweep_interval, Duration::from_millis(500));
        assert_eq!(config.secret, vec![0x0a, 0x0b]);
    }

    #[test]
    fn when_secret_is_missing_then_returns_missing_secret() {
        let result = resolve(FileConfig::default(), env_of(&[]));

        assert!(matches!(result, Err(ConfigError::MissingSecret)));
    }

    #[test]
    fn when_secret_is_not_hex_or_empty_then_returns_invalid_secret() {
        for secret in ["xyz", ""] {
            let result = resolve(
                FileConfig::default(),
                env_of(&[("MATCHMAKER_SECRET", secret)]),
            );
            assert!(matches!(result, Err(ConfigError::InvalidSecret)));
        }
    }

    #[test]
    fn when_file_and_env_both_set_then_env_wins() {
        let file = FileConfig::parse(
            PathBuf::from("matchmaker.toml"),
            r#"
            addr = "127.0.0.1:4000"
            match_size = 4
            ticket_ttl_seconds = 60
            secret = "ff"
            "#,
        )
        .expect("expected toml to parse");

        let config = resolve(file, env_of(&[("MATCHMAKER_MATCH_SIZE", "2")]))
            .expect("expected config to resolve");

        assert_eq!(config.addr, "127.0.0.1:4000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.match_size, 2);
        assert_eq!(config.ticket_ttl_seconds, 60);
        assert_eq!(config.secret, vec![0xff]);
    }

    #[test]
    fn when_match_size_is_zero_or_garbage_then_returns_invalid_value() {
        for value in ["0", "many"] {
            let result = resolve(
                FileConfig::default(),
                env_of(&[("MATCHMAKER_SECRET", "ff"), ("MATCHMAKER_MATCH_SIZE", value)]),
            );
            assert!(matches!(
                result,
                Err(ConfigError::InvalidValue {
                    key: "MATCHMAKER_MATCH_SIZE",
                    ..
                })
            ));
        }
    }

    #[test]
    fn when_sweep_interval_is_zero_then_returns_invalid_value() {
        let result = resolve(
            FileConfig::default(),
            env_of(&[
                ("MATCHMAKER_SECRET", "ff"),
                ("MATCHMAKER_SWEEP_INTERVAL_MS", "0"),
            ]),
        );

        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn when_file_has_unknown_key_then_parse_fails() {
        let result = FileConfig::parse(PathBuf::from("matchmaker.toml"), "regions = 3");

        assert!(matches!(result, Err(ConfigError::ParseFile { .. })));
    }

    #[test]
    fn when_config_is_debug_printed_then_secret_is_redacted() {
        let config = resolve(FileConfig::default(), env_of(&[("MATCHMAKER_SECRET", "abcdef")]))
            .expect("expected config to resolve");

        let printed = format!("{config:?}");

        assert!(printed.contains("<redacted>"));
        assert!(!printed.contains("171, 205, 239"));
    }
}
