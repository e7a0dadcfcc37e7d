use std::path::{Path, PathBuf};
use std::{env, time::Duration};

use thiserror::Error;

const PRODUCTION_API_URL: &str = "https://eduquiz-platform-backend.onrender.com/api";
const DEVELOPMENT_API_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    api: ApiSettings,
    storage: StorageSettings,
    telemetry: TelemetrySettings,
}

#[derive(Debug, Clone)]
pub(crate) struct ApiSettings {
    pub(crate) base_url: String,
    pub(crate) request_timeout_seconds: u64,
    pub(crate) connect_timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub(crate) struct StorageSettings {
    pub(crate) dir: PathBuf,
}

#[derive(Debug, Clone)]
pub(crate) struct TelemetrySettings {
    pub(crate) log_level: String,
    pub(crate) json: bool,
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
    #[error("invalid api url: {0}")]
    InvalidApiUrl(String),
}

impl Settings {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        let override_url = env_optional("EDUQUIZ_API_URL");
        let client_host = env_or_default("EDUQUIZ_HOST", "localhost");
        let base_url = resolve_api_base_url(override_url, &client_host)?;

        let request_timeout_seconds = parse_u64(
            "EDUQUIZ_REQUEST_TIMEOUT_SECONDS",
            env_or_default("EDUQUIZ_REQUEST_TIMEOUT_SECONDS", "30"),
        )?;
        let connect_timeout_seconds = parse_u64(
            "EDUQUIZ_CONNECT_TIMEOUT_SECONDS",
            env_or_default("EDUQUIZ_CONNECT_TIMEOUT_SECONDS", "10"),
        )?;

        let storage_dir = match env_optional("EDUQUIZ_STORAGE_DIR") {
            Some(value) => PathBuf::from(value),
            None => default_storage_dir(),
        };

        let log_level = env_or_default("EDUQUIZ_LOG_LEVEL", "info");
        let json = env_optional("EDUQUIZ_LOG_JSON").map(|value| parse_bool(&value)).unwrap_or(false);

        let settings = Self {
            api: ApiSettings { base_url, request_timeout_seconds, connect_timeout_seconds },
            storage: StorageSettings { dir: storage_dir },
            telemetry: TelemetrySettings { log_level, json },
        };

        settings.validate()?;
        Ok(settings)
    }

    pub(crate) fn api(&self) -> &ApiSettings {
        &self.api
    }

    pub(crate) fn storage_dir(&self) -> &Path {
        &self.storage.dir
    }

    pub(crate) fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api.request_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "EDUQUIZ_REQUEST_TIMEOUT_SECONDS",
                value: "0".to_string(),
            });
        }
        if self.api.connect_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "EDUQUIZ_CONNECT_TIMEOUT_SECONDS",
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

impl ApiSettings {
    pub(crate) fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub(crate) fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

/// Resolution order: explicit override, else the production backend when the
/// configured client host is not a loopback address, else the local
/// development backend.
pub(crate) fn resolve_api_base_url(
    override_url: Option<String>,
    client_host: &str,
) -> Result<String, ConfigError> {
    if let Some(url) = override_url {
        let trimmed = url.trim_end_matches('/').to_string();
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(ConfigError::InvalidApiUrl(url));
        }
        return Ok(trimmed);
    }

    if is_loopback_host(client_host) {
        Ok(DEVELOPMENT_API_URL.to_string())
    } else {
        Ok(PRODUCTION_API_URL.to_string())
    }
}

fn is_loopback_host(host: &str) -> bool {
    matches!(host, "localhost" | "127.0.0.1" | "::1" | "[::1]")
}

fn default_storage_dir() -> PathBuf {
    match env_optional("HOME") {
        Some(home) => PathBuf::from(home).join(".eduquiz"),
        None => PathBuf::from(".eduquiz"),
    }
}

fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

fn env_or_default(key: &str, default: &str) -> String {
    env_optional(key).unwrap_or_else(|| default.to_string())
}

fn parse_u64(field: &'static str, value: String) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidValue { field, value })
}

fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "true" | "TRUE" | "yes" | "YES" | "on" | "ON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_url_wins_and_is_normalized() {
        let resolved =
            resolve_api_base_url(Some("http://10.0.0.5:5000/api/".to_string()), "localhost")
                .expect("override url");
        assert_eq!(resolved, "http://10.0.0.5:5000/api");
    }

    #[test]
    fn override_url_must_be_http() {
        let result = resolve_api_base_url(Some("ftp://backend/api".to_string()), "localhost");
        assert!(matches!(result, Err(ConfigError::InvalidApiUrl(_))));
    }

    #[test]
    fn loopback_host_uses_development_backend() {
        assert_eq!(resolve_api_base_url(None, "localhost").unwrap(), DEVELOPMENT_API_URL);
        assert_eq!(resolve_api_base_url(None, "127.0.0.1").unwrap(), DEVELOPMENT_API_URL);
    }

    #[test]
    fn non_loopback_host_uses_production_backend() {
        assert_eq!(resolve_api_base_url(None, "eduquiz.example.com").unwrap(), PRODUCTION_API_URL);
    }

    #[test]
    fn parse_bool_variants() {
        assert!(parse_bool("1"));
        assert!(parse_bool("true"));
        assert!(parse_bool("YES"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("0"));
    }
}
