// Runtime configuration, read from the environment with an optional file
// fallback under the user's config directory.

use crate::error::ConfigError;
use crate::validate::is_valid_url;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

pub const API_URL_VAR: &str = "SHORTLINK_API_URL";
pub const TIMEOUT_VAR: &str = "SHORTLINK_TIMEOUT_SECS";
pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const COPY_FEEDBACK: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Service root without a trailing `/`.
    pub base_url: String,
    pub timeout: Duration,
    /// How long the "Copied!" notification stays up.
    pub copy_feedback: Duration,
}

impl Config {
    /// Build the configuration from `SHORTLINK_API_URL`, then
    /// `<config_dir>/shortlink/api_url`, then the built-in default.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A blank variable counts as unset so the file is still consulted.
        let env_url = std::env::var(API_URL_VAR)
            .ok()
            .filter(|url| !url.trim().is_empty());
        let file_url = match env_url {
            Some(_) => None,
            None => read_url_file()?,
        };
        let timeout = std::env::var(TIMEOUT_VAR).ok();
        Self::resolve(env_url, file_url, timeout)
    }

    /// Pure part of [`Config::from_env`]: picks the first non-empty source.
    pub fn resolve(
        env_url: Option<String>,
        file_url: Option<String>,
        timeout: Option<String>,
    ) -> Result<Self, ConfigError> {
        let raw = [env_url, file_url]
            .into_iter()
            .flatten()
            .map(|url| url.trim().to_string())
            .find(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let base_url = raw.trim_end_matches('/').to_string();
        if !is_valid_url(&base_url) {
            return Err(ConfigError::InvalidBaseUrl(raw));
        }

        let timeout = match timeout {
            None => DEFAULT_TIMEOUT,
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(value)),
            },
        };

        debug!(%base_url, ?timeout, "configuration resolved");
        Ok(Config {
            base_url,
            timeout,
            copy_feedback: COPY_FEEDBACK,
        })
    }
}

fn url_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("shortlink").join("api_url"))
}

/// First non-empty line of the URL file. A missing file is not an error.
fn read_url_file() -> Result<Option<String>, ConfigError> {
    let Some(path) = url_file() else {
        return Ok(None);
    };
    match std::fs::read_to_string(&path) {
        Ok(data) => Ok(data
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ConfigError::Read { path, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::resolve(None, None, None).unwrap();
        assert_eq!(
            config,
            Config {
                base_url: DEFAULT_API_URL.to_string(),
                timeout: DEFAULT_TIMEOUT,
                copy_feedback: Duration::from_millis(1000),
            }
        );
    }

    #[test]
    fn environment_wins_over_file() {
        let config = Config::resolve(
            Some("https://short.example/".into()),
            Some("https://file.example".into()),
            None,
        )
        .unwrap();
        assert_eq!(config.base_url, "https://short.example");
    }

    #[test]
    fn blank_environment_falls_through_to_file() {
        let config =
            Config::resolve(Some("  ".into()), Some("http://10.0.0.1:8080".into()), None).unwrap();
        assert_eq!(config.base_url, "http://10.0.0.1:8080");
    }

    #[test]
    fn rejects_invalid_base_url() {
        let err = Config::resolve(Some("localhost:8080".into()), None, None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl(url) if url == "localhost:8080"));
    }

    #[test]
    fn parses_timeout() {
        let config = Config::resolve(None, None, Some("3".into())).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert!(matches!(
            Config::resolve(None, None, Some("0".into())),
            Err(ConfigError::InvalidTimeout(_))
        ));
        assert!(matches!(
            Config::resolve(None, None, Some("soon".into())),
            Err(ConfigError::InvalidTimeout(_))
        ));
    }
}
