//! # Configuration Utilities
//!
//! Shared configuration structures and parsing utilities used by both the
//! command-line client and the web proxy.
//!
//! The API key is a shared secret. It can be written into the TOML file, but
//! deployments should supply it through `GAME_ID_CHECKER_API_KEY` so it never
//! lands in a checked-in file.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;

/// Environment variable that overrides [`ServiceConfig::api_key`].
pub const API_KEY_ENV: &str = "GAME_ID_CHECKER_API_KEY";
/// Environment variable that overrides [`ServiceConfig::endpoint`].
pub const ENDPOINT_ENV: &str = "GAME_ID_CHECKER_ENDPOINT";

pub const DEFAULT_ENDPOINT: &str = "https://api.velixs.com/idgames-checker";
pub const DEFAULT_API_KEY_HEADER: &str = "X-VelixsAPI-Key";

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Arguments
/// - `path`: Path to the TOML configuration file
///
/// # Returns
/// - `Ok(T)`: Successfully loaded and parsed configuration
/// - `Err`: File I/O or parsing error
///
/// # Example
/// ```ignore
/// let config: ServerConfig = load_config("config/checker.toml")?;
/// ```
pub fn load_config<T>(path: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Connection settings for the remote verification service.
///
/// # Example TOML
///
/// ```toml
/// [service]
/// endpoint = "https://api.velixs.com/idgames-checker"
/// api_key_header = "X-VelixsAPI-Key"
/// timeout_secs = 10
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Full URL the lookup is POSTed to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Name of the header carrying the API key
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,
    /// Shared secret; usually left out of the file and set through the environment
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Whole-request timeout. When unset the transport's own default applies.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_api_key_header() -> String {
    DEFAULT_API_KEY_HEADER.to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key_header: default_api_key_header(),
            api_key: None,
            timeout_secs: None,
        }
    }
}

impl ServiceConfig {
    /// Overlays values from the process environment.
    pub fn with_env(self) -> Self {
        self.with_env_from(|name| std::env::var(name).ok())
    }

    /// Overlays values from `lookup`, which maps a variable name to its value.
    /// Empty values are ignored.
    pub fn with_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        if let Some(key) = var(API_KEY_ENV) {
            self.api_key = Some(key);
        }
        if let Some(endpoint) = var(ENDPOINT_ENV) {
            self.endpoint = endpoint;
        }
        self
    }
}

// Keeps the key out of logs and panic messages.
impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key_header", &self.api_key_header)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[derive(Debug, Deserialize)]
    struct Wrapper {
        service: ServiceConfig,
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let wrapper: Wrapper = toml::from_str("[service]\n").unwrap();
        assert_eq!(wrapper.service.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(wrapper.service.api_key_header, DEFAULT_API_KEY_HEADER);
        assert!(wrapper.service.api_key.is_none());
        assert!(wrapper.service.timeout_secs.is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[service]
endpoint = "http://127.0.0.1:9000/check"
api_key = "from-file"
timeout_secs = 5
"#
        )
        .unwrap();

        let wrapper: Wrapper = load_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(wrapper.service.endpoint, "http://127.0.0.1:9000/check");
        assert_eq!(wrapper.service.api_key.as_deref(), Some("from-file"));
        assert_eq!(wrapper.service.timeout_secs, Some(5));
    }

    #[test]
    fn test_load_config_missing_file() {
        assert!(load_config::<Wrapper>("/nonexistent/checker.toml").is_err());
    }

    #[test]
    fn test_env_overrides_file() {
        let config = ServiceConfig {
            api_key: Some("from-file".to_string()),
            ..ServiceConfig::default()
        }
        .with_env_from(|name| match name {
            API_KEY_ENV => Some("from-env".to_string()),
            ENDPOINT_ENV => Some("http://localhost:1234/".to_string()),
            _ => None,
        });

        assert_eq!(config.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.endpoint, "http://localhost:1234/");
    }

    #[test]
    fn test_empty_env_is_ignored() {
        let config = ServiceConfig {
            api_key: Some("from-file".to_string()),
            ..ServiceConfig::default()
        }
        .with_env_from(|_| Some(String::new()));

        assert_eq!(config.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_serialize_omits_key() {
        let config = ServiceConfig {
            api_key: Some("super-secret".to_string()),
            ..ServiceConfig::default()
        };
        let rendered = toml::to_string(&config).unwrap();
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("api_key ="));
        assert!(rendered.contains(DEFAULT_ENDPOINT));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ServiceConfig {
            api_key: Some("super-secret".to_string()),
            ..ServiceConfig::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
