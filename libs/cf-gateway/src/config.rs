use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use std::path::Path;
use std::time::Duration;

/// Default User-Agent string for Cloud Controller requests
pub const DEFAULT_USER_AGENT: &str = concat!("cf-gateway/", env!("CARGO_PKG_VERSION"));

/// API version segment inserted between the endpoint and resource paths
pub const DEFAULT_API_VERSION: &str = "v2";

/// Prefix of environment variables that override file configuration
pub const ENV_PREFIX: &str = "CF_GATEWAY_";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Configuration error
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to load gateway configuration: {0}")]
    Load(#[source] Box<figment::Error>),
}

/// Gateway configuration.
///
/// Loaded with [`GatewayConfig::load`] from, lowest to highest priority:
/// built-in defaults, an optional YAML file, and `CF_GATEWAY_*` environment
/// variables.
///
/// ```yaml
/// api_endpoint: https://api.example.com
/// access_token: bearer eyJhbGciOi...
/// request_timeout: 45s
/// ```
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Base URL of the Cloud Controller, without the version segment
    pub api_endpoint: String,

    /// Version segment of resource paths (default: `v2`)
    pub api_version: String,

    /// Value of the `Authorization` header, sent as stored (e.g. `bearer <jwt>`)
    #[serde(deserialize_with = "deserialize_secret")]
    pub access_token: Option<SecretString>,

    /// User-Agent header value
    pub user_agent: String,

    /// Per-request timeout (humantime format, e.g. `30s`, `2m`)
    #[serde(deserialize_with = "deserialize_duration")]
    pub request_timeout: Duration,

    /// Maximum accepted response body size in bytes (default: 10MB)
    pub max_body_size: usize,

    /// Accept plain `http://` endpoints. Only meant for local mock servers.
    pub allow_insecure_http: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_endpoint: String::new(),
            api_version: DEFAULT_API_VERSION.to_owned(),
            access_token: None,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            allow_insecure_http: false,
        }
    }
}

impl GatewayConfig {
    /// Configuration pointing at `api_endpoint` with defaults for everything else.
    #[must_use]
    pub fn new(api_endpoint: impl Into<String>) -> Self {
        Self {
            api_endpoint: api_endpoint.into(),
            ..Self::default()
        }
    }

    /// Configuration for tests against a local mock server (plain HTTP, short timeout).
    #[must_use]
    pub fn for_testing(api_endpoint: impl Into<String>) -> Self {
        Self {
            api_endpoint: api_endpoint.into(),
            request_timeout: Duration::from_secs(5),
            allow_insecure_http: true,
            ..Self::default()
        }
    }

    /// Set the access token sent in the `Authorization` header.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(SecretString::from(token.into()));
        self
    }

    /// Load configuration from an optional YAML file and the environment.
    ///
    /// A missing file is treated as empty. Environment variables use the
    /// [`ENV_PREFIX`] prefix, e.g. `CF_GATEWAY_API_ENDPOINT`.
    ///
    /// # Errors
    /// Returns `ConfigError::Load` if the file is malformed or a value has the wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// Versioned API root, e.g. `https://api.example.com/v2`.
    #[must_use]
    pub fn api_root(&self) -> String {
        let endpoint = self.api_endpoint.trim_end_matches('/');
        let version = self.api_version.trim_matches('/');
        if version.is_empty() {
            endpoint.to_owned()
        } else {
            format!("{endpoint}/{version}")
        }
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()).map(SecretString::from))
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.api_version, "v2");
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.max_body_size, 10 * 1024 * 1024);
        assert!(config.access_token.is_none());
        assert!(!config.allow_insecure_http);
    }

    #[test]
    fn test_api_root_joins_endpoint_and_version() {
        let config = GatewayConfig::new("https://api.example.com/");
        assert_eq!(config.api_root(), "https://api.example.com/v2");

        let config = GatewayConfig {
            api_version: String::new(),
            ..GatewayConfig::new("https://api.example.com")
        };
        assert_eq!(config.api_root(), "https://api.example.com");
    }

    #[test]
    fn test_debug_does_not_expose_token() {
        let config = GatewayConfig::new("https://api.example.com")
            .with_access_token("bearer super-secret-value");
        let dbg = format!("{config:?}");
        assert!(!dbg.contains("super-secret-value"));
    }

    #[test]
    fn test_load_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "api_endpoint: https://api.example.com\n\
             access_token: bearer from-file\n\
             request_timeout: 45s\n\
             max_body_size: 2048"
        )
        .unwrap();

        temp_env::with_vars_unset(["CF_GATEWAY_API_ENDPOINT", "CF_GATEWAY_ACCESS_TOKEN"], || {
            let config = GatewayConfig::load(Some(file.path())).unwrap();
            assert_eq!(config.api_endpoint, "https://api.example.com");
            assert_eq!(
                config.access_token.as_ref().unwrap().expose_secret(),
                "bearer from-file"
            );
            assert_eq!(config.request_timeout, Duration::from_secs(45));
            assert_eq!(config.max_body_size, 2048);
            assert_eq!(config.api_version, "v2");
        });
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_endpoint: https://file.example.com").unwrap();

        temp_env::with_vars(
            [
                ("CF_GATEWAY_API_ENDPOINT", Some("https://env.example.com")),
                ("CF_GATEWAY_REQUEST_TIMEOUT", Some("2m")),
            ],
            || {
                let config = GatewayConfig::load(Some(file.path())).unwrap();
                assert_eq!(config.api_endpoint, "https://env.example.com");
                assert_eq!(config.request_timeout, Duration::from_secs(120));
            },
        );
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        temp_env::with_vars_unset(["CF_GATEWAY_API_ENDPOINT"], || {
            let config =
                GatewayConfig::load(Some(Path::new("/nonexistent/cf-gateway.yaml"))).unwrap();
            assert_eq!(config.api_endpoint, "");
            assert_eq!(config.api_version, "v2");
        });
    }

    #[test]
    fn test_invalid_duration_is_rejected() {
        temp_env::with_vars([("CF_GATEWAY_REQUEST_TIMEOUT", Some("soon"))], || {
            let result = GatewayConfig::load(None);
            assert!(matches!(result, Err(ConfigError::Load(_))));
        });
    }
}
