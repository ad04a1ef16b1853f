use std::str::FromStr;
use std::time::Duration;

use citygems_cms::config::{CmsConfig, DEFAULT_BASE_URL};
use citygems_cms::retry::RetryConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `60`).
    pub request_timeout_secs: u64,
    /// Upstream CMS connection settings.
    pub cms: CmsConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                            |
    /// |------------------------|------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                          |
    /// | `PORT`                 | `3000`                             |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`            |
    /// | `REQUEST_TIMEOUT_SECS` | `60`                               |
    /// | `CMS_API_URL`          | `https://content.section-l.co/api` |
    /// | `CMS_API_TOKEN`        | unset                              |
    /// | `CMS_PAGE_SIZE`        | `25`                               |
    /// | `CMS_TIMEOUT_SECS`     | `50`                               |
    /// | `CMS_RETRY_ATTEMPTS`   | `3`                                |
    /// | `CMS_RETRY_DELAY_MS`   | `1000`                             |
    ///
    /// Panics on values that do not parse, so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = env_or("HOST", "0.0.0.0");
        let port: u16 = parse_env("PORT", "3000");

        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "http://localhost:3000")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = parse_env("REQUEST_TIMEOUT_SECS", "60");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            cms: cms_config_from_env(),
        }
    }
}

fn cms_config_from_env() -> CmsConfig {
    let mut cms = CmsConfig::new(env_or("CMS_API_URL", DEFAULT_BASE_URL));

    // An empty token counts as unset.
    if let Some(token) = std::env::var("CMS_API_TOKEN")
        .ok()
        .filter(|t| !t.trim().is_empty())
    {
        cms = cms.with_token(token.trim());
    }

    cms.page_size = parse_env("CMS_PAGE_SIZE", "25");
    cms.timeout = Duration::from_secs(parse_env("CMS_TIMEOUT_SECS", "50"));
    cms.with_retry(RetryConfig {
        max_retries: parse_env("CMS_RETRY_ATTEMPTS", "3"),
        base_delay: Duration::from_millis(parse_env("CMS_RETRY_DELAY_MS", "1000")),
        ..RetryConfig::default()
    })
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

fn parse_env<T>(key: &str, default: &str) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_or(key, default)
        .parse()
        .unwrap_or_else(|e| panic!("{key} must be a valid {}: {e}", std::any::type_name::<T>()))
}
