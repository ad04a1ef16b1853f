use std::time::Duration;

use crate::retry::RetryConfig;

/// Default CMS base URL.
pub const DEFAULT_BASE_URL: &str = "https://content.section-l.co/api";

/// Page size used for paginated collection fetches.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Per-request timeout for upstream calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(50);

/// Connection settings for the CMS.
#[derive(Debug, Clone)]
pub struct CmsConfig {
    /// Base URL that resource paths are appended to, e.g. `https://host/api`.
    pub base_url: String,
    /// Bearer token; requests go unauthenticated when `None`.
    pub api_token: Option<String>,
    /// Page size for paginated fetches.
    pub page_size: u32,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retry policy for transient failures.
    pub retry: RetryConfig,
}

impl CmsConfig {
    /// Config with defaults for everything but the base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: None,
            page_size: DEFAULT_PAGE_SIZE,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryConfig::default(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Full URL for a resource path such as `/properties`.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
