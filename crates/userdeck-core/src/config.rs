// ── Runtime browser configuration ──
//
// These types describe *where* the directory lives and how the browser
// behaves. The CLI constructs a `BrowserConfig` and hands it in; core
// never touches disk.

use std::time::Duration;

use url::Url;

use crate::error::CoreError;

/// Records per page.
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// Delay between the last keystroke of a search burst and its resolution.
pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_secs(1);

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed development servers).
    DangerAcceptInvalid,
}

/// Configuration for one browsing session.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Provider base URL; the collection is at `{api_url}/usuarios`.
    pub api_url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Provider request timeout.
    pub timeout: Duration,
    /// Records per page. Must be at least 1.
    pub page_size: usize,
    /// Search debounce interval. Zero resolves on the next scheduler turn.
    pub search_delay: Duration,
}

impl BrowserConfig {
    /// Config with default tuning for the given provider URL.
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            page_size: DEFAULT_PAGE_SIZE,
            search_delay: DEFAULT_SEARCH_DELAY,
        }
    }

    /// Parse `api_url` and build a default config.
    pub fn from_url(api_url: &str) -> Result<Self, CoreError> {
        let url = Url::parse(api_url).map_err(|e| CoreError::Config {
            message: format!("invalid API URL '{api_url}': {e}"),
        })?;
        Ok(Self::new(url))
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_search_delay(mut self, delay: Duration) -> Self {
        self.search_delay = delay;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_tls(mut self, tls: TlsVerification) -> Self {
        self.tls = tls;
        self
    }

    /// Reject settings the session cannot honor.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.page_size == 0 {
            return Err(CoreError::Config {
                message: "page size must be at least 1".into(),
            });
        }
        if self.api_url.cannot_be_a_base() {
            return Err(CoreError::Config {
                message: format!("API URL '{}' cannot be used as a base", self.api_url),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_directory_ui() {
        let config = BrowserConfig::from_url("http://localhost:3000").unwrap();
        assert_eq!(config.page_size, 9);
        assert_eq!(config.search_delay, Duration::from_secs(1));
        assert_eq!(config.tls, TlsVerification::SystemDefaults);
        config.validate().unwrap();
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let config = BrowserConfig::from_url("http://localhost:3000")
            .unwrap()
            .with_page_size(0);
        assert!(matches!(config.validate(), Err(CoreError::Config { .. })));
    }

    #[test]
    fn invalid_url_is_a_config_error() {
        assert!(matches!(
            BrowserConfig::from_url("not a url"),
            Err(CoreError::Config { .. })
        ));
    }

    #[test]
    fn non_base_url_is_rejected() {
        let config = BrowserConfig::from_url("mailto:ops@example.com").unwrap();
        assert!(config.validate().is_err());
    }
}
