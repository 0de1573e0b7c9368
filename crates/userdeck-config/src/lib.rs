//! Shared configuration for userdeck.
//!
//! TOML profiles naming a user directory endpoint plus browsing knobs,
//! and translation to `userdeck_core::BrowserConfig`. The CLI layers its
//! `GlobalOpts` overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use userdeck_core::{BrowserConfig, DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_DELAY, TlsVerification};

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "USERDECK_CONFIG";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found in config")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named directory profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Name of the profile to use: `requested`, else `default_profile`,
    /// else `"default"`.
    pub fn active_profile_name<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .or(self.default_profile.as_deref())
            .unwrap_or("default")
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Search debounce interval in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
            page_size: default_page_size(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}
fn default_debounce_ms() -> u64 {
    u64::try_from(DEFAULT_SEARCH_DELAY.as_millis()).unwrap_or(1000)
}

/// A named user directory profile.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Profile {
    /// Base URL of the directory API (e.g., "http://localhost:3000").
    /// The collection lives at `<api_url>/usuarios`.
    pub api_url: String,

    /// Records per page.
    pub page_size: Option<usize>,

    /// Search debounce interval in milliseconds.
    pub debounce_ms: Option<u64>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,
}

impl Profile {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            page_size: None,
            debounce_ms: None,
            timeout: None,
            insecure: None,
            ca_cert: None,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `$USERDECK_CONFIG`, else XDG / platform
/// conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("dev", "userdeck", "userdeck").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("userdeck");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file. A missing file yields the defaults.
///
/// Environment keys use `__` for nesting, e.g.
/// `USERDECK_DEFAULTS__PAGE_SIZE=12`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("USERDECK_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist or is invalid.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

/// Build a `BrowserConfig` from a profile and the global defaults.
pub fn profile_to_browser_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<BrowserConfig, ConfigError> {
    let api_url: url::Url = profile
        .api_url
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("invalid URL: {}", profile.api_url),
        })?;

    let page_size = profile.page_size.unwrap_or(defaults.page_size);
    if page_size == 0 {
        return Err(ConfigError::Validation {
            field: "page_size".into(),
            reason: "must be at least 1".into(),
        });
    }

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let config = BrowserConfig::new(api_url)
        .with_page_size(page_size)
        .with_search_delay(Duration::from_millis(
            profile.debounce_ms.unwrap_or(defaults.debounce_ms),
        ))
        .with_timeout(Duration::from_secs(
            profile.timeout.unwrap_or(defaults.timeout),
        ))
        .with_tls(tls);

    config.validate().map_err(|e| ConfigError::Validation {
        field: "api_url".into(),
        reason: e.to_string(),
    })?;
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.page_size, 9);
        assert_eq!(cfg.defaults.debounce_ms, 1000);
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn save_then_load_preserves_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        let mut staging = Profile::new("https://staging.example.com/api/");
        staging.page_size = Some(12);
        staging.ca_cert = Some(PathBuf::from("/etc/ssl/staging.pem"));
        cfg.profiles.insert("staging".into(), staging);

        save_config_to(&cfg, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.profiles, cfg.profiles);
    }

    #[test]
    fn toml_partial_defaults_are_filled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "local"

[defaults]
output = "json"

[profiles.local]
api_url = "http://localhost:3000"
"#,
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.active_profile_name(None), "local");
        assert_eq!(cfg.active_profile_name(Some("other")), "other");
        assert_eq!(cfg.defaults.output, "json");
        assert_eq!(cfg.defaults.timeout, 30);
        assert!(cfg.profile("local").is_ok());
        assert!(matches!(
            cfg.profile("other"),
            Err(ConfigError::UnknownProfile { .. })
        ));
    }

    #[test]
    fn profile_overrides_defaults() {
        let mut profile = Profile::new("http://localhost:3000");
        profile.page_size = Some(5);
        profile.debounce_ms = Some(0);
        profile.insecure = Some(true);

        let config = profile_to_browser_config(&profile, &Defaults::default()).unwrap();
        assert_eq!(config.page_size, 5);
        assert_eq!(config.search_delay, Duration::ZERO);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn custom_ca_when_not_insecure() {
        let mut profile = Profile::new("https://directory.example.com");
        profile.ca_cert = Some(PathBuf::from("/tmp/ca.pem"));

        let config = profile_to_browser_config(&profile, &Defaults::default()).unwrap();
        assert_eq!(
            config.tls,
            TlsVerification::CustomCa(PathBuf::from("/tmp/ca.pem"))
        );
    }

    #[test]
    fn rejects_bad_url_and_zero_page_size() {
        let bad_url = Profile::new("not a url");
        assert!(matches!(
            profile_to_browser_config(&bad_url, &Defaults::default()),
            Err(ConfigError::Validation { ref field, .. }) if field == "api_url"
        ));

        let mut zero = Profile::new("http://localhost:3000");
        zero.page_size = Some(0);
        assert!(matches!(
            profile_to_browser_config(&zero, &Defaults::default()),
            Err(ConfigError::Validation { ref field, .. }) if field == "page_size"
        ));
    }
}
