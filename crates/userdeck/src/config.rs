//! CLI configuration -- thin wrapper around `userdeck_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--api-url, --page-size, etc.).

use userdeck_core::BrowserConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use userdeck_config::{
    Config, Profile, config_path, load_config_or_default, profile_to_browser_config, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config
        .active_profile_name(global.profile.as_deref())
        .to_owned()
}

/// Merge the active profile with flag overrides and translate it into a
/// `BrowserConfig`.
///
/// Without a matching profile, `--api-url` alone is enough. Asking for a
/// profile by name that doesn't exist is an error.
pub fn resolve_browser_config(
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<BrowserConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    let mut profile = match (cfg.profiles.get(&profile_name), &global.api_url) {
        (Some(profile), _) => profile.clone(),
        (None, Some(url)) if global.profile.is_none() => Profile::new(url.clone()),
        (None, _) if global.profile.is_some() => {
            let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
            available.sort();
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            });
        }
        (None, _) => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };

    // Flags (and their env bindings) beat profile values.
    if let Some(ref url) = global.api_url {
        profile.api_url.clone_from(url);
    }
    if let Some(page_size) = global.page_size {
        profile.page_size = Some(page_size);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }

    Ok(profile_to_browser_config(&profile, &cfg.defaults)?)
}
