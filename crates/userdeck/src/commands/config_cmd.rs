//! Config subcommand handlers.

use dialoguer::{Confirm, Input};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn save_config(cfg: &Config) -> Result<(), CliError> {
    let path = config::save_config(cfg)?;
    eprintln!("   ✓ Saved {}", path.display());
    Ok(())
}

fn profile_lines(cfg: &Config) -> Vec<String> {
    let default = cfg.default_profile.as_deref().unwrap_or("default");
    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    names
        .into_iter()
        .map(|name| {
            let marker = if name == default { "*" } else { " " };
            format!("{marker} {name}  {}", cfg.profiles[name].api_url)
        })
        .collect()
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("userdeck configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let api_url: String = Input::new()
                .with_prompt("Directory API URL")
                .default("http://localhost:3000".into())
                .validate_with(|input: &String| -> Result<(), String> {
                    url::Url::parse(input)
                        .map(|_| ())
                        .map_err(|e| format!("invalid URL: {e}"))
                })
                .interact_text()
                .map_err(prompt_err)?;

            let page_size: usize = Input::new()
                .with_prompt("Users per page")
                .default(userdeck_core::DEFAULT_PAGE_SIZE)
                .validate_with(|n: &usize| -> Result<(), &str> {
                    if *n == 0 { Err("must be at least 1") } else { Ok(()) }
                })
                .interact_text()
                .map_err(prompt_err)?;

            let mut cfg = config::load_config_or_default();
            let make_default = cfg.profiles.is_empty()
                || Confirm::new()
                    .with_prompt(format!("Use '{profile_name}' as the default profile?"))
                    .default(true)
                    .interact()
                    .map_err(prompt_err)?;

            let mut profile = Profile::new(api_url);
            if page_size != cfg.defaults.page_size {
                profile.page_size = Some(page_size);
            }
            // Fail before writing anything the session couldn't use.
            config::profile_to_browser_config(&profile, &cfg.defaults)?;

            cfg.profiles.insert(profile_name.clone(), profile);
            if make_default {
                cfg.default_profile = Some(profile_name);
            }
            save_config(&cfg)
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let out = output::render_single(
                &global.output,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_default(),
                |c| profile_lines(c).join("\n"),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let lines = profile_lines(&cfg);
            if lines.is_empty() {
                eprintln!("No profiles configured. Create one with: userdeck config init");
            } else {
                output::print_output(&lines.join("\n"), global.quiet);
            }
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
                available.sort();
                return Err(CliError::ProfileNotFound {
                    name,
                    available: available.join(", "),
                });
            }
            cfg.default_profile = Some(name);
            save_config(&cfg)
        }
    }
}
