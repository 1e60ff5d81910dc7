//! Config subcommand handlers.

use dialoguer::Input;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Prompt(e.to_string())
}

fn format_config(cfg: &Config) -> String {
    toml::to_string_pretty(cfg).unwrap_or_else(|e| format!("# could not format config: {e}"))
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            let mut cfg = config::load_config()?;
            eprintln!("BFB portal client configuration");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default(config::active_profile_name(global, &cfg))
                .interact_text()
                .map_err(prompt_err)?;

            let current = cfg.profiles.get(&profile_name).cloned().unwrap_or_default();

            let base_url: String = Input::new()
                .with_prompt("Backend base URL")
                .default(current.base_url)
                .validate_with(|raw: &String| {
                    bfb_config::validate_base_url(raw).map_err(|e| e.to_string())
                })
                .interact_text()
                .map_err(prompt_err)?;

            let refresh: u64 = Input::new()
                .with_prompt("Live refresh period in seconds (0 disables)")
                .default(current.refresh_secs.unwrap_or(cfg.defaults.refresh_secs))
                .interact_text()
                .map_err(prompt_err)?;

            cfg.profiles.insert(
                profile_name.clone(),
                Profile {
                    base_url,
                    refresh_secs: Some(refresh),
                    timeout_secs: current.timeout_secs,
                },
            );
            cfg.default_profile = Some(profile_name.clone());
            config::save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: bfb health");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let out = output::render_single(global.output, &cfg, format_config, |c| {
                c.active_profile_name(global.profile.as_deref())
            });
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config()?;

            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    name,
                    available: config::available_profiles(&cfg),
                });
            }

            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Default profile set to '{name}'");
            }
            Ok(())
        }
    }
}
