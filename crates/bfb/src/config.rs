//! CLI configuration: thin wrapper around `bfb_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--base-url, --timeout, --refresh).

use std::time::Duration;

use bfb_core::PortalConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use bfb_config::{Config, Profile, config_path, load_config, save_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Build the `PortalConfig` for this invocation.
///
/// Precedence: flag / `BFB_*` variable, then profile, then defaults.
pub fn resolve_portal_config(global: &GlobalOpts) -> Result<PortalConfig, CliError> {
    let cfg = load_config()?;
    let profile_name = active_profile_name(global, &cfg);

    let profile = cfg.profile(&profile_name).map_err(|_| CliError::ProfileNotFound {
        name: profile_name.clone(),
        available: available_profiles(&cfg),
    })?;

    let mut portal = bfb_config::profile_to_portal_config(&profile, &cfg.defaults)?;

    if let Some(ref url) = global.base_url {
        bfb_config::validate_base_url(url)?;
        portal.base_url.clone_from(url);
    }
    if let Some(secs) = global.timeout {
        portal.timeout = Some(Duration::from_secs(secs));
    }
    if let Some(secs) = global.refresh {
        portal.refresh_interval = Duration::from_secs(secs);
    }

    tracing::debug!(profile = %profile_name, base_url = %portal.base_url, "resolved portal config");
    Ok(portal)
}

pub fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        "(none)".into()
    } else {
        cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}
