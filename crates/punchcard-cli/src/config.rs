//! Configuration loading and management.
//!
//! Threshold values merge in order: built-in defaults, then the config file
//! in the platform config directory, then an explicitly passed file, then
//! `PUNCHCARD_*` environment variables.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use punchcard_core::ReconcileConfig;

/// Loads reconciliation thresholds, optionally from a specific file.
#[expect(
    clippy::result_large_err,
    reason = "figment::Error is large but only returned at startup"
)]
pub fn load_from(config_path: Option<&Path>) -> Result<ReconcileConfig, figment::Error> {
    let mut figment = Figment::from(Serialized::defaults(ReconcileConfig::default()));

    // Load from default config location
    if let Some(config_dir) = dirs_config_path() {
        figment = figment.merge(Toml::file(config_dir.join("config.toml")));
    }

    // Load from specified config file
    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    }

    // Load from environment variables (PUNCHCARD_*)
    figment = figment.merge(Env::prefixed("PUNCHCARD_"));

    figment.extract()
}

/// Returns the platform-specific config directory for punchcard.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("punchcard"))
}
