use crate::app::cli::Cli;
use crate::app::models::Options;
use crate::app::patterns::{PatternSet, DEFAULT_IGNORES};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_CONFIG: &str = "mwts/eslint.config.js";

/// Contents of `~/.config/mwts/config.toml`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub base_config: Option<String>,
    pub ignores: Option<Vec<String>>,
}

pub fn default_settings_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("mwts").join("config.toml"))
}

/// A missing file yields default settings unless `required` is set.
pub fn load_settings_file(path: &Path, required: bool) -> Result<Settings> {
    if !required && !path.exists() {
        return Ok(Settings::default());
    }

    let content =
        fs::read_to_string(path).context(format!("Failed to read settings at {:?}", path))?;
    let settings: Settings = toml::from_str(&content)
        .context(format!("Failed to parse settings at {:?}", path))?;
    Ok(settings)
}

/// Built-in baseline first, then settings-provided patterns, duplicates dropped.
fn baseline_ignores(extra: Option<Vec<String>>) -> Vec<String> {
    let mut set: PatternSet = DEFAULT_IGNORES.iter().copied().collect();
    set.extend(extra.unwrap_or_default());
    set.into_vec()
}

pub fn resolve_options(cli: &Cli) -> Result<Options> {
    let settings = match (&cli.config, default_settings_path()) {
        (Some(path), _) => load_settings_file(path, true)?,
        (None, Some(path)) => load_settings_file(&path, false)?,
        (None, None) => {
            log::debug!("No home directory; using built-in settings");
            Settings::default()
        }
    };
    Ok(options_from(cli, settings))
}

fn options_from(cli: &Cli, settings: Settings) -> Options {
    Options {
        target_root: cli.target_root.clone(),
        dry_run: cli.dry_run,
        base_config: settings
            .base_config
            .unwrap_or_else(|| DEFAULT_BASE_CONFIG.to_string()),
        baseline_ignores: baseline_ignores(settings.ignores),
    }
}
