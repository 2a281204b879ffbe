//! Configuration file handling
//!
//! The CLI reads motion settings from `folio.toml` in the working directory,
//! or from the file passed with `--config`. Both are optional: without a file
//! the built-in defaults apply.

use anyhow::{Context, Result};
use folio_motion::MotionConfig;
use std::fs;
use std::path::Path;

/// Looked up in the working directory when `--config` is not given
pub const CONFIG_FILE: &str = "folio.toml";

/// Load the explicit file, else `folio.toml` if present, else defaults
pub fn load(explicit: Option<&Path>) -> Result<MotionConfig> {
    if let Some(path) = explicit {
        return load_file(path);
    }
    let fallback = Path::new(CONFIG_FILE);
    if fallback.exists() {
        return load_file(fallback);
    }
    tracing::debug!("No {} found, using default configuration", CONFIG_FILE);
    Ok(MotionConfig::default())
}

/// Load and parse one configuration file
pub fn load_file(path: &Path) -> Result<MotionConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = MotionConfig::from_toml_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Render a configuration as a complete TOML document
pub fn to_toml(config: &MotionConfig) -> Result<String> {
    config
        .to_toml_string()
        .context("Failed to serialize config")
}
