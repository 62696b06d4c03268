//! Loading configuration snapshots from disk

use anyhow::{Context, Result, bail};
use declarative::Config;
use std::path::Path;

/// Supported config file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    pub fn parse(self, content: &str) -> Result<Config> {
        match self {
            Self::Json => serde_json::from_str(content).context("Invalid JSON format"),
            Self::Toml => toml::from_str(content).context("Invalid TOML format"),
        }
    }
}

/// Read, parse and validate a config file
pub fn load(path: &Path) -> Result<Config> {
    let Some(format) = ConfigFormat::from_path(path) else {
        bail!(
            "Unsupported config file '{}': expected a .json or .toml extension",
            path.display()
        );
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read config file: {}", path.display()))?;
    let config = format
        .parse(&content)
        .with_context(|| format!("Could not parse {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config {}", path.display()))?;

    log::debug!(
        "Loaded {} ({} resources, revision {:?})",
        path.display(),
        config.resource_count(),
        config.revision
    );
    Ok(config)
}
