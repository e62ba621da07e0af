use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use macroseries::CollectionConfig;

/// Read and parse a TOML collection file.
pub fn load(path: &Path) -> Result<CollectionConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("failed to parse config: {}", path.display()))
}
