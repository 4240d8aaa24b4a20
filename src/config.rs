//! Configuration for dex copying
//!
//! Read from the `[dex]` table of a TOML file. Every key is optional and
//! falls back to the layout of the web app's `public/dex/` folder.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::DexError;

/// Config file looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "dex-subset.toml";

/// Dex copying configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DexConfig {
    /// Folder holding the source dex and the generated regional dexes
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// File name of the complete dex inside `dir`
    #[serde(default = "default_source")]
    pub source: String,

    /// Sprite suffixes whose forms are dropped without asking
    #[serde(default = "default_skip_suffixes")]
    pub skip_suffixes: BTreeSet<String>,

    /// Indentation unit for the written JSON
    #[serde(default = "default_indent")]
    pub indent: String,

    /// Write non-ASCII characters as `\uXXXX` escapes, like the dexes already in the repo
    #[serde(default = "default_ensure_ascii")]
    pub ensure_ascii: bool,
}

fn default_dir() -> PathBuf {
    PathBuf::from("../public/dex/")
}

fn default_source() -> String {
    "all.json".to_string()
}

fn default_skip_suffixes() -> BTreeSet<String> {
    ["mega", "gigantamax", "alola", "hisui", "galar"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_indent() -> String {
    "\t".to_string()
}

fn default_ensure_ascii() -> bool {
    true
}

impl Default for DexConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            source: default_source(),
            skip_suffixes: default_skip_suffixes(),
            indent: default_indent(),
            ensure_ascii: default_ensure_ascii(),
        }
    }
}

impl DexConfig {
    /// Path of the complete source dex
    pub fn source_path(&self) -> PathBuf {
        self.dir.join(&self.source)
    }

    /// Path of the regional dex named `region`
    pub fn destination_path(&self, region: &str) -> PathBuf {
        self.dir.join(format!("{}.json", region))
    }
}

/// Load config from an explicit file, or from [`DEFAULT_CONFIG_FILE`] if present.
///
/// An explicit path must exist; the default one is optional.
pub fn load_config(explicit: Option<&Path>) -> Result<DexConfig> {
    let config_path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(DexError::NotFound { path: path.to_path_buf() }.into());
            }
            path.to_path_buf()
        }
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !path.exists() {
                log::debug!("No {} found, using default dex config", DEFAULT_CONFIG_FILE);
                return Ok(DexConfig::default());
            }
            path
        }
    };

    parse_config_file(&config_path)
}

fn parse_config_file(config_path: &Path) -> Result<DexConfig> {
    let config_str = std::fs::read_to_string(config_path)
        .map_err(|e| DexError::from_io(config_path, e))?;

    let toml_value: toml::Value = toml::from_str(&config_str)
        .with_context(|| format!("Failed to parse {}", config_path.display()))?;

    // Extract [dex] section
    if let Some(dex_table) = toml_value.get("dex") {
        let config: DexConfig = dex_table
            .clone()
            .try_into()
            .context("Failed to parse [dex] section")?;
        log::debug!("Loaded dex config from {}", config_path.display());
        Ok(config)
    } else {
        log::debug!("No [dex] section in {}, using defaults", config_path.display());
        Ok(DexConfig::default())
    }
}
