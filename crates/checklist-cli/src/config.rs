//! Configuration resolution.
//!
//! The API base URL is resolved in order: the `CKL_API_URL` environment
//! variable, then `api_url` in `<config-dir>/checklist/config.toml`,
//! then `http://localhost:8000`. The session token lives next to the
//! config file at `<config-dir>/checklist/token`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub token_path: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        let dir = dirs::config_dir()
            .context("could not determine the user configuration directory")?
            .join("checklist");

        let file = read_config_file(&dir)?;
        let api_url = std::env::var("CKL_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        debug!(%api_url, "resolved configuration");

        Ok(Self {
            api_url,
            token_path: dir.join("token"),
        })
    }
}

fn read_config_file(dir: &std::path::Path) -> Result<FileConfig> {
    let path = dir.join("config.toml");
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("invalid config at {}", path.display()))
}
