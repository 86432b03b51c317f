//! Configuration loading from TOML files.
//!
//! Lookup order:
//! 1. `$COVAR_CONFIG` environment variable
//! 2. `<platform config dir>/covar/config.toml`
//! 3. Built-in defaults (everything is optional)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use covar_gemini::{
    GeminiSettings, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS,
};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub display: DisplayConfig,
    pub plot: PlotConfig,
}

/// Analysis service settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub model: String,
    pub temperature: f32,
    pub endpoint: String,
    pub timeout_secs: u64,
    /// Falls back to `GEMINI_API_KEY`, then `API_KEY`.
    pub api_key: Option<String>,
}

/// Number formatting for printed statistics.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Maximum fractional digits; trailing zeros are trimmed.
    pub precision: usize,
}

/// ASCII scatter plot size, in characters.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub width: usize,
    pub height: usize,
}

// --- Defaults ---

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            temperature: DEFAULT_TEMPERATURE,
            endpoint: DEFAULT_ENDPOINT.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            api_key: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { precision: 4 }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 20,
        }
    }
}

impl GeminiConfig {
    pub fn settings(&self) -> GeminiSettings {
        GeminiSettings {
            endpoint: self.endpoint.clone(),
            model: self.model.clone(),
            temperature: self.temperature,
            timeout: Duration::from_secs(self.timeout_secs),
            api_key: self.api_key.clone(),
        }
    }
}

/// Load config from disk. Returns defaults if no config file exists.
pub fn load_config() -> Result<Config> {
    match config_path() {
        Some(p) if p.exists() => load_config_from(&p),
        _ => Ok(Config::default()),
    }
}

/// Parse the config file at `path`.
pub fn load_config_from(path: &Path) -> Result<Config> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

/// Resolve the config file path.
fn config_path() -> Option<PathBuf> {
    if let Ok(p) = std::env::var("COVAR_CONFIG") {
        return Some(PathBuf::from(p));
    }

    directories::ProjectDirs::from("dev", "covar", "covar")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Show the active config path (for `covar config`).
pub fn show_config_path() -> String {
    match config_path() {
        Some(p) if p.exists() => format!("{} (loaded)", p.display()),
        Some(p) => format!("{} (not found, using defaults)", p.display()),
        None => "no config path resolved (using defaults)".into(),
    }
}
