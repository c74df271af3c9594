//! Configuration loading (`.devintel.toml`)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use crate::agents::DEFAULT_AI_URL;
use crate::github::DEFAULT_API_URL;
use crate::history::FileStorage;

/// Config file name searched for on start-up
pub const CONFIG_FILE: &str = ".devintel.toml";

/// Find a config file by walking up the directory tree, then checking global config.
///
/// Search order:
/// 1. Current directory and parent directories (walking up to root)
/// 2. Global config at `<config_dir>/devintel/`
fn find_config_file(filename: &str) -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let candidate = current.join(filename);
        if candidate.exists() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => break,
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let global_path = config_dir.join("devintel").join(filename);
        if global_path.exists() {
            return Some(global_path);
        }
    }

    None
}

/// Top-level configuration (from .devintel.toml)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub github: GitHubSection,
    #[serde(default)]
    pub ai: AiSection,
    #[serde(default)]
    pub history: HistorySection,
}

/// HTTP server section
#[derive(Debug, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_bind")]
    pub bind: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Serve the frontend from this directory instead of the embedded copy
    pub static_dir: Option<PathBuf>,
}

/// GitHub section
#[derive(Debug, Deserialize)]
pub struct GitHubSection {
    #[serde(default = "default_github_api")]
    pub api_url: String,
    /// Token seeded into the token store at start-up
    pub token: Option<String>,
}

/// AI analysis service section
#[derive(Debug, Deserialize)]
pub struct AiSection {
    #[serde(default = "default_ai_url")]
    pub url: String,
}

/// History store section
#[derive(Debug, Default, Deserialize)]
pub struct HistorySection {
    /// JSON file holding history and profile
    pub path: Option<PathBuf>,
}

fn default_bind() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    3000
}

fn default_github_api() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_ai_url() -> String {
    DEFAULT_AI_URL.to_string()
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            static_dir: None,
        }
    }
}

impl Default for GitHubSection {
    fn default() -> Self {
        Self {
            api_url: default_github_api(),
            token: None,
        }
    }
}

impl Default for AiSection {
    fn default() -> Self {
        Self {
            url: default_ai_url(),
        }
    }
}

impl FileConfig {
    /// Load config from .devintel.toml
    ///
    /// Search order:
    /// 1. Walk up directory tree from cwd looking for .devintel.toml
    /// 2. Check `<config_dir>/devintel/.devintel.toml` (global fallback)
    /// 3. Fall back to defaults
    pub fn load() -> Result<Self> {
        if let Some(config_path) = find_config_file(CONFIG_FILE) {
            tracing::debug!("Loading config from: {}", config_path.display());
            return Self::load_from_path(&config_path);
        }

        tracing::debug!("No {} found, using defaults", CONFIG_FILE);
        Ok(Self::default())
    }

    /// Load from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: FileConfig = toml::from_str(&content)
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }
}

/// Values given on the command line or through the environment
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub bind: Option<IpAddr>,
    pub port: Option<u16>,
    pub static_dir: Option<PathBuf>,
    pub github_api: Option<String>,
    pub github_token: Option<String>,
    pub ai_url: Option<String>,
    pub storage: Option<PathBuf>,
}

/// Effective settings after applying overrides to the file config
#[derive(Debug, Clone)]
pub struct Settings {
    pub addr: SocketAddr,
    pub static_dir: Option<PathBuf>,
    pub github_api: String,
    pub github_token: Option<String>,
    pub ai_url: String,
    pub storage_path: PathBuf,
}

impl Settings {
    /// Merge `overrides` over `file`; overrides win
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Result<Self> {
        let storage_path = overrides
            .storage
            .or(file.history.path)
            .or_else(FileStorage::default_path)
            .context("No data directory available; pass --storage")?;

        Ok(Self {
            addr: SocketAddr::new(
                overrides.bind.unwrap_or(file.server.bind),
                overrides.port.unwrap_or(file.server.port),
            ),
            static_dir: overrides.static_dir.or(file.server.static_dir),
            github_api: overrides.github_api.unwrap_or(file.github.api_url),
            github_token: overrides
                .github_token
                .or(file.github.token)
                .filter(|t| !t.trim().is_empty()),
            ai_url: overrides.ai_url.unwrap_or(file.ai.url),
            storage_path,
        })
    }

    /// Load the file config and apply `overrides`
    pub fn load(overrides: Overrides) -> Result<Self> {
        Self::resolve(FileConfig::load()?, overrides)
    }
}
