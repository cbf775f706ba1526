//! Configuration: `~/.tokenforge/config.toml` plus environment overrides.
//!
//! Environment variables always win over the file, so deployments can inject
//! the API key without persisting it to disk.

use crate::error::ConfigError;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_MODEL: &str = "gpt-4o";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// OpenAI API key. Usually supplied via `OPENAI_API_KEY` instead of the
    /// file.
    pub api_key: Option<String>,
    pub model: String,
    /// Override for the OpenAI-compatible endpoint base URL.
    pub base_url: Option<String>,
    pub gateway: GatewayConfig,

    #[serde(skip)]
    pub config_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
            gateway: GatewayConfig::default(),
            config_path: PathBuf::new(),
        }
    }
}

impl Config {
    /// Load the config from `~/.tokenforge/config.toml`, writing a default
    /// file on first run, then apply environment overrides.
    pub fn load_or_init() -> Result<Self, ConfigError> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .ok_or_else(|| ConfigError::Load("could not find home directory".to_string()))?;
        let dir = home.join(".tokenforge");
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let mut config = Self::load_from(&dir.join("config.toml"))?;
        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Load from an explicit path without touching the environment. The file
    /// is created with defaults if absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&contents)
                .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;
            config.config_path = path.to_path_buf();
            Ok(config)
        } else {
            let config = Self {
                config_path: path.to_path_buf(),
                ..Self::default()
            };
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Load(format!("failed to serialize config: {e}")))?;
        fs::write(&self.config_path, toml_str)?;
        Ok(())
    }

    /// Apply environment overrides through a lookup function. Prefixed names
    /// win over the generic ones (`TOKENFORGE_GATEWAY_PORT` over `PORT`).
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let non_empty = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(key) = non_empty("TOKENFORGE_API_KEY").or_else(|| non_empty("OPENAI_API_KEY")) {
            self.api_key = Some(key);
        }
        if let Some(model) = non_empty("TOKENFORGE_MODEL") {
            self.model = model;
        }
        if let Some(base_url) = non_empty("TOKENFORGE_BASE_URL") {
            self.base_url = Some(base_url);
        }
        if let Some(host) = non_empty("TOKENFORGE_GATEWAY_HOST").or_else(|| non_empty("HOST")) {
            self.gateway.host = host;
        }
        if let Some(port) = non_empty("TOKENFORGE_GATEWAY_PORT").or_else(|| non_empty("PORT")) {
            self.gateway.port = port
                .parse()
                .map_err(|_| ConfigError::Validation(format!("invalid port: {port}")))?;
        }
        Ok(())
    }
}
