use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::architecture::StaticFlags;
use crate::error::{BridgeError, BridgeResult};

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub architecture: ArchitectureConfig,
    pub logging: LoggingConfig,
}

/// Runtime flag overrides. Unset flags are read from the environment.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ArchitectureConfig {
    pub fabric: Option<bool>,
    pub turbo_modules: Option<bool>,
    pub bridgeless: Option<bool>,
}

impl ArchitectureConfig {
    pub fn has_overrides(&self) -> bool {
        self.fabric.is_some() || self.turbo_modules.is_some() || self.bridgeless.is_some()
    }

    pub fn to_flags(&self) -> StaticFlags {
        StaticFlags {
            fabric: self.fabric,
            turbo_modules: self.turbo_modules,
            bridgeless: self.bridgeless,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> BridgeResult<Self> {
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> BridgeResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        if !path.is_file() {
            return Err(BridgeError::config(format!(
                "config path is not a regular file: {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path).map_err(|source| {
            BridgeError::io_with_context(source, format!("failed to read config: {}", path.display()))
        })?;
        let parsed = toml::from_str::<Self>(&raw).map_err(|source| {
            BridgeError::config(format!("failed to parse config {}: {source}", path.display()))
        })?;
        Ok(parsed.sanitized())
    }

    fn sanitized(mut self) -> Self {
        let filter = self.logging.filter.trim();
        if filter.is_empty() {
            self.logging.filter = LoggingConfig::default().filter;
        } else if filter.len() != self.logging.filter.len() {
            self.logging.filter = filter.to_string();
        }
        self
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os("NVB_CONFIG_PATH")
        && !explicit.is_empty()
    {
        return Some(PathBuf::from(explicit));
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join("nvb").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("nvb")
                .join("config.toml"),
        );
    }
    if let Some(appdata) = std::env::var_os("APPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata).join("nvb").join("config.toml"));
    }
    None
}
