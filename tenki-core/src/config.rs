use anyhow::{Context, Result, anyhow};
use directories::{ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Base directory for CSV exports. When unset, a `data` folder on the
    /// platform desktop is used.
    ///
    /// Example TOML:
    /// output_dir = "/home/me/weather-exports"
    pub output_dir: Option<PathBuf>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "tenki", "tenki-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Resolve the CSV base directory: the configured override if present,
    /// otherwise `<desktop>/data`.
    pub fn output_base_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.output_dir {
            return Ok(dir.clone());
        }

        let dirs =
            UserDirs::new().ok_or_else(|| anyhow!("Could not determine home directory"))?;
        let desktop = dirs
            .desktop_dir()
            .map(PathBuf::from)
            .unwrap_or_else(|| dirs.home_dir().join("Desktop"));

        Ok(desktop.join("data"))
    }
}
