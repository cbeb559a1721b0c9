use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::scan::extract::DEFAULT_MAX_COLORS;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub colors_path: PathBuf,
    pub swatches_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Palette size cap for image scans.
    #[serde(default = "default_max_colors")]
    pub max_colors: usize,
}

fn default_max_colors() -> usize {
    DEFAULT_MAX_COLORS
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let data = Config::data_dir();
        Self {
            colors_path: data.join("colors.json"),
            swatches_path: data.join("swatches.json"),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_colors: DEFAULT_MAX_COLORS,
        }
    }
}

impl Config {
    /// Return the path to the configuration file.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "huebook", "huebook")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Return the platform data directory.
    pub fn data_dir() -> PathBuf {
        directories::ProjectDirs::from("com", "huebook", "huebook")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Load config from file, creating default if missing or corrupt.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            let data = fs::read_to_string(&path)?;
            match toml::from_str::<Config>(&data) {
                Ok(config) => Ok(config),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config at {}: {}",
                        path.display(),
                        e
                    );
                    eprintln!("Using default configuration.");
                    Ok(Config::default())
                }
            }
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = toml::to_string_pretty(self)?;
        fs::write(&path, data)?;

        Ok(())
    }

    /// Colors document path, expanding ~ if needed.
    pub fn colors_path(&self) -> PathBuf {
        expand_tilde(&self.catalog.colors_path)
    }

    /// Swatches document path, expanding ~ if needed.
    pub fn swatches_path(&self) -> PathBuf {
        expand_tilde(&self.catalog.swatches_path)
    }
}

fn expand_tilde(path: &PathBuf) -> PathBuf {
    if path.starts_with("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(path.strip_prefix("~").unwrap_or(path));
        }
    }
    path.clone()
}
