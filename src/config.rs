//! Dashboard Configuration
//! Input paths and UI defaults, optionally read from `dashboard.json`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Paths of the three input tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSources {
    pub order_items_path: PathBuf,
    pub order_reviews_path: PathBuf,
    pub products_path: PathBuf,
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            order_items_path: PathBuf::from("../data/order_items_dataset.csv"),
            order_reviews_path: PathBuf::from("../data/order_reviews_dataset.csv"),
            products_path: PathBuf::from("../data/products_dataset.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    #[serde(flatten)]
    pub sources: DataSources,
    pub export_file_name: String,
    pub default_min_rating: u8,
    pub preview_rows: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            sources: DataSources::default(),
            export_file_name: "filtered_data.csv".to_string(),
            default_min_rating: 3,
            preview_rows: 5,
        }
    }
}

impl DashboardConfig {
    /// Load `dashboard.json` from the working directory, or defaults if absent.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Path::new(CONFIG_FILE);
        if path.exists() {
            Self::from_file(path)
        } else {
            log::debug!("No {} found, using defaults", CONFIG_FILE);
            Ok(Self::default())
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config.normalized())
    }

    /// Clamp UI defaults into their widget ranges.
    pub fn normalized(mut self) -> Self {
        self.default_min_rating = self.default_min_rating.clamp(MIN_RATING, MAX_RATING);
        self
    }
}
