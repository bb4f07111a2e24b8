//! Configuration for the dashboard.
//!
//! Loaded from a TOML file; every section and field has a default so a
//! partial (or missing) file is fine.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::model::{CategorySelection, DateRange, FilterCriteria};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "sales-dash.toml";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data: DataConfig,
    pub filter: FilterConfig,
}

/// Where records come from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// JSON or CSV dataset. The bundled sample is used when unset.
    pub path: Option<PathBuf>,
}

/// Initial filter selection and selector options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Initial category selector value; `"All"` means unrestricted.
    pub category: String,
    /// Length of the initial date range, ending today.
    pub lookback_months: u32,
    /// Options offered by the category selector. Empty means "derive from data".
    pub categories: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            category: CategorySelection::ALL.to_string(),
            lookback_months: 1,
            categories: vec![
                "Electronics".to_string(),
                "Clothing".to_string(),
                "Furniture".to_string(),
            ],
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: DashboardConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load an explicit file, or `./sales-dash.toml` if present, or defaults.
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file is not.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            log::info!("Loading config from {}", path.display());
            return Self::load(path);
        }

        let default_path = Self::default_path();
        if default_path.exists() {
            log::info!("Loading config from {}", default_path.display());
            return Self::load(&default_path);
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Save configuration to a file path.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> PathBuf {
        PathBuf::from(DEFAULT_CONFIG_FILE)
    }

    /// The selection a fresh dashboard starts with: the last
    /// `lookback_months` months up to `today`, and the configured category.
    pub fn default_criteria(&self, today: NaiveDate) -> FilterCriteria {
        FilterCriteria::new(
            DateRange::trailing_months(today, self.filter.lookback_months),
            CategorySelection::from_selector(&self.filter.category),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: DashboardConfig = toml::from_str("[filter]\nlookback_months = 3\n").unwrap();
        assert_eq!(config.filter.lookback_months, 3);
        assert_eq!(config.filter.category, "All");
        assert_eq!(config.filter.categories.len(), 3);
        assert_eq!(config.data.path, None);
    }

    #[test]
    fn test_default_criteria_is_last_month() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        let criteria = DashboardConfig::default().default_criteria(today);
        let month_ago = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
        assert_eq!(criteria.range.start, month_ago);
        assert_eq!(criteria.range.end, today);
        assert_eq!(criteria.category, CategorySelection::All);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dash.toml");

        let mut config = DashboardConfig::default();
        config.data.path = Some(PathBuf::from("data/sales.csv"));
        config.filter.category = "Clothing".to_string();
        config.save(&path).unwrap();

        let loaded = DashboardConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            DashboardConfig::load_or_default(Some(&missing)),
            Err(ConfigError::ReadError(_))
        ));
    }

    #[test]
    fn test_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "filter = 3").unwrap();
        assert!(matches!(
            DashboardConfig::load(&path),
            Err(ConfigError::ParseError(_))
        ));
    }
}
