//! Configuration management for postflow

use crate::error::{Result, WorkflowError};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the configuration file inside the data directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Workflow settings
    pub workflow: WorkflowConfig,
    /// Storage settings
    pub storage: StorageConfig,
    /// Display settings
    pub display: DisplayConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(WorkflowError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is missing
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(WorkflowError::FileNotFound(_)) => {
                debug!("No configuration at {:?}, using defaults", path);
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| WorkflowError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render configuration as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| WorkflowError::Config(e.to_string()))
    }

    /// Write configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        debug!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.workflow.max_comment_length == 0 {
            return Err(WorkflowError::Config(
                "workflow.max_comment_length must be greater than 0".to_string(),
            ));
        }
        if self.workflow.max_title_length == 0 {
            return Err(WorkflowError::Config(
                "workflow.max_title_length must be greater than 0".to_string(),
            ));
        }
        if StrftimeItems::new(&self.display.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(WorkflowError::Config(format!(
                "display.date_format is not a valid format string: {}",
                self.display.date_format
            )));
        }
        Ok(())
    }
}

/// Workflow-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Maximum comment content length
    pub max_comment_length: usize,
    /// Maximum post title length
    pub max_title_length: usize,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            max_comment_length: 10000,
            max_title_length: 200,
        }
    }
}

/// Storage-related configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Override for the data directory
    pub data_dir: Option<PathBuf>,
}

/// Display-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// chrono format string for timestamps
    pub date_format: String,
    /// Show resolved comments in threads
    pub show_resolved: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: "%b %-d, %Y %H:%M".to_string(),
            show_resolved: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.workflow.max_comment_length, 10000);
        assert_eq!(config.workflow.max_title_length, 200);
        assert!(config.storage.data_dir.is_none());
        assert!(config.display.show_resolved);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[workflow]"));
        assert!(toml.contains("[display]"));

        let config2 = Config::from_toml(&toml).unwrap();
        assert_eq!(
            config.workflow.max_comment_length,
            config2.workflow.max_comment_length
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::from_toml("[workflow]\nmax_comment_length = 500\n").unwrap();
        assert_eq!(config.workflow.max_comment_length, 500);
        assert_eq!(config.workflow.max_title_length, 200);
        assert!(config.display.show_resolved);
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::from_toml("[workflow]\nmax_comment_length = 0\n").is_err());
        assert!(Config::from_toml("not toml at all [").is_err());
    }

    #[test]
    fn test_invalid_date_format_rejected() {
        let err = Config::from_toml("[display]\ndate_format = \"%Q\"\n").unwrap_err();
        assert!(matches!(err, WorkflowError::Config(_)));

        let config = Config::from_toml("[display]\ndate_format = \"%Y-%m-%d\"\n").unwrap();
        assert_eq!(config.display.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_load_or_default() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);

        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config.workflow.max_title_length, 200);

        let mut custom = Config::default();
        custom.display.show_resolved = false;
        custom.save(&path).unwrap();

        let loaded = Config::load_or_default(&path).unwrap();
        assert!(!loaded.display.show_resolved);
    }
}
