//! Dashboard configuration
//!
//! Loaded from an optional YAML file; every field has a default so an empty
//! file (or no file) gives the trial site's standard setup.
//!
//! ```yaml
//! title: "Newmont Boddington Wear Sensor Trial - Linerless Tray"
//! latest_file: pwsReadingsLatest.xlsx
//! database_file: Boddington_pwsTray_Database_update.xlsx
//! host: 0.0.0.0
//! port: 8080
//! ```

use crate::error::{DashboardError, DashboardResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub title: String,
    /// Workbook holding the most recent upload from the sensor reader
    pub latest_file: PathBuf,
    /// Workbook with one worksheet per sensor
    pub database_file: PathBuf,
    pub host: String,
    pub port: u16,
    /// Labels of the installation-details tabs (installed tray, future trials)
    pub installation_tabs: Vec<String>,
    /// Labels of the live-status tabs (sensor readings, debug table)
    pub status_tabs: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Newmont Boddington Wear Sensor Trial - Linerless Tray".to_string(),
            latest_file: PathBuf::from("pwsReadingsLatest.xlsx"),
            database_file: PathBuf::from("Boddington_pwsTray_Database_update.xlsx"),
            host: "127.0.0.1".to_string(),
            port: 8080,
            installation_tabs: vec![
                "LinerLess Tray w/ Passive Wear Sensor".to_string(),
                "Future Trials".to_string(),
            ],
            status_tabs: vec![
                "LinerLess Tray w/ Passive Wear Sensor".to_string(),
                "Debug & Data Table".to_string(),
            ],
        }
    }
}

impl DashboardConfig {
    /// Load and validate a YAML config file
    pub fn load(path: &Path) -> DashboardResult<Self> {
        if !path.exists() {
            return Err(DashboardError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> DashboardResult<Self> {
        // An empty document deserializes to unit, not a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use the defaults
    pub fn load_or_default(path: Option<&Path>) -> DashboardResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> DashboardResult<()> {
        if self.title.trim().is_empty() {
            return Err(DashboardError::Config("title must not be empty".to_string()));
        }
        if self.installation_tabs.len() != 2 {
            return Err(DashboardError::Config(format!(
                "installation_tabs needs exactly 2 labels, got {}",
                self.installation_tabs.len()
            )));
        }
        if self.status_tabs.len() != 2 {
            return Err(DashboardError::Config(format!(
                "status_tabs needs exactly 2 labels, got {}",
                self.status_tabs.len()
            )));
        }
        if self.port == 0 {
            return Err(DashboardError::Config("port must be non-zero".to_string()));
        }
        Ok(())
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Replace the workbook paths given on the command line
    pub fn with_workbooks(mut self, latest: Option<PathBuf>, database: Option<PathBuf>) -> Self {
        if let Some(latest) = latest {
            self.latest_file = latest;
        }
        if let Some(database) = database {
            self.database_file = database;
        }
        self
    }
}
