//! Application settings and paths.
//!
//! Settings live in a JSON file under the XDG configuration directory.
//! A missing file simply means defaults.

use crate::error::{ConfigError, ConfigResult};
use crate::report::ReportFormat;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/portsweep)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Locate the platform directories. Nothing is created on disk.
    pub fn discover() -> ConfigResult<Self> {
        let project =
            ProjectDirs::from("", "", "portsweep").ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Directory saved reports are written to; the working directory if unset.
    pub report_dir: Option<PathBuf>,
    /// Format used for saved reports.
    pub report_format: ReportFormat,
    /// Show a progress bar while scanning.
    pub progress: bool,
    /// Log filter used when neither `RUST_LOG` nor `-v` is given.
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            report_dir: None,
            report_format: ReportFormat::Text,
            progress: false,
            log_level: "warn".to_string(),
        }
    }
}

impl AppSettings {
    /// Load settings from the default location, or defaults if absent.
    pub fn load() -> ConfigResult<Self> {
        let file = Paths::discover()?.settings_file();

        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }

    /// Resolve where reports go.
    pub fn report_dir(&self) -> PathBuf {
        self.report_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
