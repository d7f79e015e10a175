use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::{HubError, Result};

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Directory holding the persisted data file
    pub data_dir: PathBuf,

    /// Default directory for exported backups
    pub export_dir: PathBuf,
}

impl Config {
    /// Resolves the configuration, preferring an explicit data directory
    /// over the platform default.
    pub fn resolve(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => ProjectDirs::from("", "", "content-hub")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or_else(|| HubError::ApplicationError {
                    message: "could not determine a data directory for this platform".to_string(),
                })?,
        };

        // Exports land where the user invoked the tool.
        let export_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        Ok(Self {
            data_dir,
            export_dir,
        })
    }
}
