use crate::config::loader::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Operator choices that survive a restart.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    pub storage_path: PathBuf,
}

impl Settings {
    /// Reads the record; `Ok(None)` when the file does not exist yet.
    pub fn load(path: &Path) -> Result<Option<Settings>, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ConfigError::SettingsRead(e)),
        };
        let settings: Settings = serde_json::from_str(&contents)?;
        Ok(Some(settings))
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents).map_err(ConfigError::SettingsWrite)
    }
}
