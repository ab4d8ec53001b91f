//! Runtime configuration: endpoint, redirect target, and upload limits.
//!
//! Loaded from `config.json` under the platform config directory when the
//! file exists, defaults otherwise. Saves go through a temp file and rename.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::schema;

pub const DEFAULT_ENDPOINT_URL: &str = "https://www.oecindia.com/api/contact";
pub const DEFAULT_REDIRECT_URL: &str = "https://www.oecindia.com";
pub const DEFAULT_REDIRECT_DELAY_SECS: u64 = 5;

const CONFIG_DIR: &str = "lead_intake";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeConfig {
    pub endpoint_url: String,
    pub redirect_url: String,
    pub redirect_delay_secs: u64,
    pub max_resume_bytes: u64,
    pub accepted_resume_types: Vec<String>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.into(),
            redirect_url: DEFAULT_REDIRECT_URL.into(),
            redirect_delay_secs: DEFAULT_REDIRECT_DELAY_SECS,
            max_resume_bytes: schema::MAX_RESUME_BYTES,
            accepted_resume_types: schema::RESUME_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            path: base.join(CONFIG_DIR).join(CONFIG_FILE),
        }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the config file, falling back to defaults when absent.
    pub fn load(&self) -> Result<IntakeConfig, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(IntakeConfig::default())
        }
    }

    pub fn save(&self, config: &IntakeConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".");
    tmp.push(TMP_SUFFIX);
    PathBuf::from(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("config.json"));
        let config = manager.load().unwrap();
        assert_eq!(config, IntakeConfig::default());
        assert_eq!(config.redirect_delay_secs, 5);
        assert_eq!(config.max_resume_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("nested").join("config.json"));
        let mut config = IntakeConfig::default();
        config.endpoint_url = "https://staging.example.com/api/contact".into();
        config.redirect_delay_secs = 3;

        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn malformed_file_is_an_error_not_a_silent_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        let manager = ConfigManager::with_path(path);
        assert!(matches!(manager.load(), Err(ConfigError::Serde(_))));
    }
}
