use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::app_dirs::AppDirs;
use crate::language::DEFAULT_LANGUAGE;
use crate::Result;

/// Trial lengths offered in the UI, in seconds.
pub const DURATION_CHOICES: [u32; 2] = [30, 60];

/// Preferences remembered between runs. Results are never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub duration_secs: u32,
    pub language: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duration_secs: DURATION_CHOICES[0],
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl Config {
    /// The duration choice after the current one, wrapping around. A custom
    /// duration moves to the first choice.
    pub fn next_duration(&self) -> u32 {
        DURATION_CHOICES
            .iter()
            .position(|&d| d == self.duration_secs)
            .map(|i| DURATION_CHOICES[(i + 1) % DURATION_CHOICES.len()])
            .unwrap_or(DURATION_CHOICES[0])
    }

    fn sanitized(mut self) -> Self {
        if self.duration_secs == 0 {
            warn!("stored duration of 0 seconds ignored");
            self.duration_secs = Config::default().duration_secs;
        }
        if self.language.trim().is_empty() {
            self.language = DEFAULT_LANGUAGE.to_string();
        }
        self
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("keysmash_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg.sanitized(),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "unreadable config, using defaults");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            duration_secs: 60,
            language: "english200".into(),
        };
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn corrupt_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, b"{ not json").unwrap();
        let store = FileConfigStore::with_path(&path);
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{ "duration_secs": 60 }"#).unwrap();
        let loaded = FileConfigStore::with_path(&path).load();
        assert_eq!(loaded.duration_secs, 60);
        assert_eq!(loaded.language, DEFAULT_LANGUAGE);
    }

    #[test]
    fn zero_duration_is_replaced() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{ "duration_secs": 0, "language": "english" }"#).unwrap();
        let loaded = FileConfigStore::with_path(&path).load();
        assert_eq!(loaded.duration_secs, 30);
    }

    #[test]
    fn next_duration_cycles_choices() {
        let mut cfg = Config::default();
        assert_eq!(cfg.next_duration(), 60);
        cfg.duration_secs = 60;
        assert_eq!(cfg.next_duration(), 30);
        cfg.duration_secs = 45;
        assert_eq!(cfg.next_duration(), 30);
    }
}
