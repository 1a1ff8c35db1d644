use directories::BaseDirs;
use recents_core::HistoryConfig;
use serde::Deserialize;
use std::{env, fs, path::PathBuf};
use tracing::warn;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct FileConfig {
    pub storage_key: Option<String>,
    pub max_items: Option<usize>,
    pub storage_path: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub history: HistoryConfig,
    // None = keep history in memory only
    pub storage_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env_and_file() -> Self {
        let mut file_cfg = None;
        if let Some(path) = Self::config_path() {
            if path.exists() {
                match fs::read_to_string(&path) {
                    Ok(text) => match toml::from_str::<FileConfig>(&text) {
                        Ok(c) => file_cfg = Some(c),
                        Err(e) => warn!(target: "config", "ignoring {}: {}", path.display(), e),
                    },
                    Err(e) => warn!(target: "config", "read {}: {}", path.display(), e),
                }
            }
        }
        Self::resolve(file_cfg.unwrap_or_default(), |k| env::var(k).ok())
    }

    /// Env wins over the file, the file over defaults.
    pub fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let mut history = HistoryConfig::default();
        if let Some(k) = file.storage_key.filter(|k| !k.trim().is_empty()) {
            history.storage_key = k;
        }
        if let Some(n) = file.max_items {
            history.max_items = n;
        }
        if let Some(k) = env("WEATHER_RECENTS_STORAGE_KEY").filter(|k| !k.trim().is_empty()) {
            history.storage_key = k;
        }
        if let Some(raw) = env("WEATHER_RECENTS_MAX_ITEMS") {
            match raw.trim().parse::<usize>() {
                Ok(n) => history.max_items = n,
                Err(_) => warn!(target: "config", "bad WEATHER_RECENTS_MAX_ITEMS={:?}", raw),
            }
        }
        history.max_items = history.max_items.max(1);

        // A blank path means "unset", not the current directory.
        let storage_path = env("WEATHER_RECENTS_STORAGE_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .or(file
                .storage_path
                .filter(|p| !p.to_string_lossy().trim().is_empty()))
            .or_else(crate::persist::storage_path);

        AppConfig {
            history,
            storage_path,
        }
    }

    fn config_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        let p = if cfg!(target_os = "windows") {
            base.home_dir().join(".weather-recents").join("config.toml")
        } else {
            base.config_dir().join("weather-recents").join("config.toml")
        };
        Some(p)
    }
}
