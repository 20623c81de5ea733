use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where the cabin records live
    pub data_path: String,
}

impl Default for Config {
    fn default() -> Self {
        let data_path = Config::config_dir()
            .map(|dir| dir.join("cabins.json"))
            .map(|path| path.to_string_lossy().to_string())
            .unwrap_or_else(|| "cabins.json".to_string());
        Self { data_path }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".lodge-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Load the saved config, or create and persist the default one.
    pub fn load_or_default() -> Config {
        if let Some(config) = Self::load() {
            return config;
        }
        let config = Config::default();
        if let Err(err) = config.save() {
            tracing::warn!(%err, "could not persist default config");
        }
        config
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_into_config_dir() {
        let config = Config::default();
        assert!(config.data_path.ends_with("cabins.json"));
    }

    #[test]
    fn test_round_trips_through_json() {
        let config = Config {
            data_path: "/tmp/lodge/cabins.json".into(),
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.data_path, config.data_path);
    }
}
