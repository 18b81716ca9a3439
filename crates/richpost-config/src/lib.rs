use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub delivery: DeliveryConfig,
}

/// `[delivery]` table: budget and fixed texts for delivered posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    /// Soft budget in UTF-16 code units.
    pub preferred_len: usize,
    /// Hard platform limit.
    pub max_len: usize,
    pub language: String,
    pub more_info_title: String,
    pub more_info_placeholder: String,
    pub truncation_notice: String,
    /// Footer template; `{bot_name}` and `{bot_nickname}` are filled in.
    pub promo: String,
    pub bot_name: String,
    pub bot_nickname: String,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            preferred_len: 3000,
            max_len: 4096,
            language: "russian".to_string(),
            more_info_title: "**Подробнее:**".to_string(),
            more_info_placeholder: "Нажми - Подробнее 👇".to_string(),
            truncation_notice: "Упс, кажется текст обрезался 🥲".to_string(),
            promo: "Вакансия найдена через [{bot_name}](https://t.me/{bot_nickname})".to_string(),
            bot_name: "JobBot".to_string(),
            bot_nickname: "job_bot".to_string(),
        }
    }
}

impl DeliveryConfig {
    /// Promo footer with the bot placeholders filled in.
    pub fn promo(&self) -> String {
        self.promo
            .replace("{bot_name}", &self.bot_name)
            .replace("{bot_nickname}", &self.bot_nickname)
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        // Expand shell variables and tilde in the path itself, never in values
        let config_path =
            Self::expand_path(config_path).unwrap_or_else(|| config_path.to_path_buf());
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.clone(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.clone(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/richpost");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
