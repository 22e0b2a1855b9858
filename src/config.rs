use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::categories;
use crate::error::StevioError;
use crate::puzzle::DEFAULT_GRID_SIZE;

pub const MIN_GRID_SIZE: usize = 5;
pub const MAX_GRID_SIZE: usize = 20;
pub const MIN_WORDS_PER_ROUND: usize = 1;
pub const MAX_WORDS_PER_ROUND: usize = 15;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,
    #[serde(default = "default_words_per_round")]
    pub words_per_round: usize,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_grid_size() -> usize {
    DEFAULT_GRID_SIZE
}
fn default_words_per_round() -> usize {
    8
}
fn default_theme() -> String {
    "newsprint".to_string()
}
fn default_category() -> String {
    categories::RANDOM.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            words_per_round: default_words_per_round(),
            theme: default_theme(),
            category: default_category(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("stevio")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<(), StevioError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(StevioError::GridSizeOutOfRange {
                size: self.grid_size,
                min: MIN_GRID_SIZE,
                max: MAX_GRID_SIZE,
            });
        }
        if !(MIN_WORDS_PER_ROUND..=MAX_WORDS_PER_ROUND).contains(&self.words_per_round) {
            return Err(StevioError::WordsPerRoundOutOfRange {
                count: self.words_per_round,
                min: MIN_WORDS_PER_ROUND,
                max: MAX_WORDS_PER_ROUND,
            });
        }
        Ok(())
    }

    /// Reset `category` to random if it names no known category.
    /// Call after deserialization to handle categories removed since the file
    /// was written.
    pub fn normalize_category(&mut self, valid_names: &[String]) {
        if self.category.eq_ignore_ascii_case(categories::RANDOM) {
            self.category = categories::RANDOM.to_string();
            return;
        }
        match valid_names
            .iter()
            .find(|n| n.eq_ignore_ascii_case(&self.category))
        {
            Some(name) => self.category = name.clone(),
            None => self.category = default_category(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec!["classic".to_string(), "coffee".to_string()]
    }

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.grid_size, 12);
        assert_eq!(config.words_per_round, 8);
        assert_eq!(config.category, "random");
    }

    #[test]
    fn test_config_serde_partial_file() {
        let toml_str = r#"
grid_size = 15
theme = "midnight"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.grid_size, 15);
        assert_eq!(config.theme, "midnight");
        assert_eq!(config.words_per_round, 8);
    }

    #[test]
    fn test_config_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            grid_size: 10,
            words_per_round: 6,
            theme: "coffeehouse".to_string(),
            category: "coffee".to_string(),
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_config_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_bad_toml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "grid_size = \"big\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_validate_ranges() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.grid_size = 4;
        assert!(matches!(
            config.validate(),
            Err(StevioError::GridSizeOutOfRange { size: 4, .. })
        ));

        let mut config = Config::default();
        config.words_per_round = 0;
        assert!(matches!(
            config.validate(),
            Err(StevioError::WordsPerRoundOutOfRange { count: 0, .. })
        ));
    }

    #[test]
    fn test_normalize_category_valid_unchanged() {
        let mut config = Config::default();
        config.category = "Coffee".to_string();
        config.normalize_category(&names());
        assert_eq!(config.category, "coffee");
    }

    #[test]
    fn test_normalize_category_unknown_resets() {
        let mut config = Config::default();
        config.category = "sports".to_string();
        config.normalize_category(&names());
        assert_eq!(config.category, "random");
    }

    #[test]
    fn test_normalize_category_random_kept() {
        let mut config = Config::default();
        config.normalize_category(&names());
        assert_eq!(config.category, "random");

        config.category = "Random".to_string();
        config.normalize_category(&names());
        assert_eq!(config.category, "random");
    }
}
