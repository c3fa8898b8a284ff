use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    CONFIG_ENV, CONFIG_FILE, L1_DIR, L2_DIR, L2_EXCLUDE, L3_DIR, L3_EXCLUDE, LOG_DIR, OUTPUT_FILE,
};
use crate::domain::Level;
use crate::error::{NormalizerError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory the level folders, output and logs are resolved against
    pub base_dir: PathBuf,
    pub output: PathBuf,
    pub log_dir: PathBuf,
    pub levels: LevelsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LevelsConfig {
    pub l1: LevelConfig,
    pub l2: LevelConfig,
    pub l3: LevelConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LevelConfig {
    pub dir: PathBuf,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl LevelConfig {
    fn new(dir: &str, exclude: &[&str]) -> Self {
        Self {
            dir: PathBuf::from(dir),
            exclude: exclude.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LevelsConfig {
    fn default() -> Self {
        Self {
            l1: LevelConfig::new(L1_DIR, &[]),
            l2: LevelConfig::new(L2_DIR, L2_EXCLUDE),
            l3: LevelConfig::new(L3_DIR, L3_EXCLUDE),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            output: PathBuf::from(OUTPUT_FILE),
            log_dir: PathBuf::from(LOG_DIR),
            levels: LevelsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the file `resolve_path` picks, or defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_from(Self::resolve_path(explicit)?.as_deref())
    }

    /// The config file a run reads, if any.
    ///
    /// Lookup order: `explicit`, then `$SURVEY_NORMALIZER_CONFIG`, then
    /// `survey_normalizer.toml` in the working directory. A file requested
    /// explicitly (by argument or environment) is returned whether or not it
    /// exists; a missing default file yields `None`.
    pub fn resolve_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            return Ok(Some(path.to_path_buf()));
        }
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.trim().is_empty() => return Ok(Some(PathBuf::from(path))),
            Ok(_) | Err(std::env::VarError::NotPresent) => {}
            Err(e) => return Err(e.into()),
        }

        let default_path = PathBuf::from(CONFIG_FILE);
        Ok(default_path.exists().then_some(default_path))
    }

    /// Parse `path`, or fall back to built-in defaults when there is none
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let Some(config_path) = path else {
            return Ok(Self::default());
        };

        let config_content = fs::read_to_string(config_path).map_err(|e| {
            NormalizerError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        Self::from_toml_str(&config_content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn level(&self, level: Level) -> &LevelConfig {
        match level {
            Level::L1 => &self.levels.l1,
            Level::L2 => &self.levels.l2,
            Level::L3 => &self.levels.l3,
        }
    }

    pub fn level_dir(&self, level: Level) -> PathBuf {
        self.base_dir.join(&self.level(level).dir)
    }

    pub fn output_path(&self) -> PathBuf {
        self.base_dir.join(&self.output)
    }

    pub fn log_path(&self) -> PathBuf {
        self.base_dir.join(&self.log_dir)
    }
}
