//! Global timeblock configuration.

use std::path::{Path, PathBuf};

use chrono::{Duration, FixedOffset};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{CONFIG_DIR_NAME, DEFAULT_STORE_PATH, SELECTION_PAD_MINUTES};
use crate::error::{TimeblockError, TimeblockResult};
use crate::timeblock::parse_offset;

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

fn is_default_store_path(p: &PathBuf) -> bool {
    *p == default_store_path()
}

fn default_pad_minutes() -> i64 {
    SELECTION_PAD_MINUTES
}

fn is_default_pad_minutes(m: &i64) -> bool {
    *m == SELECTION_PAD_MINUTES
}

/// Configuration at ~/.config/timeblock/config.toml
///
/// Every key can be overridden with a `TIMEBLOCK_`-prefixed environment
/// variable (e.g. `TIMEBLOCK_SELECTION_PAD_MINUTES=30`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TimeblockConfig {
    /// JSON file holding the stored timeblocks
    #[serde(default = "default_store_path", skip_serializing_if = "is_default_store_path")]
    pub store_path: PathBuf,

    /// How far a selection is rounded up past its last picked slot
    #[serde(default = "default_pad_minutes", skip_serializing_if = "is_default_pad_minutes")]
    pub selection_pad_minutes: i64,

    /// Offset written into clipped times instead of the selection's own offset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forced_offset: Option<String>,
}

impl Default for TimeblockConfig {
    fn default() -> Self {
        TimeblockConfig {
            store_path: default_store_path(),
            selection_pad_minutes: SELECTION_PAD_MINUTES,
            forced_offset: None,
        }
    }
}

impl TimeblockConfig {
    pub fn config_path() -> TimeblockResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TimeblockError::Config("Could not determine config directory".into()))?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config file plus environment overrides, writing a
    /// commented-out default file first if none exists.
    pub fn load() -> TimeblockResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(Environment::with_prefix("TIMEBLOCK").try_parsing(true))
            .build()
            .map_err(|e| TimeblockError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TimeblockError::Config(e.to_string()))
    }

    /// Load a specific config file, without environment overrides.
    pub fn load_from(path: &Path) -> TimeblockResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| TimeblockError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TimeblockError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> TimeblockResult<()> {
        let contents = format!(
            "\
# timeblock configuration

# Where timeblocks are stored:
# store_path = \"{}\"

# Minutes added past the last picked slot of a selection:
# selection_pad_minutes = {}

# Offset used when writing clipped times (defaults to the selection's offset):
# forced_offset = \"+00:00\"
",
            DEFAULT_STORE_PATH, SELECTION_PAD_MINUTES
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TimeblockError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| TimeblockError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Store path with `~` expanded.
    pub fn store_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.store_path.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn selection_pad(&self) -> TimeblockResult<Duration> {
        if self.selection_pad_minutes < 0 {
            return Err(TimeblockError::Config(format!(
                "selection_pad_minutes must not be negative (got {})",
                self.selection_pad_minutes
            )));
        }
        Ok(Duration::minutes(self.selection_pad_minutes))
    }

    pub fn forced_offset(&self) -> TimeblockResult<Option<FixedOffset>> {
        self.forced_offset
            .as_deref()
            .map(|s| {
                parse_offset(s)
                    .ok_or_else(|| TimeblockError::Config(format!("Invalid forced_offset '{s}'")))
            })
            .transpose()
    }
}
