//! Configuration file support for dietlog.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/dietlog/config.toml`.

use crate::{ActivityLevel, Error, Gender, Goal, Result, UserProfile};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub user: UserConfig,

    /// Stored profile so commands can run without profile flags
    #[serde(default)]
    pub profile: Option<ProfileConfig>,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Food dataset CSV; defaults to `<data_dir>/clean_food_data.csv`
    #[serde(default)]
    pub dataset_path: Option<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            dataset_path: None,
        }
    }
}

/// Name recorded in history rows
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default = "default_user_name")]
    pub name: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            name: default_user_name(),
        }
    }
}

/// Partially specified profile; missing fields must come from the command line
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct ProfileConfig {
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub activity: Option<ActivityLevel>,
    pub goal: Option<Goal>,
}

impl ProfileConfig {
    /// Fields set in `overrides` win over fields set in `self`
    pub fn merged_with(&self, overrides: &ProfileConfig) -> ProfileConfig {
        ProfileConfig {
            age: overrides.age.or(self.age),
            gender: overrides.gender.or(self.gender),
            weight_kg: overrides.weight_kg.or(self.weight_kg),
            height_cm: overrides.height_cm.or(self.height_cm),
            activity: overrides.activity.or(self.activity),
            goal: overrides.goal.or(self.goal),
        }
    }

    /// Build a complete, validated profile
    ///
    /// Goal falls back to maintenance; every other field is required.
    pub fn to_profile(&self) -> Result<UserProfile> {
        let missing = |field: &str| {
            Error::Config(format!(
                "profile field '{}' is not set (pass it as a flag or add it to [profile])",
                field
            ))
        };

        let profile = UserProfile {
            age: self.age.ok_or_else(|| missing("age"))?,
            gender: self.gender.ok_or_else(|| missing("gender"))?,
            weight_kg: self.weight_kg.ok_or_else(|| missing("weight_kg"))?,
            height_cm: self.height_cm.ok_or_else(|| missing("height_cm"))?,
            activity: self.activity.ok_or_else(|| missing("activity"))?,
            goal: self.goal.unwrap_or_default(),
        };
        profile.validate()?;
        Ok(profile)
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("dietlog")
}

fn default_user_name() -> String {
    std::env::var("USER").unwrap_or_else(|_| "me".into())
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("dietlog").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    pub fn history_path(&self) -> PathBuf {
        self.data.data_dir.join("history.csv")
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.data
            .dataset_path
            .clone()
            .unwrap_or_else(|| self.data.data_dir.join("clean_food_data.csv"))
    }
}
