use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_period")]
    pub default_period_min: u32,
    #[serde(default = "default_short_rest")]
    pub short_rest_min: u32,
    #[serde(default = "default_long_rest")]
    pub long_rest_min: u32,
    #[serde(default = "default_popup")]
    pub popup: bool,
}

fn default_period() -> u32 {
    25
}
fn default_short_rest() -> u32 {
    5
}
fn default_long_rest() -> u32 {
    5
}
fn default_popup() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::default_database(),
            default_period_min: default_period(),
            short_rest_min: default_short_rest(),
            long_rest_min: default_long_rest(),
            popup: default_popup(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rpomodoro")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".rpomodoro")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rpomodoro.conf")
    }

    /// Default database location: a fixed filename next to the running process.
    pub fn default_database() -> String {
        "pomodoro.db".to_string()
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_yaml::from_str(&content).map_err(|_| AppError::ConfigLoad)
        } else {
            Ok(Config::default())
        }
    }

    /// Initialize the configuration directory and file.
    /// In test mode the config file is left untouched.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let config = Config {
            database: custom_db.unwrap_or_else(Self::default_database),
            ..Config::default()
        };

        if !is_test {
            let yaml = serde_yaml::to_string(&config).map_err(|_| AppError::ConfigSave)?;
            fs::write(Self::config_file(), yaml)?;
        }

        Ok(config)
    }
}
