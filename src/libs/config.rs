//! Host configuration.
//!
//! A small JSON file, `config.json`, in the platform data directory resolved by
//! [`DataStorage`]. A missing file means defaults. The user's schedule is not
//! stored here: it arrives from the view layer with every login and settings
//! change.
//!
//! ```json
//! {
//!   "scheduler": { "poll_interval": 1000 },
//!   "notification_title": "Activity Logger",
//!   "autostart": true
//! }
//! ```
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use activity_logger::libs::config::Config;
//!
//! # fn demo() -> anyhow::Result<()> {
//! let mut config = Config::read()?;
//! config.autostart = false;
//! config.save()?;
//! # Ok(())
//! # }
//! ```

use super::data_storage::{DataStorage, APP_DISPLAY_NAME};
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::PathBuf;
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Recurring evaluation timer settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SchedulerConfig {
    /// Period of the evaluation timer in milliseconds.
    ///
    /// Independent of the question interval: it only bounds how late after
    /// becoming due a prompt can appear.
    pub poll_interval: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig { poll_interval: 1000 }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduler: Option<SchedulerConfig>,

    /// Title of the prompt notifications.
    #[serde(default = "default_notification_title")]
    pub notification_title: String,

    /// Register the binary to start at login on the first run.
    #[serde(default = "default_autostart")]
    pub autostart: bool,
}

fn default_notification_title() -> String {
    APP_DISPLAY_NAME.to_string()
}

fn default_autostart() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scheduler: None,
            notification_title: default_notification_title(),
            autostart: default_autostart(),
        }
    }
}

impl Config {
    /// Reads `config.json` from the platform data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        Self::read_from(&DataStorage::new())
    }

    pub fn read_from(storage: &DataStorage) -> Result<Config> {
        let config_file_path = Self::path_in(storage)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config =
            serde_json::from_str(&config_str).map_err(|e| msg_error_anyhow!(Message::ConfigParseError(e.to_string())))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&DataStorage::new())
    }

    pub fn save_to(&self, storage: &DataStorage) -> Result<()> {
        let config_file = File::create(Self::path_in(storage)?)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Whether a config file has been written in `storage` yet.
    pub fn exists_in(storage: &DataStorage) -> bool {
        storage.base_path().join(CONFIG_FILE_NAME).exists()
    }

    pub fn path_in(storage: &DataStorage) -> Result<PathBuf> {
        storage.get_path(CONFIG_FILE_NAME)
    }

    pub fn poll_interval(&self) -> Duration {
        let millis = self.scheduler.as_ref().map_or(SchedulerConfig::default().poll_interval, |s| s.poll_interval);
        // A zero period would make tokio's interval panic.
        Duration::from_millis(millis.max(1))
    }
}
