//! Runs the application against a shell process on stdin/stdout.
//!
//! On the very first run (no `config.json` yet) the default config is written
//! and, unless disabled, the binary registers itself to start at login.

use crate::libs::config::Config;
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::{autostart, host};
use crate::{msg_debug, msg_info, msg_warning};
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    let storage = DataStorage::new();
    let first_run = !Config::exists_in(&storage);
    let config = Config::read_from(&storage)?;
    msg_debug!(Message::ConfigLocation(Config::path_in(&storage)?.display().to_string()));

    if first_run {
        config.save_to(&storage)?;
        msg_info!(Message::ConfigSaved(Config::path_in(&storage)?.display().to_string()));
        if config.autostart {
            if let Err(e) = autostart::ensure() {
                msg_warning!(Message::AutostartEnsureFailed(e.to_string()));
            }
        }
    }

    host::run_with_signal_handling(&config, storage).await
}
