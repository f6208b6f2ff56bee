//! Per-role persistence of window geometry.
//!
//! Each persistent role owns one JSON file, `window-<role>.json`, in the
//! application data directory. Files never overlap, so two roles can not
//! clobber each other's state. Writes are best effort: a failed write is
//! logged and dropped, and the window simply reopens at its defaults.

use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::shell::PersistedWindowState;
use crate::libs::windows::WindowRole;
use crate::{msg_debug, msg_warning};
use anyhow::Result;
use std::fs;
use std::path::PathBuf;

pub trait BoundsStore {
    fn get(&self, role: WindowRole) -> Option<PersistedWindowState>;
    /// Records the latest geometry. Never fails from the caller's point of view.
    fn set(&mut self, role: WindowRole, state: &PersistedWindowState);
}

/// [`BoundsStore`] backed by one JSON file per role.
#[derive(Debug, Clone)]
pub struct JsonBoundsStore {
    storage: DataStorage,
}

impl JsonBoundsStore {
    pub fn new(storage: DataStorage) -> Self {
        Self { storage }
    }

    pub fn file_name(role: WindowRole) -> String {
        format!("window-{}.json", role.storage_key())
    }

    fn path(&self, role: WindowRole) -> Result<PathBuf> {
        self.storage.get_path(&Self::file_name(role))
    }

    fn write(&self, role: WindowRole, state: &PersistedWindowState) -> Result<()> {
        let path = self.path(role)?;
        let json = serde_json::to_string_pretty(state)?;
        // Write then rename, so a crash mid-write never leaves a truncated file.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn read(&self, role: WindowRole) -> Result<Option<PersistedWindowState>> {
        let path = self.path(role)?;
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }
}

impl BoundsStore for JsonBoundsStore {
    fn get(&self, role: WindowRole) -> Option<PersistedWindowState> {
        match self.read(role) {
            Ok(state) => state,
            Err(e) => {
                msg_warning!(Message::BoundsLoadFailed(role.to_string(), e.to_string()));
                None
            }
        }
    }

    fn set(&mut self, role: WindowRole, state: &PersistedWindowState) {
        if let Err(e) = self.write(role, state) {
            msg_warning!(Message::BoundsSaveFailed(role.to_string(), e.to_string()));
            return;
        }
        msg_debug!(format!("saved geometry for {}: {:?}", role, state));
    }
}
