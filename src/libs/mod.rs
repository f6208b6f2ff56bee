//! Core library modules.
//!
//! - **Core**: `schedule`, `scheduler`, `windows`, `session`
//! - **Shell**: `shell` (capability trait), `stdio_shell` (JSON bridge), `event`
//! - **Infrastructure**: `host`, `config`, `data_storage`, `bounds_store`, `messages`
//! - **System Integration**: `autostart`

pub mod autostart;
pub mod bounds_store;
pub mod config;
pub mod data_storage;
pub mod event;
pub mod host;
pub mod messages;
pub mod schedule;
pub mod scheduler;
pub mod session;
pub mod shell;
pub mod stdio_shell;
pub mod windows;
