//! Convenient macros for application messaging and logging.
//!
//! The macros hide the distinction between debug mode (structured logging
//! through `tracing`) and normal mode (plain lines on stderr). Stdout is never
//! written here: the `run` command uses it as the shell bridge channel.
//!
//! ## Debug Mode Detection
//!
//! Debug mode is on when either environment variable is present:
//! - **`ACTIVITY_LOGGER_DEBUG`**: application-specific debug flag
//! - **`RUST_LOG`**: standard Rust logging configuration
//!
//! The result is cached for the lifetime of the process.
//!
//! ## Output Routing
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌──────────────────┐
//! │   Macro Call    │    │   Debug Mode    │    │   Output         │
//! │   msg_info!()   │───▶│   Detection     │───▶│   Routing        │
//! └─────────────────┘    └─────────────────┘    └──────────────────┘
//!          │                       │                       │
//!          ▼                       ▼                       ▼
//! ┌─────────────────┐    ┌─────────────────┐    ┌──────────────────┐
//! │ Message Content │    │ DEBUG flag or   │    │ tracing::info!   │
//! │ + Level Info    │    │ RUST_LOG set?   │    │ OR eprintln!     │
//! └─────────────────┘    └─────────────────┘    └──────────────────┘
//! ```
//!
//! ## Macro Categories
//!
//! - **`msg_print!`**, **`msg_success!`**, **`msg_info!`**, **`msg_warning!`**: display
//! - **`msg_error!`**: error display
//! - **`msg_error_anyhow!`**: build an `anyhow::Error`
//! - **`msg_debug!`**: only emitted in debug mode
//!
//! ## Usage Examples
//!
//! ```rust
//! use activity_logger::{msg_debug, msg_info, msg_warning};
//! use activity_logger::libs::messages::Message;
//!
//! msg_info!(Message::ScheduleStopped);
//! msg_warning!(Message::NoFocusedWindow);
//! msg_debug!(format!("tick at {}", 42));
//! ```

use std::sync::OnceLock;

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Checks if debug mode is enabled, with caching.
///
/// Debug mode is considered enabled if `ACTIVITY_LOGGER_DEBUG` or `RUST_LOG`
/// is set. The environment is read once; later calls return the cached value.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| {
        // Check for application-specific debug flag
        std::env::var("ACTIVITY_LOGGER_DEBUG").is_ok() ||
        // Check for standard Rust logging configuration
        std::env::var("RUST_LOG").is_ok()
    })
}

/// Prints a general message with automatic debug mode routing.
#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("{}", $msg);
        } else {
            eprintln!("{}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n{}\n", $msg);
        } else {
            eprintln!("\n{}\n", $msg);
        }
    };
}

/// Prints a success message with ✅ prefix.
#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("✅ {}", $msg);
        } else {
            eprintln!("✅ {}", $msg);
        }
    };
}

/// Prints an error message with ❌ prefix.
///
/// - **Debug Mode**: `tracing::error!`
/// - **Normal Mode**: `eprintln!`
#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("❌ {}", $msg);
        } else {
            eprintln!("❌ {}", $msg);
        }
    };
}

/// Prints a warning message with ⚠️ prefix.
///
/// Used for recovered failures: a lost geometry write, a rejected schedule,
/// a malformed line from the shell.
#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("⚠️ {}", $msg);
        } else {
            eprintln!("⚠️ {}", $msg);
        }
    };
}

/// Prints an informational message with ℹ️ prefix.
#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("ℹ️ {}", $msg);
        } else {
            eprintln!("ℹ️ {}", $msg);
        }
    };
}

/// Emits a debug message; silent outside debug mode.
#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}

/// Creates an `anyhow::Error` from a message.
#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("❌ {}", $msg)
    };
}
