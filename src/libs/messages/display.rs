//! Display implementation for application messages.
//!
//! Every log line, notification body and tray label the application produces
//! is written here, in one `match`. Call sites only ever name a [`Message`]
//! variant, so wording changes never touch the logic modules.
//!
//! ## Message Categories
//!
//! - **Window Messages**: singleton window lifecycle and geometry persistence
//! - **Schedule Messages**: prompt scheduling, expiry and configuration rejection
//! - **Notification Text**: bodies of the desktop notifications
//! - **Session Messages**: login/logout transitions and ignored intents
//! - **Tray Menu Labels**: the entries of the tray context menu
//! - **Shell Bridge Messages**: the stdin/stdout protocol to the view process
//! - **Host Messages**: control loop and signal handling
//! - **Autostart Messages**: login item registration
//! - **Configuration Messages**: host configuration file handling
//!
//! ## Usage
//!
//! ```rust
//! use activity_logger::libs::messages::Message;
//!
//! assert_eq!(Message::InputOpening.to_string(), "Input opening");
//! ```

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === WINDOW MESSAGES ===
            Message::WindowOpened(role) => format!("Window '{}' opened", role),
            Message::WindowFocused(role) => format!("Window '{}' is already open, bringing it to front", role),
            Message::WindowClosed(role) => format!("Window '{}' closed", role),
            Message::WindowOpenFailed(role, error) => format!("Failed to open window '{}': {}", role, error),
            Message::WindowEventForUnknownHandle(handle) => format!("Ignoring event for unknown window #{}", handle),
            Message::NoFocusedWindow => "No focused window to act on".to_string(),
            Message::BoundsRestored(role) => format!("Restored saved geometry for window '{}'", role),
            Message::BoundsSaveFailed(role, error) => format!("Failed to save geometry for window '{}': {}", role, error),
            Message::BoundsLoadFailed(role, error) => format!("Failed to load saved geometry for window '{}': {}", role, error),
            Message::SettingsLayoutChanged(layout) => format!("Settings window switched to {} layout", layout),

            // === SCHEDULE MESSAGES ===
            Message::ScheduleStarted {
                interval_minutes,
                poll_interval_ms,
            } => format!(
                "Prompt schedule started: every {} minute(s), evaluated every {} ms",
                interval_minutes, poll_interval_ms
            ),
            Message::ScheduleStopped => "Prompt schedule stopped".to_string(),
            Message::ScheduleRejected(error) => format!("Schedule settings rejected, keeping the previous schedule: {}", error),
            Message::PromptRaised => "Prompt window raised".to_string(),
            Message::PromptAlreadyOpen => "Prompt window is already open".to_string(),
            Message::PromptOpenFailed(error) => format!("Prompt window could not be opened: {}", error),
            Message::PromptExpired => "Prompt window closed after its screen time ran out".to_string(),
            Message::StaleTimerIgnored(id) => format!("Ignoring stale timer #{}", id),

            // === NOTIFICATION TEXT ===
            Message::InputOpening => "Input opening".to_string(),
            Message::InputClosedDueToTimeout => "Input closed due to timeout".to_string(),

            // === SESSION MESSAGES ===
            Message::SessionLoading => "Session loading".to_string(),
            Message::SessionAuthenticated(user) => {
                if user.is_empty() {
                    "Session authenticated".to_string()
                } else {
                    format!("Session authenticated for user {}", user)
                }
            }
            Message::SessionUnauthenticated => "Session logged out".to_string(),
            Message::SessionIntentIgnored { intent, state } => format!("Ignoring '{}' while {}", intent, state),
            Message::SessionScheduleIdle => "No valid schedule settings yet, prompts stay idle until settings arrive".to_string(),
            Message::SessionExitRequested => "Exit requested".to_string(),
            Message::TrayCreateFailed(error) => format!("Failed to create tray icon: {}", error),

            // === TRAY MENU LABELS ===
            Message::TrayInterface => "Interface".to_string(),
            Message::TraySettings => "Settings".to_string(),
            Message::TrayLogout => "Logout".to_string(),
            Message::TrayExit => "Exit".to_string(),

            // === SHELL BRIDGE MESSAGES ===
            Message::ShellWriteFailed(error) => format!("Failed to send command to the shell: {}", error),
            Message::InboundParseFailed(error) => format!("Skipping malformed message from the shell: {}", error),
            Message::InboundReadFailed(error) => format!("Failed to read from the shell: {}", error),
            Message::InboundStreamClosed => "Shell input closed".to_string(),

            // === HOST MESSAGES ===
            Message::HostStarted(version) => format!("Activity Logger v{} started", version),
            Message::HostReceivedSigterm => "Received SIGTERM, shutting down...".to_string(),
            Message::HostReceivedSigint => "Received SIGINT, shutting down...".to_string(),
            Message::HostReceivedCtrlC => "Received Ctrl+C, shutting down...".to_string(),
            Message::HostCtrlCListenFailed(error) => format!("Failed to listen for Ctrl+C: {}", error),
            Message::HostSignalHandlerFailed(error) => format!("Failed to install signal handler: {}", error),
            Message::HostSignalHandlingNotSupported => "Signal handling is not supported on this platform".to_string(),
            Message::HostShuttingDown => "Shutting down...".to_string(),
            Message::HostExited => "Activity Logger exited".to_string(),

            // === AUTOSTART MESSAGES ===
            Message::AutostartEnabled => "Autostart has been enabled. Activity Logger will start when you log in.".to_string(),
            Message::AutostartAlreadyEnabled => "Autostart is already enabled.".to_string(),
            Message::AutostartDisabled => "Autostart has been disabled.".to_string(),
            Message::AutostartAlreadyDisabled => "Autostart was already disabled.".to_string(),
            Message::AutostartEnableFailed(error) => format!("Failed to enable autostart: {}", error),
            Message::AutostartDisableFailed(error) => format!("Failed to disable autostart: {}", error),
            Message::AutostartStatus(status) => format!("Autostart is currently: {}", status),
            Message::AutostartHomeUnknown => "Cannot locate the home directory: HOME is not set".to_string(),
            Message::AutostartEnsureFailed(error) => format!("Could not register autostart: {}", error),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved(path) => format!("Configuration saved to {}", path),
            Message::ConfigParseError(error) => format!("Failed to parse configuration: {}", error),
            Message::ConfigLocation(path) => format!("Configuration file: {}", path),
        };
        write!(f, "{}", text)
    }
}
