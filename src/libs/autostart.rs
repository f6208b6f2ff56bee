//! Start at login.
//!
//! Registers the binary (with the `run` subcommand) to be launched when the
//! user logs in:
//!
//! - **Linux/BSD**: XDG autostart entry `~/.config/autostart/activity-logger.desktop`
//! - **macOS**: LaunchAgent `~/Library/LaunchAgents/<vendor>.<app>.plist`
//! - **Windows**: value in `HKCU\Software\Microsoft\Windows\CurrentVersion\Run`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use activity_logger::libs::autostart;
//!
//! # fn demo() -> anyhow::Result<()> {
//! autostart::enable()?;
//! println!("autostart is {}", autostart::status()?);
//! autostart::disable()?;
//! # Ok(())
//! # }
//! ```

use crate::libs::data_storage::{APP_NAME, VENDOR_NAME};
use crate::libs::messages::Message;
use crate::{msg_debug, msg_error_anyhow, msg_info, msg_success};
use anyhow::Result;
use std::env;
use std::path::Path;

/// Argument the registered command line starts the binary with.
const RUN_ARG: &str = "run";

#[cfg(target_os = "windows")]
mod windows {
    use super::*;
    use std::os::windows::process::CommandExt;
    use std::process::Command;

    const RUN_KEY: &str = r"HKCU\Software\Microsoft\Windows\CurrentVersion\Run";
    const VALUE_NAME: &str = "ActivityLogger";

    /// Hides the console window of spawned `reg` processes.
    const CREATE_NO_WINDOW: u32 = 0x08000000;

    /// Converts `reg` output to UTF-8, falling back to Windows-1252.
    pub(crate) fn decode_windows_output(bytes: &[u8]) -> String {
        if let Ok(utf8) = String::from_utf8(bytes.to_vec()) {
            return utf8;
        }
        encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
    }

    pub fn enable(exe: &Path) -> Result<bool> {
        if is_enabled()? {
            return Ok(false);
        }
        let output = Command::new("reg")
            .args([
                "add",
                RUN_KEY,
                "/v",
                VALUE_NAME,
                "/t",
                "REG_SZ",
                "/d",
                &format!("\"{}\" {}", exe.to_string_lossy(), RUN_ARG),
                "/f",
            ])
            .creation_flags(CREATE_NO_WINDOW)
            .output()?;

        if output.status.success() {
            Ok(true)
        } else {
            let error = decode_windows_output(&output.stderr);
            Err(msg_error_anyhow!(Message::AutostartEnableFailed(error)))
        }
    }

    pub fn disable() -> Result<bool> {
        let output = Command::new("reg")
            .args(["delete", RUN_KEY, "/v", VALUE_NAME, "/f"])
            .creation_flags(CREATE_NO_WINDOW)
            .output()?;

        if output.status.success() {
            return Ok(true);
        }
        let error = decode_windows_output(&output.stderr);
        if error.contains("The system cannot find") {
            Ok(false)
        } else {
            Err(msg_error_anyhow!(Message::AutostartDisableFailed(error)))
        }
    }

    pub fn is_enabled() -> Result<bool> {
        let output = Command::new("reg")
            .args(["query", RUN_KEY, "/v", VALUE_NAME])
            .creation_flags(CREATE_NO_WINDOW)
            .output()?;
        Ok(output.status.success())
    }
}

/// File-based autostart: one entry file under the user's home directory.
#[cfg(not(target_os = "windows"))]
pub mod unix {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    /// Location of the autostart entry under `home`.
    pub fn entry_path(home: &Path) -> PathBuf {
        if cfg!(target_os = "macos") {
            home.join("Library")
                .join("LaunchAgents")
                .join(format!("{}.plist", launch_agent_label()))
        } else {
            home.join(".config").join("autostart").join(format!("{}.desktop", APP_NAME))
        }
    }

    fn launch_agent_label() -> String {
        format!("com.{}.{}", VENDOR_NAME, APP_NAME)
    }

    pub fn entry_contents(exe: &Path) -> String {
        let exe = exe.to_string_lossy();
        if cfg!(target_os = "macos") {
            format!(
                r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Label</key>
    <string>{label}</string>
    <key>ProgramArguments</key>
    <array>
        <string>{exe}</string>
        <string>{arg}</string>
    </array>
    <key>RunAtLoad</key>
    <true/>
</dict>
</plist>
"#,
                label = launch_agent_label(),
                exe = exe,
                arg = RUN_ARG,
            )
        } else {
            format!(
                "[Desktop Entry]\nType=Application\nName=Activity-Logger\nExec=\"{}\" {}\nX-GNOME-Autostart-enabled=true\n",
                exe, RUN_ARG
            )
        }
    }

    /// Writes the entry. Returns `false` when an up-to-date entry was already there.
    pub fn enable_at(home: &Path, exe: &Path) -> Result<bool> {
        let path = entry_path(home);
        let contents = entry_contents(exe);
        if fs::read_to_string(&path).is_ok_and(|existing| existing == contents) {
            return Ok(false);
        }
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| msg_error_anyhow!(Message::AutostartEnableFailed(e.to_string())))?;
        }
        msg_debug!(format!("writing autostart entry {}", path.display()));
        fs::write(&path, contents).map_err(|e| msg_error_anyhow!(Message::AutostartEnableFailed(e.to_string())))?;
        Ok(true)
    }

    /// Removes the entry. Returns `false` when there was none.
    pub fn disable_at(home: &Path) -> Result<bool> {
        let path = entry_path(home);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(|e| msg_error_anyhow!(Message::AutostartDisableFailed(e.to_string())))?;
        Ok(true)
    }

    pub fn is_enabled_at(home: &Path) -> bool {
        entry_path(home).exists()
    }

    pub(super) fn home() -> Result<PathBuf> {
        env::var_os("HOME")
            .map(PathBuf::from)
            .ok_or_else(|| msg_error_anyhow!(Message::AutostartHomeUnknown))
    }
}

fn enable_for(exe: &Path) -> Result<bool> {
    #[cfg(target_os = "windows")]
    return windows::enable(exe);

    #[cfg(not(target_os = "windows"))]
    return unix::enable_at(&unix::home()?, exe);
}

/// Registers the current executable to start at login.
pub fn enable() -> Result<()> {
    let exe = env::current_exe()?;
    if enable_for(&exe)? {
        msg_success!(Message::AutostartEnabled);
    } else {
        msg_info!(Message::AutostartAlreadyEnabled);
    }
    Ok(())
}

pub fn disable() -> Result<()> {
    #[cfg(target_os = "windows")]
    let removed = windows::disable()?;

    #[cfg(not(target_os = "windows"))]
    let removed = unix::disable_at(&unix::home()?)?;

    if removed {
        msg_success!(Message::AutostartDisabled);
    } else {
        msg_info!(Message::AutostartAlreadyDisabled);
    }
    Ok(())
}

pub fn is_enabled() -> Result<bool> {
    #[cfg(target_os = "windows")]
    return windows::is_enabled();

    #[cfg(not(target_os = "windows"))]
    return Ok(unix::is_enabled_at(&unix::home()?));
}

/// `"enabled"` or `"disabled"`.
pub fn status() -> Result<String> {
    match is_enabled()? {
        true => Ok("enabled".to_string()),
        false => Ok("disabled".to_string()),
    }
}

/// Registers autostart silently when it is not registered yet.
pub fn ensure() -> Result<()> {
    let exe = env::current_exe()?;
    if enable_for(&exe)? {
        msg_info!(Message::AutostartEnabled);
    }
    Ok(())
}
