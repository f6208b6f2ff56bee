//! Start-at-login management command.

use crate::libs::{autostart, messages::Message};
use crate::msg_print;
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct AutostartArgs {
    #[command(subcommand)]
    command: AutostartCommand,
}

#[derive(Debug, Subcommand)]
enum AutostartCommand {
    /// Start Activity Logger when you log in
    ///
    /// Linux writes an XDG autostart entry, macOS a LaunchAgent and
    /// Windows a value under the current user's Run key.
    Enable,

    /// Stop starting Activity Logger at login
    Disable,

    /// Show whether autostart is registered
    Status,
}

/// # Examples
///
/// ```bash
/// activity-logger autostart enable
/// activity-logger autostart status
/// activity-logger autostart disable
/// ```
pub fn cmd(args: AutostartArgs) -> Result<()> {
    match args.command {
        AutostartCommand::Enable => autostart::enable(),
        AutostartCommand::Disable => autostart::disable(),
        AutostartCommand::Status => {
            let status = autostart::status()?;
            msg_print!(Message::AutostartStatus(status));
            Ok(())
        }
    }
}
