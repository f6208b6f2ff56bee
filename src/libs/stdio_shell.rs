//! Line-delimited JSON bridge to an external shell process.
//!
//! The binary does not draw anything itself. It drives a view/shell process
//! over stdio, one JSON object per line:
//!
//! ```text
//!   core ── stdout ──▶ {"command":"createWindow","window":1,"role":"loading",...}
//!   core ◀── stdin ─── {"type":"windowEvent","window":1,"event":{"type":"focused"}}
//! ```
//!
//! Window and tray ids are allocated here, so creation never waits for a
//! round trip. Once a write to stdout fails the bridge is considered closed
//! and every later creation reports [`ShellError::DisplayUnavailable`].

use crate::libs::event::{AppEvent, EventSender, Intent, WindowEvent};
use crate::libs::messages::Message;
use crate::libs::shell::{Bounds, Shell, ShellError, Size, TrayAction, TrayHandle, TrayItem, WindowHandle, WindowOptions};
use crate::libs::windows::WindowRole;
use crate::{msg_debug, msg_error, msg_info, msg_warning};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use std::thread;

/// Outbound command, one per line.
#[derive(Debug, Serialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum ShellCommand<'a> {
    CreateWindow {
        window: WindowHandle,
        role: WindowRole,
        options: &'a WindowOptions,
    },
    Navigate {
        window: WindowHandle,
        route: &'a str,
    },
    CloseWindow {
        window: WindowHandle,
    },
    FocusWindow {
        window: WindowHandle,
    },
    SetBounds {
        window: WindowHandle,
        bounds: Bounds,
    },
    Maximize {
        window: WindowHandle,
    },
    Unmaximize {
        window: WindowHandle,
    },
    Minimize {
        window: WindowHandle,
    },
    Notify {
        title: &'a str,
        body: &'a str,
    },
    CreateTray {
        tray: u64,
        tooltip: &'a str,
        items: &'a [TrayItem],
    },
    DestroyTray {
        tray: u64,
    },
    Quit,
}

/// [`Shell`] that serializes every call onto a writer.
pub struct StdioShell<W: Write> {
    out: W,
    next_id: u64,
    closed: bool,
}

impl<W: Write> StdioShell<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            next_id: 1,
            closed: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn send(&mut self, command: &ShellCommand) -> io::Result<()> {
        if self.closed {
            return Err(io::ErrorKind::BrokenPipe.into());
        }
        let line = serde_json::to_string(command)?;
        let written = writeln!(self.out, "{}", line).and_then(|()| self.out.flush());
        if written.is_err() {
            self.closed = true;
        }
        written
    }

    /// Sends a command whose failure the caller can not act on.
    fn post(&mut self, command: ShellCommand) {
        if let Err(e) = self.send(&command) {
            msg_warning!(Message::ShellWriteFailed(e.to_string()));
        }
    }
}

impl<W: Write> Shell for StdioShell<W> {
    fn create_window(&mut self, role: WindowRole, options: &WindowOptions) -> Result<WindowHandle, ShellError> {
        let window = WindowHandle(self.allocate_id());
        self.send(&ShellCommand::CreateWindow { window, role, options }).map_err(|e| {
            msg_debug!(format!("createWindow for {} failed: {}", role, e));
            ShellError::DisplayUnavailable
        })?;
        Ok(window)
    }

    fn navigate(&mut self, window: WindowHandle, route: &str) {
        self.post(ShellCommand::Navigate { window, route });
    }

    fn close_window(&mut self, window: WindowHandle) {
        self.post(ShellCommand::CloseWindow { window });
    }

    fn focus_window(&mut self, window: WindowHandle) {
        self.post(ShellCommand::FocusWindow { window });
    }

    fn set_bounds(&mut self, window: WindowHandle, bounds: Bounds) {
        self.post(ShellCommand::SetBounds { window, bounds });
    }

    fn maximize(&mut self, window: WindowHandle) {
        self.post(ShellCommand::Maximize { window });
    }

    fn unmaximize(&mut self, window: WindowHandle) {
        self.post(ShellCommand::Unmaximize { window });
    }

    fn minimize(&mut self, window: WindowHandle) {
        self.post(ShellCommand::Minimize { window });
    }

    fn notify(&mut self, title: &str, body: &str) {
        self.post(ShellCommand::Notify { title, body });
    }

    fn create_tray(&mut self, tooltip: &str, items: &[TrayItem]) -> Result<TrayHandle, ShellError> {
        let tray = self.allocate_id();
        self.send(&ShellCommand::CreateTray { tray, tooltip, items })
            .map_err(|e| ShellError::Tray(e.to_string()))?;
        Ok(TrayHandle(tray))
    }

    fn destroy_tray(&mut self, tray: TrayHandle) {
        self.post(ShellCommand::DestroyTray { tray: tray.0 });
    }

    fn quit(&mut self) {
        self.post(ShellCommand::Quit);
    }
}

/// Inbound message, one per line. Intents carry their own `intent` tag:
///
/// ```json
/// {"type":"intent","intent":"change-settings-layout","mode":"horizontal"}
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InboundMessage {
    Intent(Intent),
    WindowEvent { window: WindowHandle, event: WindowEvent },
    TrayClicked { action: TrayAction },
    Display { width: u32, height: u32 },
}

impl From<InboundMessage> for AppEvent {
    fn from(message: InboundMessage) -> Self {
        match message {
            InboundMessage::Intent(intent) => AppEvent::Intent(intent),
            InboundMessage::WindowEvent { window, event } => AppEvent::Window { window, event },
            InboundMessage::TrayClicked { action } => AppEvent::Tray(action),
            InboundMessage::Display { width, height } => AppEvent::Display(Size::new(width, height)),
        }
    }
}

pub fn parse_inbound(line: &str) -> Result<AppEvent, serde_json::Error> {
    serde_json::from_str::<InboundMessage>(line).map(AppEvent::from)
}

/// Forwards every inbound line to the control loop until the input ends,
/// then posts [`AppEvent::Shutdown`]. Malformed lines are logged and skipped.
pub fn pump<R: BufRead>(input: R, events: &EventSender) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                msg_error!(Message::InboundReadFailed(e.to_string()));
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_inbound(&line) {
            Ok(event) => {
                if events.send(event).is_err() {
                    return;
                }
            }
            Err(e) => msg_warning!(Message::InboundParseFailed(e.to_string())),
        }
    }
    msg_info!(Message::InboundStreamClosed);
    let _ = events.send(AppEvent::Shutdown);
}

/// Runs [`pump`] on a dedicated thread, so a blocking read never holds up
/// runtime shutdown.
pub fn spawn_reader<R>(input: R, events: EventSender) -> thread::JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || pump(input, &events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::shell::PersistedWindowState;

    #[test]
    fn parses_window_event_line() {
        let line = r#"{"type":"windowEvent","window":3,"event":{"type":"moved","state":{"bounds":{"x":1,"y":2,"width":300,"height":200}}}}"#;
        let event = parse_inbound(line).unwrap();
        assert_eq!(
            event,
            AppEvent::Window {
                window: WindowHandle(3),
                event: WindowEvent::Moved {
                    state: PersistedWindowState {
                        bounds: Bounds { x: 1, y: 2, width: 300, height: 200 },
                        maximized: false,
                    }
                },
            }
        );
    }

    #[test]
    fn parses_nested_intent_tag() {
        assert_eq!(
            parse_inbound(r#"{"type":"intent","intent":"open-settings"}"#).unwrap(),
            AppEvent::Intent(Intent::OpenSettings)
        );
        assert_eq!(
            parse_inbound(r#"{"type":"trayClicked","action":"exit"}"#).unwrap(),
            AppEvent::Tray(TrayAction::Exit)
        );
    }

    #[test]
    fn failed_write_closes_the_bridge() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::ErrorKind::BrokenPipe.into())
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut shell = StdioShell::new(Broken);
        let options = WindowRole::Loading.default_options();
        assert_eq!(shell.create_window(WindowRole::Loading, &options), Err(ShellError::DisplayUnavailable));
        assert!(shell.closed);
    }
}
