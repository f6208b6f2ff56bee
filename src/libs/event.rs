use crate::libs::schedule::ScheduleConfig;
use crate::libs::shell::{PersistedWindowState, Size, TrayAction, WindowHandle};
use crate::libs::windows::SettingsLayout;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::mpsc;

pub type EventSender = mpsc::UnboundedSender<AppEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<AppEvent>;

/// Creates the channel every event source feeds into the control loop.
pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Identifies one armed timer. Ids are never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// Everything the control loop reacts to, one handler run per event.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Intent(Intent),
    Window { window: WindowHandle, event: WindowEvent },
    Tray(TrayAction),
    /// Primary display work area reported by the shell.
    Display(Size),
    ScheduleTick(TimerId),
    PromptExpired(TimerId),
    Shutdown,
}

/// Window lifecycle events, delivered in emission order per window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WindowEvent {
    Resized { state: PersistedWindowState },
    Moved { state: PersistedWindowState },
    Closed {
        #[serde(default)]
        state: Option<PersistedWindowState>,
    },
    Focused,
    Blurred,
}

/// Intents emitted by the view layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "kebab-case")]
pub enum Intent {
    LoginSuccess {
        #[serde(default, rename = "userId")]
        user_id: Option<String>,
        #[serde(default)]
        settings: Option<ScheduleConfig>,
    },
    Logout,
    OpenSettings,
    ChangeSettingsLayout { mode: SettingsLayout },
    UpdateUserInputSettings { settings: ScheduleConfig },
    CloseWindow,
    MinimizeWindow,
    MaximizeWindow,
    Quit,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::LoginSuccess { .. } => "login-success",
            Intent::Logout => "logout",
            Intent::OpenSettings => "open-settings",
            Intent::ChangeSettingsLayout { .. } => "change-settings-layout",
            Intent::UpdateUserInputSettings { .. } => "update-user-input-settings",
            Intent::CloseWindow => "close-window",
            Intent::MinimizeWindow => "minimize-window",
            Intent::MaximizeWindow => "maximize-window",
            Intent::Quit => "quit",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_view_layer_intents() {
        let intent: Intent = serde_json::from_str(r#"{"intent":"change-settings-layout","mode":"horizontal"}"#).unwrap();
        assert_eq!(intent, Intent::ChangeSettingsLayout { mode: SettingsLayout::Horizontal });

        let intent: Intent = serde_json::from_str(r#"{"intent":"login-success","userId":"u-1"}"#).unwrap();
        assert_eq!(
            intent,
            Intent::LoginSuccess {
                user_id: Some("u-1".into()),
                settings: None
            }
        );
        assert_eq!(intent.to_string(), "login-success");
    }

    #[test]
    fn parses_closed_event_without_state() {
        let event: WindowEvent = serde_json::from_str(r#"{"type":"closed"}"#).unwrap();
        assert_eq!(event, WindowEvent::Closed { state: None });
    }
}
