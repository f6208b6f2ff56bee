//! Session state machine.
//!
//! [`SessionCoordinator`] decides which windows, tray and schedule exist:
//!
//! ```text
//!            login-success                      logout
//!  Loading ───────────────▶ Authenticated ───────────────▶ Unauthenticated
//!     │                         ▲                                 │
//!     │ logout                  └──────── login-success ──────────┘
//!     └──────────────▶ Unauthenticated
//! ```
//!
//! Entering `Authenticated` closes the splash and auth windows, opens the data
//! window, creates the tray and starts the schedule. Leaving it stops the
//! schedule, closes every window, destroys the tray and shows the auth window.
//! Signals that make no sense in the current state are logged and ignored.

use crate::libs::data_storage::APP_DISPLAY_NAME;
use crate::libs::event::{AppEvent, Intent};
use crate::libs::messages::Message;
use crate::libs::schedule::ScheduleConfig;
use crate::libs::scheduler::ScheduleEngine;
use crate::libs::shell::{ShellError, TrayAction, TrayHandle, TrayItem};
use crate::libs::windows::{SettingsLayout, WindowManager, WindowRole};
use crate::{msg_debug, msg_error, msg_info, msg_warning};
use std::fmt;
use std::ops::ControlFlow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Unauthenticated,
    Authenticated,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SessionState::Loading => f.write_str("loading"),
            SessionState::Unauthenticated => f.write_str("logged out"),
            SessionState::Authenticated => f.write_str("logged in"),
        }
    }
}

pub struct SessionCoordinator {
    state: SessionState,
    windows: WindowManager,
    schedule: ScheduleEngine,
    tray: Option<TrayHandle>,
}

impl SessionCoordinator {
    pub fn new(windows: WindowManager, schedule: ScheduleEngine) -> Self {
        Self {
            state: SessionState::Loading,
            windows,
            schedule,
            tray: None,
        }
    }

    /// Shows the loading window.
    ///
    /// # Errors
    ///
    /// Fails when the shell has no display surface to create it on.
    pub fn start(&mut self) -> Result<(), ShellError> {
        msg_info!(Message::SessionLoading);
        self.windows.open_role(WindowRole::Loading)?;
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn windows(&self) -> &WindowManager {
        &self.windows
    }

    pub fn schedule(&self) -> &ScheduleEngine {
        &self.schedule
    }

    pub fn has_tray(&self) -> bool {
        self.tray.is_some()
    }

    /// Runs one event to completion. `Break` asks the control loop to exit.
    pub fn handle(&mut self, event: AppEvent) -> ControlFlow<()> {
        match event {
            AppEvent::Intent(intent) => return self.handle_intent(intent),
            AppEvent::Window { window, event } => {
                if self.windows.handle_event(window, &event) == Some(WindowRole::Prompt) {
                    self.schedule.on_prompt_closed();
                }
            }
            AppEvent::Tray(action) => return self.handle_tray(action),
            AppEvent::Display(work_area) => self.windows.set_work_area(work_area),
            AppEvent::ScheduleTick(timer) => self.schedule.on_tick(timer, &mut self.windows),
            AppEvent::PromptExpired(timer) => self.schedule.on_prompt_expired(timer, &mut self.windows),
            AppEvent::Shutdown => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    fn handle_intent(&mut self, intent: Intent) -> ControlFlow<()> {
        match (self.state, intent) {
            (SessionState::Loading | SessionState::Unauthenticated, Intent::LoginSuccess { user_id, settings }) => {
                self.login(user_id.unwrap_or_default(), settings);
            }
            (SessionState::Loading | SessionState::Authenticated, Intent::Logout) => self.logout(),
            (SessionState::Authenticated, Intent::OpenSettings) => self.open_settings(),
            (SessionState::Authenticated, Intent::ChangeSettingsLayout { mode }) => self.change_settings_layout(mode),
            (SessionState::Authenticated, Intent::UpdateUserInputSettings { settings }) => self.update_settings(&settings),
            (_, Intent::CloseWindow) => {
                self.windows.close_focused();
                if !self.windows.is_open(WindowRole::Prompt) {
                    self.schedule.on_prompt_closed();
                }
            }
            (_, Intent::MinimizeWindow) => self.windows.minimize_focused(),
            (_, Intent::MaximizeWindow) => self.windows.toggle_maximize_focused(),
            (_, Intent::Quit) => return ControlFlow::Break(()),
            (state, intent) => msg_debug!(Message::SessionIntentIgnored {
                intent: intent.to_string(),
                state: state.to_string(),
            }),
        }
        ControlFlow::Continue(())
    }

    fn handle_tray(&mut self, action: TrayAction) -> ControlFlow<()> {
        if self.state != SessionState::Authenticated {
            msg_debug!(Message::SessionIntentIgnored {
                intent: format!("tray {:?}", action),
                state: self.state.to_string(),
            });
            return ControlFlow::Continue(());
        }
        match action {
            TrayAction::Interface => self.open_or_log(WindowRole::Data),
            TrayAction::Settings => self.open_settings(),
            TrayAction::Logout => self.logout(),
            TrayAction::Exit => {
                msg_info!(Message::SessionExitRequested);
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    fn login(&mut self, user_id: String, settings: Option<ScheduleConfig>) {
        self.windows.close(WindowRole::Loading);
        self.windows.close(WindowRole::Auth);
        self.open_or_log(WindowRole::Data);
        self.create_tray();

        self.schedule.stop();
        let started = settings.is_some_and(|settings| self.schedule.start(&settings).is_ok());
        if !started {
            msg_info!(Message::SessionScheduleIdle);
        }

        self.state = SessionState::Authenticated;
        msg_info!(Message::SessionAuthenticated(user_id));
    }

    fn logout(&mut self) {
        self.schedule.stop();
        for role in [
            WindowRole::Data,
            WindowRole::Settings,
            WindowRole::Prompt,
            WindowRole::Loading,
            WindowRole::Auth,
        ] {
            self.windows.close(role);
        }
        self.destroy_tray();
        self.state = SessionState::Unauthenticated;
        self.open_or_log(WindowRole::Auth);
        msg_info!(Message::SessionUnauthenticated);
    }

    fn open_settings(&mut self) {
        self.open_or_log(WindowRole::Settings);
    }

    fn change_settings_layout(&mut self, layout: SettingsLayout) {
        self.windows.apply_settings_layout(layout);
    }

    fn update_settings(&mut self, settings: &ScheduleConfig) {
        // A rejected config keeps the running schedule; the engine logs why.
        let _ = self.schedule.reconfigure(settings);
    }

    fn open_or_log(&mut self, role: WindowRole) {
        if let Err(e) = self.windows.open_role(role) {
            msg_error!(Message::WindowOpenFailed(role.to_string(), e.to_string()));
        }
    }

    fn create_tray(&mut self) {
        if self.tray.is_some() {
            return;
        }
        let items = [
            (Message::TrayInterface, TrayAction::Interface),
            (Message::TraySettings, TrayAction::Settings),
            (Message::TrayLogout, TrayAction::Logout),
            (Message::TrayExit, TrayAction::Exit),
        ]
        .map(|(label, action)| TrayItem {
            label: label.to_string(),
            action,
        });
        match self.windows.shell().create_tray(APP_DISPLAY_NAME, &items) {
            Ok(tray) => self.tray = Some(tray),
            Err(e) => msg_warning!(Message::TrayCreateFailed(e.to_string())),
        }
    }

    fn destroy_tray(&mut self) {
        if let Some(tray) = self.tray.take() {
            self.windows.shell().destroy_tray(tray);
        }
    }

    /// Stops the schedule, releases the tray and closes every window.
    pub fn shutdown(&mut self) {
        self.schedule.stop();
        self.destroy_tray();
        for role in WindowRole::ALL {
            self.windows.close(role);
        }
        self.windows.shell().quit();
    }
}
