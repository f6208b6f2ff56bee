//! Singleton-per-role window lifecycle.
//!
//! [`WindowManager`] owns the role → window map. It guarantees that at most one
//! window per [`WindowRole`] is alive, restores and records geometry for
//! persistent roles, and is the only component that ever talks to the shell
//! about windows.
//!
//! ## Lifecycle
//!
//! ```text
//!   open(role) ──▶ already alive? ──yes──▶ focus, return existing handle
//!                        │
//!                        no
//!                        ▼
//!   merge saved geometry (persistent roles) ──▶ create ──▶ maximize if saved
//!                        ──▶ on_ready (navigation) ──▶ track handle
//!
//!   resized / moved ──▶ remember + persist (persistent roles)
//!   closed / close() ──▶ persist last geometry ──▶ forget handle
//! ```
//!
//! Programmatic `close` and a user-initiated close go through the same cleanup
//! path. Every operation on a role without a live window is a silent no-op.

use crate::libs::bounds_store::BoundsStore;
use crate::libs::event::WindowEvent;
use crate::libs::messages::Message;
use crate::libs::shell::{center_in, Bounds, PersistedWindowState, Shell, ShellError, Size, WindowHandle, WindowOptions};
use crate::{msg_debug, msg_info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Work area assumed until the shell reports the primary display.
pub const DEFAULT_WORK_AREA: Size = Size::new(1920, 1080);

/// The fixed purposes a window can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowRole {
    Loading,
    Auth,
    Data,
    Settings,
    Prompt,
}

impl WindowRole {
    pub const ALL: [WindowRole; 5] = [
        WindowRole::Loading,
        WindowRole::Auth,
        WindowRole::Data,
        WindowRole::Settings,
        WindowRole::Prompt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WindowRole::Loading => "loading",
            WindowRole::Auth => "auth",
            WindowRole::Data => "data",
            WindowRole::Settings => "settings",
            WindowRole::Prompt => "prompt",
        }
    }

    /// View route rendered inside the window.
    pub fn route(self) -> &'static str {
        match self {
            WindowRole::Data => "/",
            WindowRole::Settings => "/settings",
            WindowRole::Prompt => "/input",
            WindowRole::Auth => "/auth",
            WindowRole::Loading => "/loading",
        }
    }

    /// Whether geometry survives restarts.
    pub fn is_persistent(self) -> bool {
        matches!(self, WindowRole::Data | WindowRole::Prompt | WindowRole::Auth)
    }

    /// Name of the role's persisted state namespace.
    pub fn storage_key(self) -> &'static str {
        match self {
            WindowRole::Data => "userData",
            WindowRole::Prompt => "userInput",
            WindowRole::Auth => "userAuth",
            WindowRole::Settings => "userSettings",
            WindowRole::Loading => "userLoading",
        }
    }

    pub fn default_options(self) -> WindowOptions {
        match self {
            WindowRole::Data => WindowOptions::new(1000, 800).min_size(491, 300),
            WindowRole::Settings => {
                let size = SettingsLayout::Vertical.size();
                WindowOptions::new(size.width, size.height).fixed_size()
            }
            WindowRole::Prompt => WindowOptions::new(286, 214).min_size(208, 214).max_size(286, 214).not_maximizable(),
            WindowRole::Auth => WindowOptions::new(310, 193).min_size(193, 193).max_size(310, 193),
            WindowRole::Loading => WindowOptions::new(250, 200).fixed_size(),
        }
    }
}

impl fmt::Display for WindowRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two fixed layouts of the settings window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingsLayout {
    Horizontal,
    Vertical,
}

impl SettingsLayout {
    pub fn size(self) -> Size {
        match self {
            SettingsLayout::Horizontal => Size::new(1000, 439),
            SettingsLayout::Vertical => Size::new(700, 697),
        }
    }
}

impl fmt::Display for SettingsLayout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SettingsLayout::Horizontal => f.write_str("horizontal"),
            SettingsLayout::Vertical => f.write_str("vertical"),
        }
    }
}

#[derive(Debug)]
struct LiveWindow {
    handle: WindowHandle,
    // Latest geometry seen for the window, if any is known yet.
    last_state: Option<PersistedWindowState>,
    maximized: bool,
}

pub struct WindowManager {
    shell: Box<dyn Shell>,
    store: Box<dyn BoundsStore>,
    live: HashMap<WindowRole, LiveWindow>,
    focused: Option<WindowHandle>,
    work_area: Size,
}

impl WindowManager {
    pub fn new(shell: Box<dyn Shell>, store: Box<dyn BoundsStore>) -> Self {
        Self {
            shell,
            store,
            live: HashMap::new(),
            focused: None,
            work_area: DEFAULT_WORK_AREA,
        }
    }

    /// Opens the window for `role`, or brings the existing one to front.
    ///
    /// For persistent roles, saved geometry is merged into `options` as
    /// initial geometry (clamped to the role's constraints) and a saved
    /// maximized state is restored. `on_ready` runs once, right after
    /// creation, and is where the caller performs first-time navigation.
    ///
    /// # Errors
    ///
    /// Returns the shell's error when no window can be created.
    pub fn open<F>(&mut self, role: WindowRole, options: WindowOptions, on_ready: F) -> Result<WindowHandle, ShellError>
    where
        F: FnOnce(&mut dyn Shell, WindowHandle),
    {
        if let Some(live) = self.live.get(&role) {
            let handle = live.handle;
            self.shell.focus_window(handle);
            msg_debug!(Message::WindowFocused(role.to_string()));
            return Ok(handle);
        }

        let saved = if role.is_persistent() { self.store.get(role) } else { None };
        let options = match &saved {
            Some(state) => {
                msg_debug!(Message::BoundsRestored(role.to_string()));
                options.with_restored(state)
            }
            None => options,
        };

        let handle = self.shell.create_window(role, &options)?;

        let maximized = options.maximizable && saved.is_some_and(|state| state.maximized);
        if maximized {
            self.shell.maximize(handle);
        }

        on_ready(self.shell.as_mut(), handle);

        let last_state = match (options.x, options.y) {
            (Some(x), Some(y)) => Some(PersistedWindowState {
                bounds: Bounds {
                    x,
                    y,
                    width: options.width,
                    height: options.height,
                },
                maximized,
            }),
            _ => None,
        };
        self.live.insert(role, LiveWindow { handle, last_state, maximized });
        msg_info!(Message::WindowOpened(role.to_string()));
        Ok(handle)
    }

    /// Opens `role` with its default options and navigates it to its route.
    pub fn open_role(&mut self, role: WindowRole) -> Result<WindowHandle, ShellError> {
        self.open(role, role.default_options(), move |shell, handle| shell.navigate(handle, role.route()))
    }

    pub fn close(&mut self, role: WindowRole) {
        let Some(handle) = self.live.get(&role).map(|live| live.handle) else {
            return;
        };
        self.shell.close_window(handle);
        self.forget(role, None);
    }

    pub fn is_open(&self, role: WindowRole) -> bool {
        self.live.contains_key(&role)
    }

    pub fn focus(&mut self, role: WindowRole) {
        if let Some(live) = self.live.get(&role) {
            self.shell.focus_window(live.handle);
        }
    }

    /// Moves/resizes the window of `role`, if open.
    pub fn set_bounds(&mut self, role: WindowRole, bounds: Bounds) {
        if let Some(live) = self.live.get(&role) {
            self.shell.set_bounds(live.handle, bounds);
        }
    }

    /// Resizes the settings window to `layout`, centered on the primary display.
    pub fn apply_settings_layout(&mut self, layout: SettingsLayout) {
        if !self.is_open(WindowRole::Settings) {
            return;
        }
        let bounds = center_in(self.work_area, layout.size());
        self.set_bounds(WindowRole::Settings, bounds);
        msg_debug!(Message::SettingsLayoutChanged(layout.to_string()));
    }

    pub fn open_roles(&self) -> Vec<WindowRole> {
        WindowRole::ALL.into_iter().filter(|role| self.is_open(*role)).collect()
    }

    pub fn role_of(&self, handle: WindowHandle) -> Option<WindowRole> {
        self.live.iter().find(|(_, live)| live.handle == handle).map(|(role, _)| *role)
    }

    pub fn work_area(&self) -> Size {
        self.work_area
    }

    pub fn set_work_area(&mut self, work_area: Size) {
        self.work_area = work_area;
    }

    /// Shell access for capabilities that are not window-scoped.
    pub fn shell(&mut self) -> &mut dyn Shell {
        self.shell.as_mut()
    }

    /// Applies a window event. Returns the role whose window just closed, if any.
    pub fn handle_event(&mut self, handle: WindowHandle, event: &WindowEvent) -> Option<WindowRole> {
        match event {
            WindowEvent::Focused => {
                self.focused = Some(handle);
                None
            }
            WindowEvent::Blurred => {
                if self.focused == Some(handle) {
                    self.focused = None;
                }
                None
            }
            WindowEvent::Resized { state } | WindowEvent::Moved { state } => {
                let Some(role) = self.role_of(handle) else {
                    msg_debug!(Message::WindowEventForUnknownHandle(handle.0));
                    return None;
                };
                if let Some(live) = self.live.get_mut(&role) {
                    live.last_state = Some(*state);
                    live.maximized = state.maximized;
                }
                if role.is_persistent() {
                    self.store.set(role, state);
                }
                None
            }
            WindowEvent::Closed { state } => {
                if self.focused == Some(handle) {
                    self.focused = None;
                }
                let Some(role) = self.role_of(handle) else {
                    msg_debug!(Message::WindowEventForUnknownHandle(handle.0));
                    return None;
                };
                self.forget(role, *state);
                Some(role)
            }
        }
    }

    pub fn close_focused(&mut self) {
        let Some(handle) = self.focused else {
            msg_debug!(Message::NoFocusedWindow);
            return;
        };
        match self.role_of(handle) {
            Some(role) => self.close(role),
            None => self.shell.close_window(handle),
        }
    }

    pub fn minimize_focused(&mut self) {
        match self.focused {
            Some(handle) => self.shell.minimize(handle),
            None => msg_debug!(Message::NoFocusedWindow),
        }
    }

    /// Maximizes the focused window, or restores it when already maximized.
    pub fn toggle_maximize_focused(&mut self) {
        let Some(handle) = self.focused else {
            msg_debug!(Message::NoFocusedWindow);
            return;
        };
        let Some(live) = self.live.values_mut().find(|live| live.handle == handle) else {
            self.shell.maximize(handle);
            return;
        };
        if live.maximized {
            self.shell.unmaximize(handle);
        } else {
            self.shell.maximize(handle);
        }
        live.maximized = !live.maximized;
        if let Some(state) = live.last_state.as_mut() {
            state.maximized = live.maximized;
        }
    }

    // Single cleanup path for programmatic and user-initiated closes.
    fn forget(&mut self, role: WindowRole, state: Option<PersistedWindowState>) {
        let Some(live) = self.live.remove(&role) else {
            return;
        };
        if self.focused == Some(live.handle) {
            self.focused = None;
        }
        if role.is_persistent() {
            match state.or(live.last_state) {
                Some(state) => self.store.set(role, &state),
                None => msg_debug!(format!("no geometry known for {}, nothing to save", role)),
            }
        }
        msg_info!(Message::WindowClosed(role.to_string()));
    }
}
