//! Shell capabilities the core drives: windows, notifications and the tray.
//!
//! The [`Shell`] trait is the only place where the core touches a display
//! surface. Every call is fire-and-forget except window and tray creation,
//! which can fail when no display surface is available. Geometry flows back
//! into the core as [`WindowEvent`](crate::libs::event::WindowEvent)s through
//! the control loop, never through return values.
//!
//! Two implementations exist: the line-delimited JSON bridge used by the
//! binary ([`StdioShell`](crate::libs::stdio_shell::StdioShell)) and the
//! recording fake used by the integration tests.

use crate::libs::windows::WindowRole;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures a shell can report. Only window creation surfaces them to callers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShellError {
    #[error("no display surface is available")]
    DisplayUnavailable,
    #[error("window '{role}' could not be created: {reason}")]
    WindowCreation { role: WindowRole, reason: String },
    #[error("tray icon could not be created: {0}")]
    Tray(String),
}

/// Opaque reference to a live window.
///
/// Handles are plain ids: a handle kept past the window's close is inert,
/// since every operation resolves it through the window manager's role map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowHandle(pub u64);

/// Handle of the tray icon. Not `Clone`: destroying the tray consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct TrayHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Geometry snapshot of a window: its normal bounds and whether it is maximized.
///
/// When the window is maximized, `bounds` holds the restored (normal) bounds so
/// that un-maximizing after a restart lands where the user left it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedWindowState {
    pub bounds: Bounds,
    #[serde(default)]
    pub maximized: bool,
}

/// Creation options for a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowOptions {
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_size: Option<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<Size>,
    pub resizable: bool,
    pub maximizable: bool,
    pub frame: bool,
    pub transparent: bool,
    pub auto_hide_menu_bar: bool,
}

impl WindowOptions {
    /// Frameless, transparent, resizable window of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            x: None,
            y: None,
            min_size: None,
            max_size: None,
            resizable: true,
            maximizable: true,
            frame: false,
            transparent: true,
            auto_hide_menu_bar: true,
        }
    }

    pub fn min_size(mut self, width: u32, height: u32) -> Self {
        self.min_size = Some(Size::new(width, height));
        self
    }

    pub fn max_size(mut self, width: u32, height: u32) -> Self {
        self.max_size = Some(Size::new(width, height));
        self
    }

    pub fn fixed_size(mut self) -> Self {
        self.resizable = false;
        self
    }

    pub fn not_maximizable(mut self) -> Self {
        self.maximizable = false;
        self
    }

    /// Applies saved geometry as initial geometry.
    ///
    /// Saved width/height replace the defaults but are clamped into the
    /// min/max constraints; a zero dimension keeps the default.
    pub fn with_restored(mut self, state: &PersistedWindowState) -> Self {
        let bounds = state.bounds;
        if bounds.width > 0 {
            self.width = clamp_dimension(bounds.width, self.min_size.map(|s| s.width), self.max_size.map(|s| s.width));
        }
        if bounds.height > 0 {
            self.height = clamp_dimension(bounds.height, self.min_size.map(|s| s.height), self.max_size.map(|s| s.height));
        }
        self.x = Some(bounds.x);
        self.y = Some(bounds.y);
        self
    }
}

fn clamp_dimension(value: u32, min: Option<u32>, max: Option<u32>) -> u32 {
    let value = min.map_or(value, |min| value.max(min));
    max.map_or(value, |max| value.min(max))
}

/// Bounds of a `size` rectangle centered in a work area anchored at the origin.
pub fn center_in(work_area: Size, size: Size) -> Bounds {
    let x = (i64::from(work_area.width) - i64::from(size.width)).div_euclid(2);
    let y = (i64::from(work_area.height) - i64::from(size.height)).div_euclid(2);
    Bounds {
        x: x as i32,
        y: y as i32,
        width: size.width,
        height: size.height,
    }
}

/// Action bound to a tray menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrayAction {
    Interface,
    Settings,
    Logout,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrayItem {
    pub label: String,
    pub action: TrayAction,
}

/// Display-surface capabilities consumed by the core.
pub trait Shell {
    /// Creates a window. Failure means the display surface cannot host it.
    fn create_window(&mut self, role: WindowRole, options: &WindowOptions) -> Result<WindowHandle, ShellError>;
    /// Points a freshly created window at a view route.
    fn navigate(&mut self, window: WindowHandle, route: &str);
    fn close_window(&mut self, window: WindowHandle);
    fn focus_window(&mut self, window: WindowHandle);
    fn set_bounds(&mut self, window: WindowHandle, bounds: Bounds);
    fn maximize(&mut self, window: WindowHandle);
    fn unmaximize(&mut self, window: WindowHandle);
    fn minimize(&mut self, window: WindowHandle);
    fn notify(&mut self, title: &str, body: &str);
    fn create_tray(&mut self, tooltip: &str, items: &[TrayItem]) -> Result<TrayHandle, ShellError>;
    fn destroy_tray(&mut self, tray: TrayHandle);
    /// Asks the shell process to terminate.
    fn quit(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restored_bounds_override_defaults() {
        let state = PersistedWindowState {
            bounds: Bounds { x: 40, y: 60, width: 640, height: 480 },
            maximized: false,
        };
        let options = WindowOptions::new(1000, 800).min_size(491, 300).with_restored(&state);
        assert_eq!((options.width, options.height), (640, 480));
        assert_eq!((options.x, options.y), (Some(40), Some(60)));
    }

    #[test]
    fn restored_bounds_respect_constraints() {
        let state = PersistedWindowState {
            bounds: Bounds { x: 0, y: 0, width: 900, height: 100 },
            maximized: false,
        };
        let options = WindowOptions::new(286, 214).min_size(208, 214).max_size(286, 214).with_restored(&state);
        assert_eq!((options.width, options.height), (286, 214));
    }

    #[test]
    fn zero_dimensions_keep_defaults() {
        let state = PersistedWindowState {
            bounds: Bounds { x: 5, y: 5, width: 0, height: 0 },
            maximized: true,
        };
        let options = WindowOptions::new(310, 193).with_restored(&state);
        assert_eq!((options.width, options.height), (310, 193));
    }

    #[test]
    fn centers_in_work_area() {
        let bounds = center_in(Size::new(1920, 1040), Size::new(1000, 439));
        assert_eq!(bounds, Bounds { x: 460, y: 300, width: 1000, height: 439 });
    }

    #[test]
    fn centering_larger_than_area_floors_negative() {
        let bounds = center_in(Size::new(800, 600), Size::new(1001, 697));
        assert_eq!((bounds.x, bounds.y), (-101, -49));
    }
}
