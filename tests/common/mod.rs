#![allow(dead_code)]

use activity_logger::libs::bounds_store::BoundsStore;
use activity_logger::libs::event::{self, AppEvent, EventReceiver, EventSender};
use activity_logger::libs::schedule::{NotificationMode, ScheduleConfig};
use activity_logger::libs::scheduler::{Clock, ScheduleEngine};
use activity_logger::libs::session::SessionCoordinator;
use activity_logger::libs::shell::{Bounds, PersistedWindowState, Shell, ShellError, TrayHandle, TrayItem, WindowHandle, WindowOptions};
use activity_logger::libs::windows::{WindowManager, WindowRole};
use chrono::{NaiveDate, NaiveDateTime};
use parking_lot::{Mutex, MutexGuard};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time;

/// Everything the core asked the shell to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create {
        window: WindowHandle,
        role: WindowRole,
        options: WindowOptions,
    },
    Navigate(WindowHandle, String),
    Close(WindowHandle),
    Focus(WindowHandle),
    SetBounds(WindowHandle, Bounds),
    Maximize(WindowHandle),
    Unmaximize(WindowHandle),
    Minimize(WindowHandle),
    Notify { title: String, body: String },
    CreateTray { tooltip: String, labels: Vec<String> },
    DestroyTray(u64),
    Quit,
}

#[derive(Debug, Default)]
pub struct ShellState {
    pub calls: Vec<Call>,
    pub fail_create: bool,
    next_id: u64,
    live: HashMap<WindowHandle, WindowRole>,
    trays: Vec<u64>,
}

/// Recording [`Shell`]. Clones share state, so a test keeps one clone and
/// hands the other to the window manager.
#[derive(Debug, Clone, Default)]
pub struct FakeShell {
    state: Arc<Mutex<ShellState>>,
}

impl FakeShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, ShellState> {
        self.state.lock()
    }

    pub fn set_fail_create(&self, fail: bool) {
        self.state.lock().fail_create = fail;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    /// Roles with a window the shell still considers alive.
    pub fn live_roles(&self) -> Vec<WindowRole> {
        let mut roles: Vec<_> = self.state.lock().live.values().copied().collect();
        roles.sort_by_key(|role| role.as_str());
        roles
    }

    pub fn live_handle(&self, role: WindowRole) -> Option<WindowHandle> {
        self.state.lock().live.iter().find(|(_, r)| **r == role).map(|(handle, _)| *handle)
    }

    pub fn created(&self, role: WindowRole) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| matches!(call, Call::Create { role: r, .. } if *r == role))
            .count()
    }

    pub fn last_options(&self, role: WindowRole) -> Option<WindowOptions> {
        self.state.lock().calls.iter().rev().find_map(|call| match call {
            Call::Create { role: r, options, .. } if *r == role => Some(options.clone()),
            _ => None,
        })
    }

    pub fn notifications(&self) -> Vec<String> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Notify { body, .. } => Some(body.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn live_trays(&self) -> usize {
        self.state.lock().trays.len()
    }
}

impl Shell for FakeShell {
    fn create_window(&mut self, role: WindowRole, options: &WindowOptions) -> Result<WindowHandle, ShellError> {
        let mut state = self.state.lock();
        if state.fail_create {
            return Err(ShellError::DisplayUnavailable);
        }
        state.next_id += 1;
        let window = WindowHandle(state.next_id);
        state.live.insert(window, role);
        state.calls.push(Call::Create {
            window,
            role,
            options: options.clone(),
        });
        Ok(window)
    }

    fn navigate(&mut self, window: WindowHandle, route: &str) {
        self.state.lock().calls.push(Call::Navigate(window, route.to_string()));
    }

    fn close_window(&mut self, window: WindowHandle) {
        let mut state = self.state.lock();
        state.live.remove(&window);
        state.calls.push(Call::Close(window));
    }

    fn focus_window(&mut self, window: WindowHandle) {
        self.state.lock().calls.push(Call::Focus(window));
    }

    fn set_bounds(&mut self, window: WindowHandle, bounds: Bounds) {
        self.state.lock().calls.push(Call::SetBounds(window, bounds));
    }

    fn maximize(&mut self, window: WindowHandle) {
        self.state.lock().calls.push(Call::Maximize(window));
    }

    fn unmaximize(&mut self, window: WindowHandle) {
        self.state.lock().calls.push(Call::Unmaximize(window));
    }

    fn minimize(&mut self, window: WindowHandle) {
        self.state.lock().calls.push(Call::Minimize(window));
    }

    fn notify(&mut self, title: &str, body: &str) {
        self.state.lock().calls.push(Call::Notify {
            title: title.to_string(),
            body: body.to_string(),
        });
    }

    fn create_tray(&mut self, tooltip: &str, items: &[TrayItem]) -> Result<TrayHandle, ShellError> {
        let mut state = self.state.lock();
        state.next_id += 1;
        let id = state.next_id;
        state.trays.push(id);
        state.calls.push(Call::CreateTray {
            tooltip: tooltip.to_string(),
            labels: items.iter().map(|item| item.label.clone()).collect(),
        });
        Ok(TrayHandle(id))
    }

    fn destroy_tray(&mut self, tray: TrayHandle) {
        let mut state = self.state.lock();
        state.trays.retain(|id| *id != tray.0);
        state.calls.push(Call::DestroyTray(tray.0));
    }

    fn quit(&mut self) {
        self.state.lock().calls.push(Call::Quit);
    }
}

/// In-memory [`BoundsStore`] shared between clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryBoundsStore {
    saved: Arc<Mutex<HashMap<WindowRole, PersistedWindowState>>>,
}

impl MemoryBoundsStore {
    pub fn saved(&self, role: WindowRole) -> Option<PersistedWindowState> {
        self.saved.lock().get(&role).copied()
    }
}

impl BoundsStore for MemoryBoundsStore {
    fn get(&self, role: WindowRole) -> Option<PersistedWindowState> {
        self.saved(role)
    }

    fn set(&mut self, role: WindowRole, state: &PersistedWindowState) {
        self.saved.lock().insert(role, *state);
    }
}

/// Wall clock pinned by the test.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<NaiveDateTime>>,
}

impl FixedClock {
    pub fn at(now: NaiveDateTime) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock() = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock()
    }
}

/// 2025-01-15 is a Wednesday.
pub fn wednesday_at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap().and_hms_opt(hour, minute, 0).unwrap()
}

/// Every minute on Wednesdays between 08:00 and 22:00, prompts stay 10 s.
pub fn every_minute_on_wednesday() -> ScheduleConfig {
    ScheduleConfig {
        question_interval: 1,
        start_time: "08:00".into(),
        end_time: "22:00".into(),
        always_on: false,
        week_days: vec!["wednesday".into()],
        question_screen_time: 10,
        notification_mode: NotificationMode::Popup,
    }
}

pub const POLL: Duration = Duration::from_secs(1);

pub fn window_manager(shell: &FakeShell, store: &MemoryBoundsStore) -> WindowManager {
    WindowManager::new(Box::new(shell.clone()), Box::new(store.clone()))
}

pub fn engine(clock: &FixedClock, events: EventSender) -> ScheduleEngine {
    ScheduleEngine::new(Box::new(clock.clone()), events, POLL, "Activity Logger")
}

/// A coordinator wired to fakes, plus handles to inspect them.
pub struct Harness {
    pub shell: FakeShell,
    pub store: MemoryBoundsStore,
    pub clock: FixedClock,
    pub coordinator: SessionCoordinator,
    pub events: EventSender,
    pub rx: EventReceiver,
}

impl Harness {
    pub fn new() -> Self {
        let shell = FakeShell::new();
        let store = MemoryBoundsStore::default();
        let clock = FixedClock::at(wednesday_at(12, 0));
        let (events, rx) = event::channel();
        let coordinator = SessionCoordinator::new(window_manager(&shell, &store), engine(&clock, events.clone()));
        Self {
            shell,
            store,
            clock,
            coordinator,
            events,
            rx,
        }
    }

    /// Handles queued and timer-generated events for `duration` of (paused) time.
    pub async fn run_for(&mut self, duration: Duration) {
        let coordinator = &mut self.coordinator;
        drive_for(&mut self.rx, duration, |event| {
            let _ = coordinator.handle(event);
        })
        .await;
    }
}

/// Feeds events to `handle` until `duration` has elapsed.
pub async fn drive_for<F: FnMut(AppEvent)>(rx: &mut EventReceiver, duration: Duration, mut handle: F) {
    let deadline = time::Instant::now() + duration;
    loop {
        tokio::select! {
            biased;
            event = rx.recv() => match event {
                Some(event) => handle(event),
                None => break,
            },
            _ = time::sleep_until(deadline) => break,
        }
    }
}
