//! Prompt scheduling engine.
//!
//! [`ScheduleEngine`] owns two timers and nothing else reaches them:
//!
//! - the **recurring evaluation timer**, a short fixed poll period independent
//!   of the question interval. On every tick the gating predicate of
//!   [`Schedule`] decides whether the prompt window is raised;
//! - the **prompt expiry timer**, armed only while a prompt raised by the
//!   engine is open. It closes the prompt after the configured screen time.
//!
//! Timers are tokio tasks that only post [`AppEvent`]s carrying their
//! [`TimerId`]; the engine acts on them from the control loop. Dropping a
//! [`TimerHandle`] aborts its task, and every handler compares the incoming id
//! with the handle it currently owns, so a tick that was already queued when
//! its timer got cancelled is ignored.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use activity_logger::libs::event;
//! use activity_logger::libs::schedule::ScheduleConfig;
//! use activity_logger::libs::scheduler::{LocalClock, ScheduleEngine, DEFAULT_POLL_INTERVAL};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let (tx, _rx) = event::channel();
//! let mut engine = ScheduleEngine::new(Box::new(LocalClock), tx, DEFAULT_POLL_INTERVAL, "Activity Logger");
//! engine.start(&ScheduleConfig::default())?;
//! # Ok(())
//! # }
//! ```

use crate::libs::event::{AppEvent, EventSender, TimerId};
use crate::libs::messages::Message;
use crate::libs::schedule::{Schedule, ScheduleConfig, ScheduleError};
use crate::libs::windows::{WindowManager, WindowRole};
use crate::{msg_debug, msg_info, msg_warning};
use chrono::{Local, NaiveDateTime};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};

/// Default period of the recurring evaluation timer.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

static NEXT_TIMER_ID: AtomicU64 = AtomicU64::new(1);

/// Source of local wall-clock time for the weekday and time-of-day checks.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// The system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Owned cancel handle of a timer task. Dropping it cancels the timer.
#[derive(Debug)]
pub struct TimerHandle {
    id: TimerId,
    task: JoinHandle<()>,
}

impl TimerHandle {
    fn next_id() -> TimerId {
        TimerId(NEXT_TIMER_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Posts `make(id)` every `period`, starting one period from now.
    fn recurring(events: EventSender, period: Duration, make: fn(TimerId) -> AppEvent) -> Self {
        let id = Self::next_id();
        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if events.send(make(id)).is_err() {
                    break;
                }
            }
        });
        Self { id, task }
    }

    /// Posts `make(id)` once after `delay`.
    fn once(events: EventSender, delay: Duration, make: fn(TimerId) -> AppEvent) -> Self {
        let id = Self::next_id();
        let task = tokio::spawn(async move {
            time::sleep(delay).await;
            let _ = events.send(make(id));
        });
        Self { id, task }
    }

    pub fn id(&self) -> TimerId {
        self.id
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Mutable bookkeeping of a started engine.
#[derive(Debug)]
pub struct ScheduleRuntimeState {
    /// Written only by the engine: on (re)start and whenever a prompt is due.
    last_shown_at: Instant,
    recurring: TimerHandle,
    prompt_expiry: Option<TimerHandle>,
}

pub struct ScheduleEngine {
    clock: Box<dyn Clock>,
    events: EventSender,
    poll_interval: Duration,
    notification_title: String,
    config: Option<(ScheduleConfig, Schedule)>,
    runtime: Option<ScheduleRuntimeState>,
}

impl ScheduleEngine {
    pub fn new(clock: Box<dyn Clock>, events: EventSender, poll_interval: Duration, notification_title: impl Into<String>) -> Self {
        Self {
            clock,
            events,
            poll_interval,
            notification_title: notification_title.into(),
            config: None,
            runtime: None,
        }
    }

    /// Adopts `config`, resets the elapsed-time baseline and (re)starts polling.
    ///
    /// # Errors
    ///
    /// Returns the validation error and leaves the engine untouched when the
    /// config is invalid.
    pub fn start(&mut self, config: &ScheduleConfig) -> Result<(), ScheduleError> {
        let schedule = config.validate().map_err(|e| {
            msg_warning!(Message::ScheduleRejected(e.to_string()));
            e
        })?;
        self.stop();
        self.launch(config.clone(), schedule);
        Ok(())
    }

    /// Cancels both timers and discards the config.
    pub fn stop(&mut self) {
        self.config = None;
        if self.runtime.take().is_some() {
            msg_info!(Message::ScheduleStopped);
        }
    }

    /// Replaces the whole config, as `stop` followed by `start`.
    ///
    /// A prompt already on screen keeps its expiry deadline.
    ///
    /// # Errors
    ///
    /// Invalid configs are rejected and the previous schedule keeps running.
    pub fn reconfigure(&mut self, config: &ScheduleConfig) -> Result<(), ScheduleError> {
        let schedule = config.validate().map_err(|e| {
            msg_warning!(Message::ScheduleRejected(e.to_string()));
            e
        })?;
        let pending_expiry = self.runtime.as_mut().and_then(|runtime| runtime.prompt_expiry.take());
        self.stop();
        self.launch(config.clone(), schedule);
        if let Some(runtime) = self.runtime.as_mut() {
            runtime.prompt_expiry = pending_expiry;
        }
        Ok(())
    }

    fn launch(&mut self, config: ScheduleConfig, schedule: Schedule) {
        msg_info!(Message::ScheduleStarted {
            interval_minutes: config.question_interval,
            poll_interval_ms: self.poll_interval.as_millis(),
        });
        msg_debug!(format!("schedule: {}", schedule));
        self.runtime = Some(ScheduleRuntimeState {
            last_shown_at: Instant::now(),
            recurring: TimerHandle::recurring(self.events.clone(), self.poll_interval, AppEvent::ScheduleTick),
            prompt_expiry: None,
        });
        self.config = Some((config, schedule));
    }

    pub fn is_running(&self) -> bool {
        self.runtime.is_some()
    }

    pub fn config(&self) -> Option<&ScheduleConfig> {
        self.config.as_ref().map(|(config, _)| config)
    }

    pub fn last_shown_at(&self) -> Option<Instant> {
        self.runtime.as_ref().map(|runtime| runtime.last_shown_at)
    }

    pub fn is_prompt_expiry_armed(&self) -> bool {
        self.runtime.as_ref().is_some_and(|runtime| runtime.prompt_expiry.is_some())
    }

    /// Evaluates the gating predicate for a recurring tick.
    pub fn on_tick(&mut self, timer: TimerId, windows: &mut WindowManager) {
        let (Some(runtime), Some((_, schedule))) = (self.runtime.as_mut(), self.config.as_ref()) else {
            msg_debug!(Message::StaleTimerIgnored(timer.0));
            return;
        };
        if runtime.recurring.id() != timer {
            msg_debug!(Message::StaleTimerIgnored(timer.0));
            return;
        }

        let now = Instant::now();
        if !schedule.is_due(self.clock.now(), now.duration_since(runtime.last_shown_at)) {
            return;
        }
        runtime.last_shown_at = now;

        if schedule.notification_mode().is_enabled() {
            windows.shell().notify(&self.notification_title, &Message::InputOpening.to_string());
        }

        if windows.is_open(WindowRole::Prompt) {
            // Still on screen from an earlier tick: bring it back, keep its deadline.
            msg_debug!(Message::PromptAlreadyOpen);
            windows.focus(WindowRole::Prompt);
            return;
        }

        match windows.open_role(WindowRole::Prompt) {
            Ok(_) => {
                runtime.prompt_expiry = Some(TimerHandle::once(self.events.clone(), schedule.screen_time(), AppEvent::PromptExpired));
                msg_info!(Message::PromptRaised);
            }
            Err(e) => msg_warning!(Message::PromptOpenFailed(e.to_string())),
        }
    }

    /// Closes the prompt when its screen time ran out.
    pub fn on_prompt_expired(&mut self, timer: TimerId, windows: &mut WindowManager) {
        let Some(runtime) = self.runtime.as_mut() else {
            msg_debug!(Message::StaleTimerIgnored(timer.0));
            return;
        };
        if runtime.prompt_expiry.as_ref().map(TimerHandle::id) != Some(timer) {
            msg_debug!(Message::StaleTimerIgnored(timer.0));
            return;
        }
        runtime.prompt_expiry = None;

        if !windows.is_open(WindowRole::Prompt) {
            return;
        }
        let notify = self.config.as_ref().is_some_and(|(_, schedule)| schedule.notification_mode().is_enabled());
        if notify {
            windows.shell().notify(&self.notification_title, &Message::InputClosedDueToTimeout.to_string());
        }
        windows.close(WindowRole::Prompt);
        msg_info!(Message::PromptExpired);
    }

    /// Disarms the expiry timer after the prompt closed for any other reason.
    pub fn on_prompt_closed(&mut self) {
        if let Some(runtime) = self.runtime.as_mut() {
            runtime.prompt_expiry = None;
        }
    }
}
