//! User schedule settings and the prompt gating predicate.
//!
//! [`ScheduleConfig`] is the wire form sent by the view layer whenever the user
//! edits their settings (camelCase keys, `HH:MM` strings, lowercase weekday
//! names). It is validated into a [`Schedule`] before the engine adopts it, so
//! a malformed config never replaces a working one.
//!
//! ## Gating predicate
//!
//! A prompt is due when all of the following hold:
//!
//! 1. `weekDays` contains the current local weekday (an empty set disables prompts)
//! 2. `alwaysOn` is set, or the local time of day lies in `[startTime, endTime]`
//!    on the current day (no ranges crossing midnight)
//! 3. at least `questionInterval` minutes have elapsed since the last prompt

use chrono::{Datelike, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationMode {
    #[default]
    Popup,
    Toast,
    Off,
}

impl NotificationMode {
    pub fn is_enabled(self) -> bool {
        self != NotificationMode::Off
    }
}

/// Schedule settings exactly as the view layer sends them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleConfig {
    /// Minutes between prompts.
    pub question_interval: u64,
    pub start_time: String,
    pub end_time: String,
    pub always_on: bool,
    pub week_days: Vec<String>,
    /// Seconds a prompt stays on screen before it is closed automatically.
    pub question_screen_time: u64,
    #[serde(default)]
    pub notification_mode: NotificationMode,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            question_interval: 60,
            start_time: "08:00".to_string(),
            end_time: "22:00".to_string(),
            always_on: true,
            week_days: Vec::new(),
            question_screen_time: 10,
            notification_mode: NotificationMode::Popup,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("question interval must be greater than zero minutes")]
    NonPositiveInterval,
    #[error("question screen time must be greater than zero seconds")]
    NonPositiveScreenTime,
    #[error("malformed time of day '{0}', expected HH:MM")]
    MalformedTime(String),
    #[error("unknown weekday '{0}'")]
    UnknownWeekday(String),
}

impl ScheduleConfig {
    pub fn validate(&self) -> Result<Schedule, ScheduleError> {
        Schedule::try_from(self)
    }
}

/// A validated schedule, ready for evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    interval: Duration,
    start: NaiveTime,
    end: NaiveTime,
    always_on: bool,
    week_days: Vec<Weekday>,
    screen_time: Duration,
    notification_mode: NotificationMode,
}

impl TryFrom<&ScheduleConfig> for Schedule {
    type Error = ScheduleError;

    fn try_from(config: &ScheduleConfig) -> Result<Self, Self::Error> {
        if config.question_interval == 0 {
            return Err(ScheduleError::NonPositiveInterval);
        }
        if config.question_screen_time == 0 {
            return Err(ScheduleError::NonPositiveScreenTime);
        }

        let start = parse_time_of_day(&config.start_time)?;
        let end = parse_time_of_day(&config.end_time)?;

        let mut week_days = Vec::with_capacity(config.week_days.len());
        for name in &config.week_days {
            let day = name.trim().parse::<Weekday>().map_err(|_| ScheduleError::UnknownWeekday(name.clone()))?;
            if !week_days.contains(&day) {
                week_days.push(day);
            }
        }

        Ok(Self {
            interval: Duration::from_secs(config.question_interval.saturating_mul(60)),
            start,
            end,
            always_on: config.always_on,
            week_days,
            screen_time: Duration::from_secs(config.question_screen_time),
            notification_mode: config.notification_mode,
        })
    }
}

fn parse_time_of_day(value: &str) -> Result<NaiveTime, ScheduleError> {
    let malformed = || ScheduleError::MalformedTime(value.to_string());
    let (hours, minutes) = value.trim().split_once(':').ok_or_else(malformed)?;
    if hours.is_empty() || minutes.len() != 2 {
        return Err(malformed());
    }
    let hours: u32 = hours.parse().map_err(|_| malformed())?;
    let minutes: u32 = minutes.parse().map_err(|_| malformed())?;
    NaiveTime::from_hms_opt(hours, minutes, 0).ok_or_else(malformed)
}

impl Schedule {
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn screen_time(&self) -> Duration {
        self.screen_time
    }

    pub fn notification_mode(&self) -> NotificationMode {
        self.notification_mode
    }

    /// Conditions 1 and 2: an active weekday, inside the daily window.
    pub fn is_active_at(&self, now: NaiveDateTime) -> bool {
        if !self.week_days.contains(&now.weekday()) {
            return false;
        }
        if self.always_on {
            return true;
        }
        let time = now.time();
        time >= self.start && time <= self.end
    }

    /// The full gating predicate.
    pub fn is_due(&self, now: NaiveDateTime, since_last_shown: Duration) -> bool {
        self.is_active_at(now) && since_last_shown >= self.interval
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let days: Vec<String> = self.week_days.iter().map(|d| d.to_string()).collect();
        write!(
            f,
            "every {} min, {}, on [{}]",
            self.interval.as_secs() / 60,
            if self.always_on {
                "all day".to_string()
            } else {
                format!("{:02}:{:02}-{:02}:{:02}", self.start.hour(), self.start.minute(), self.end.hour(), self.end.minute())
            },
            days.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn config(week_days: &[&str]) -> ScheduleConfig {
        ScheduleConfig {
            question_interval: 30,
            start_time: "08:00".into(),
            end_time: "22:00".into(),
            always_on: false,
            week_days: week_days.iter().map(|d| d.to_string()).collect(),
            question_screen_time: 10,
            notification_mode: NotificationMode::Popup,
        }
    }

    // 2025-01-15 is a Wednesday.
    fn wednesday_at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap().and_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn rejects_zero_interval_and_screen_time() {
        let mut cfg = config(&["wednesday"]);
        cfg.question_interval = 0;
        assert_eq!(cfg.validate(), Err(ScheduleError::NonPositiveInterval));

        let mut cfg = config(&["wednesday"]);
        cfg.question_screen_time = 0;
        assert_eq!(cfg.validate(), Err(ScheduleError::NonPositiveScreenTime));
    }

    #[test]
    fn rejects_malformed_times() {
        for bad in ["8", "08:0", "25:00", "08:60", "ab:cd", "", "08:00:00"] {
            let mut cfg = config(&["wednesday"]);
            cfg.end_time = bad.into();
            assert_eq!(cfg.validate(), Err(ScheduleError::MalformedTime(bad.into())), "{bad}");
        }
    }

    #[test]
    fn rejects_unknown_weekday() {
        let cfg = config(&["wednesday", "someday"]);
        assert_eq!(cfg.validate(), Err(ScheduleError::UnknownWeekday("someday".into())));
    }

    #[test]
    fn empty_week_days_never_fires() {
        let mut cfg = config(&[]);
        cfg.always_on = true;
        cfg.question_interval = 1;
        let schedule = cfg.validate().unwrap();
        for hour in 0..24 {
            assert!(!schedule.is_due(wednesday_at(hour, 0), Duration::from_secs(86_400)));
        }
    }

    #[test]
    fn time_range_is_inclusive_and_same_day() {
        let schedule = config(&["wednesday"]).validate().unwrap();
        assert!(schedule.is_active_at(wednesday_at(8, 0)));
        assert!(schedule.is_active_at(wednesday_at(12, 0)));
        assert!(schedule.is_active_at(wednesday_at(22, 0)));
        assert!(!schedule.is_active_at(wednesday_at(23, 0)));
        assert!(!schedule.is_active_at(wednesday_at(7, 59)));
    }

    #[test]
    fn other_weekdays_are_inactive() {
        let schedule = config(&["monday", "Tuesday"]).validate().unwrap();
        assert!(!schedule.is_active_at(wednesday_at(12, 0)));
    }

    #[test]
    fn always_on_ignores_time_range() {
        let mut cfg = config(&["wednesday"]);
        cfg.always_on = true;
        let schedule = cfg.validate().unwrap();
        assert!(schedule.is_active_at(wednesday_at(23, 30)));
    }

    #[test]
    fn interval_gate_uses_minutes() {
        let schedule = config(&["wednesday"]).validate().unwrap();
        assert!(!schedule.is_due(wednesday_at(12, 0), Duration::from_secs(29 * 60 + 59)));
        assert!(schedule.is_due(wednesday_at(12, 0), Duration::from_secs(30 * 60)));
    }

    #[test]
    fn parses_view_layer_payload() {
        let json = r#"{
            "questionInterval": 45,
            "startTime": "09:30",
            "endTime": "18:00",
            "alwaysOn": false,
            "weekDays": ["monday", "friday"],
            "questionScreenTime": 20,
            "notificationMode": "off"
        }"#;
        let cfg: ScheduleConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.question_interval, 45);
        assert_eq!(cfg.notification_mode, NotificationMode::Off);
        let schedule = cfg.validate().unwrap();
        assert_eq!(schedule.interval(), Duration::from_secs(45 * 60));
        assert_eq!(schedule.screen_time(), Duration::from_secs(20));
        assert!(!schedule.notification_mode().is_enabled());
    }
}
