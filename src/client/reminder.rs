//! The due-soon scan: once at startup, then hourly.

use chrono::{DateTime, Duration, Utc};
use tokio::time::{interval, Interval, MissedTickBehavior};

use crate::task::Task;

pub const REMINDER_WINDOW_HOURS: i64 = 24;
pub const REMINDER_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60 * 60);

/// Open tasks due in `(now, now + 24h]`. Every scan reports them again;
/// nothing remembers what was already announced.
pub fn due_soon(tasks: &[Task], now: DateTime<Utc>) -> Vec<&Task> {
    let window = Duration::hours(REMINDER_WINDOW_HOURS);
    tasks.iter().filter(|t| t.is_due_within(now, window)).collect()
}

pub fn reminder_message(task: &Task) -> String {
    format!("Reminder: Task \"{}\" is due soon!", task.text)
}

/// Ticks immediately, then every `period`.
pub fn reminder_ticker(period: std::time::Duration) -> Interval {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}
