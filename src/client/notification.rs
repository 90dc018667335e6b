use std::{collections::VecDeque, fmt};

use chrono::{DateTime, Duration, Utc};

/// How long a notification stays visible.
pub const NOTIFICATION_TTL_SECS: i64 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl Notification {
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.raised_at + Duration::seconds(NOTIFICATION_TTL_SECS)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// Transient messages, oldest first.
#[derive(Debug, Default)]
pub struct Notifications {
    queue: VecDeque<Notification>,
}

impl Notifications {
    pub fn push(&mut self, severity: Severity, message: impl Into<String>, now: DateTime<Utc>) {
        let notification = Notification {
            severity,
            message: message.into(),
            raised_at: now,
        };
        match severity {
            Severity::Error => tracing::warn!(message = %notification.message, "notification"),
            _ => tracing::debug!(%severity, message = %notification.message, "notification"),
        }
        self.queue.push_back(notification);
    }

    /// Everything still visible at `now`.
    pub fn active(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Notification> {
        self.queue.iter().filter(move |n| !n.is_expired(now))
    }

    /// Drop expired notifications. Returns how many were dismissed.
    pub fn prune(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.queue.len();
        self.queue.retain(|n| !n.is_expired(now));
        before - self.queue.len()
    }

    /// Hand every queued notification to the caller, expired or not.
    pub fn drain(&mut self) -> impl Iterator<Item = Notification> + '_ {
        self.queue.drain(..)
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.queue.back()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.queue.iter()
    }
}
