use std::time::Duration;

use crate::Effect;

/// How long a notification stays visible.
pub const NOTIFICATION_LIFETIME: Duration = Duration::from_secs(4);

pub type NotificationId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
}

/// Holds the single visible notification. Newest replaces oldest.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationCenter {
    current: Option<Notification>,
    last_id: NotificationId,
}

impl NotificationCenter {
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Shows `message`, preempting whatever is visible, and returns the effect
    /// that schedules its expiry.
    pub(crate) fn notify(&mut self, message: impl Into<String>, severity: Severity) -> Effect {
        self.last_id += 1;
        let id = self.last_id;
        self.current = Some(Notification {
            id,
            message: message.into(),
            severity,
        });
        Effect::ExpireNotification {
            id,
            after: NOTIFICATION_LIFETIME,
        }
    }

    /// Clears the visible notification if it is still `id`. Timers of
    /// preempted notifications are ignored.
    pub(crate) fn expire(&mut self, id: NotificationId) -> bool {
        match &self.current {
            Some(current) if current.id == id => {
                self.current = None;
                true
            }
            _ => false,
        }
    }
}
