//! # Notification Side Channel
//!
//! Every storage outcome the user should hear about - "Product added",
//! "Failed to fetch invoices" - flows through this channel instead of a
//! return value, mirroring how the billing screens surface toasts. The
//! services keep working after a failure; the notification is the report.
//!
//! The channel is injected so embedders can route notifications to their
//! toast system; the default [`TracingNotifier`] writes them to the log.

use std::sync::Mutex;

use tracing::{error, info};

// =============================================================================
// Notification
// =============================================================================

/// How loudly the notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Routine confirmation ("Product added").
    Info,
    /// Something failed; the user may want to retry.
    Error,
}

/// A user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub severity: Severity,
}

impl Notification {
    /// A routine confirmation.
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Notification {
            title: title.into(),
            body: body.into(),
            severity: Severity::Info,
        }
    }

    /// A failure report.
    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Notification {
            title: title.into(),
            body: body.into(),
            severity: Severity::Error,
        }
    }
}

// =============================================================================
// Notifier
// =============================================================================

/// Sink for user-facing notifications.
///
/// Implementations must be cheap and non-blocking - services call this
/// inline on their own task.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Default notifier: writes notifications to the tracing log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Info => {
                info!(title = %notification.title, "{}", notification.body);
            }
            Severity::Error => {
                error!(title = %notification.title, "{}", notification.body);
            }
        }
    }
}

/// Buffering notifier that records everything it receives.
///
/// Used by tests to assert on the notification stream; also handy for
/// embedders that drain notifications on their own schedule.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        MemoryNotifier::default()
    }

    /// Drains and returns everything received so far.
    pub fn take(&self) -> Vec<Notification> {
        let mut guard = self
            .notifications
            .lock()
            .expect("notification buffer poisoned");
        std::mem::take(&mut *guard)
    }

    /// Titles received so far, in order, without draining.
    pub fn titles(&self) -> Vec<String> {
        self.notifications
            .lock()
            .expect("notification buffer poisoned")
            .iter()
            .map(|n| n.title.clone())
            .collect()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications
            .lock()
            .expect("notification buffer poisoned")
            .push(notification);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_notifier_records_in_order() {
        let notifier = MemoryNotifier::new();
        notifier.notify(Notification::info("Product added", "Pipe 2in"));
        notifier.notify(Notification::error("Error", "Failed to fetch products"));

        assert_eq!(notifier.titles(), vec!["Product added", "Error"]);

        let drained = notifier.take();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].severity, Severity::Info);
        assert_eq!(drained[1].severity, Severity::Error);
        assert!(notifier.take().is_empty());
    }
}
