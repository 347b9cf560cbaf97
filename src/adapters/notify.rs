use crate::domain::model::{Notification, NotificationKind};
use crate::domain::ports::Notifier;

/// Used when nothing is registered to receive alerts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _notification: &Notification) {}
}

/// Routes alerts into the log stream at a level matching their kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.kind {
            NotificationKind::Error => {
                tracing::error!("🔔 {}: {}", notification.title, notification.message)
            }
            NotificationKind::Warning => {
                tracing::warn!("🔔 {}: {}", notification.title, notification.message)
            }
            NotificationKind::Info | NotificationKind::Success => {
                tracing::info!("🔔 {}: {}", notification.title, notification.message)
            }
        }
    }
}

/// Prints alerts to stderr. A terminal cannot dismiss them, so `duration` is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn format(notification: &Notification) -> String {
        format!("[{}] {}", notification.title, notification.message)
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: &Notification) {
        eprintln!("{}", Self::format(notification));
    }
}
