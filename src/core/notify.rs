//! Supervisor readiness and status notifications.

use sd_notify::NotifyState;

/// Fire-and-forget lifecycle/status signaling to the service supervisor.
///
/// Notification failures never affect control flow; a daemon running outside
/// a supervisor simply has nobody listening.
pub trait StatusNotifier {
    fn ready(&mut self);
    fn status(&mut self, status: &str);
    fn stopping(&mut self);
}

/// Notifier speaking the sd_notify protocol over `NOTIFY_SOCKET`.
#[derive(Debug, Default)]
pub struct SystemdNotifier;

impl StatusNotifier for SystemdNotifier {
    fn ready(&mut self) {
        let _ = sd_notify::notify(false, &[NotifyState::Ready]);
    }

    fn status(&mut self, status: &str) {
        let _ = sd_notify::notify(false, &[NotifyState::Status(status)]);
    }

    fn stopping(&mut self) {
        let _ = sd_notify::notify(false, &[NotifyState::Stopping]);
    }
}
