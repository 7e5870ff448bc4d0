//! Tracing-backed notifier.

use relaycast_core::notify::Notifier;

/// A [`Notifier`] that routes toasts into the tracing log.
///
/// Default sink when no UI toast channel is wired up, e.g. in headless
/// runs and tests.
#[derive(Default)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        tracing::info!(kind = "success", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(kind = "error", "{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!(kind = "info", "{}", message);
    }
}
