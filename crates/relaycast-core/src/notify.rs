//! User-visible notification channel.

/// A fire-and-forget toast channel toward the user.
///
/// Every backend-facing failure is reported here instead of propagating as
/// an unhandled fault. Delivery is unacknowledged; implementations must
/// not block.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);

    fn error(&self, message: &str);

    fn info(&self, message: &str);
}
