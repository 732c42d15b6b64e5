//! User-facing error notifications.
//!
//! The cart reports every rejected operation here exactly once. The message
//! is already user-ready; implementations only decide where it shows up.

use tracing::error;

/// Fire-and-forget sink for user-visible error messages.
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

/// Notifier that writes messages to the `cart::toast` tracing target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        error!(target: "cart::toast", "{message}");
    }
}

#[cfg(test)]
#[path = "notify_test.rs"]
mod tests;
