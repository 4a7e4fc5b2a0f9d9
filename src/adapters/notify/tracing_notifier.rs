//! Notifier that writes toasts to the tracing log.
//!
//! Useful for headless embeddings (CLI tools, batch imports) where no UI
//! is available to display them.

use crate::ports::{Notifier, Toast, ToastLevel};

/// Logs each toast at a level matching its severity.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.level {
            ToastLevel::Success | ToastLevel::Info => {
                tracing::info!(level = %toast.level, message = %toast.message, "toast");
            }
            ToastLevel::Error => {
                tracing::warn!(level = %toast.level, message = %toast.message, "toast");
            }
        }
    }
}
