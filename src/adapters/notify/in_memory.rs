//! In-memory notifier that keeps every toast it receives.
//!
//! Lets callers (and tests) inspect what the user would have been shown.

use std::sync::{Mutex, MutexGuard};

use crate::ports::{Notifier, Toast, ToastLevel};

/// Collects toasts in arrival order.
#[derive(Debug, Default)]
pub struct InMemoryNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock still holds a usable list of toasts.
    fn guard(&self) -> MutexGuard<'_, Vec<Toast>> {
        self.toasts.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// All toasts received so far.
    pub fn toasts(&self) -> Vec<Toast> {
        self.guard().clone()
    }

    /// Toasts of one severity.
    pub fn toasts_of(&self, level: ToastLevel) -> Vec<Toast> {
        self.guard()
            .iter()
            .filter(|t| t.level == level)
            .cloned()
            .collect()
    }

    pub fn last(&self) -> Option<Toast> {
        self.guard().last().cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    pub fn clear(&self) {
        self.guard().clear();
    }
}

impl Notifier for InMemoryNotifier {
    fn notify(&self, toast: Toast) {
        self.guard().push(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_toasts_in_order() {
        let notifier = InMemoryNotifier::new();
        notifier.notify(Toast::info("Saving"));
        notifier.notify(Toast::error("Timeout"));

        assert_eq!(notifier.toasts().len(), 2);
        assert_eq!(notifier.last(), Some(Toast::error("Timeout")));
        assert_eq!(notifier.toasts_of(ToastLevel::Error).len(), 1);

        notifier.clear();
        assert!(notifier.is_empty());
    }
}
