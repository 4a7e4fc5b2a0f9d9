//! AutosaveScheduler - debounced background saving.
//!
//! Every edit restarts the countdown; only the last edit within the
//! debounce window triggers a save. At most one save task is pending.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use super::wizard_session::WizardSession;
use crate::config::AutosaveConfig;
use crate::domain::wizard::DraftUpdate;

/// Owns the pending autosave task for one session.
pub struct AutosaveScheduler {
    session: Arc<Mutex<WizardSession>>,
    delay: Duration,
    enabled: bool,
    pending: Option<JoinHandle<()>>,
}

impl AutosaveScheduler {
    pub fn new(session: Arc<Mutex<WizardSession>>, config: &AutosaveConfig) -> Self {
        Self {
            session,
            delay: config.debounce(),
            enabled: config.enabled,
            pending: None,
        }
    }

    /// The shared session.
    pub fn session(&self) -> Arc<Mutex<WizardSession>> {
        Arc::clone(&self.session)
    }

    /// Applies user input and restarts the countdown.
    pub async fn update(&mut self, update: DraftUpdate) {
        if update.is_empty() {
            return;
        }
        self.session.lock().await.update(update);
        self.schedule();
    }

    /// Replaces any pending save with a new one after the debounce delay.
    pub fn schedule(&mut self) {
        self.cancel();
        if !self.enabled {
            return;
        }

        let session = Arc::clone(&self.session);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let outcome = session.lock().await.autosave().await;
            tracing::debug!(?outcome, "Autosave finished");
        }));
    }

    /// Aborts the pending save, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// True while a save is waiting or running.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancels pending work and discards the draft.
    pub async fn close(&mut self) {
        self.cancel();
        self.session.lock().await.close();
    }
}

impl Drop for AutosaveScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
