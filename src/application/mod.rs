//! Application layer - use cases on top of the wizard domain.
//!
//! - `handlers` - open a creation or edit session
//! - `wizard_session` - submission and autosave for one open wizard
//! - `autosave` - debounced background saving

mod autosave;
pub mod handlers;
mod wizard_session;

pub use autosave::AutosaveScheduler;
pub use handlers::{HydrateDraftError, HydrateDraftHandler, HydrateDraftResult, StartCreationHandler};
pub use wizard_session::{
    AutosaveOutcome, AutosaveSkip, FailurePolicy, Progress, SubmitError, SubmitOutcome,
    WizardSession,
};
