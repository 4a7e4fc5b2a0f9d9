//! Wizard module - the step state machine around an auction draft.
//!
//! - `step` / `registry` - which steps apply and their backend numbers
//! - `completion` - backend and local completion tracking
//! - `validation` - per-step required-field rules
//! - `state` - the state container and its merge engine
//! - `submission` - lifecycle of a step submission
//! - `hydration` - opening a saved ad for editing

mod completion;
pub mod hydration;
mod registry;
mod state;
mod step;
mod submission;
mod validation;

pub use completion::{CompletionTracker, StepCompletionStatus};
pub use hydration::{hydrate, HydratedWizard, HydrationReport, UnmappedCode};
pub use registry::StepRegistry;
pub use state::{DraftUpdate, WizardState};
pub use step::{BackendStep, StepKind, WizardStep};
pub use submission::SubmissionStatus;
pub use validation::{
    validate_step, StepValidation, ValidationProfile, WizardMode, TITLE_MAX_CHARS,
    TITLE_MIN_CHARS,
};
