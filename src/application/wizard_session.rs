//! WizardSession - drives one draft from first step to publication.
//!
//! The session owns the [`WizardState`], the ad id once the backend has
//! assigned one, and the category taxonomy. It turns "Next" presses into
//! validated backend requests and applies the backend's answer.
//!
//! # Submission flow
//!
//! 1. Validate the active step locally. Errors stay on the step and are
//!    shown inline; nothing is sent.
//! 2. Build the step's payload and map the frontend step to the backend's
//!    numbering.
//! 3. Step 1 without an ad id creates the draft; everything else updates
//!    it. The final step goes out as a multipart form.
//! 4. On success, record the backend's completion report and advance. On
//!    failure, show the backend's message and any field details.
//!
//! Autosave uses the same request building but skips validation and never
//! shows anything to the user.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::foundation::{AdId, DomainError, ErrorCode, StateMachine, WizardSessionId};
use crate::domain::listing::payload::{self, FinalStepForm, MaterialTypePayload};
use crate::domain::listing::{AuctionDraft, Taxonomy};
use crate::domain::wizard::{
    BackendStep, DraftUpdate, HydratedWizard, StepCompletionStatus, StepKind, StepRegistry,
    StepValidation, SubmissionStatus, WizardMode, WizardState, WizardStep,
};
use crate::ports::{ApiError, AuctionApi, Notifier, Toast};

/// Errors from [`WizardSession::submit_current_step`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    /// Local validation failed; the field errors are on the state.
    #[error("Step is not valid: {} field(s) need attention", .0.field_errors.len())]
    Validation(StepValidation),

    /// The draft lacks data the backend request needs.
    #[error("Cannot build {step} request: {reason}")]
    MissingPayload { step: StepKind, reason: String },

    /// A later step was submitted before step 1 created the draft.
    #[error("Draft has not been created yet")]
    NoDraft,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    InvalidState(#[from] DomainError),
}

/// What a successful submission did.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Step saved and the wizard moved on.
    Advanced { ad_id: AdId, next: WizardStep },
    /// Final step saved; the wizard is done.
    Completed { ad_id: AdId },
}

/// Result of an autosave attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutosaveOutcome {
    Saved,
    Skipped(AutosaveSkip),
    Failed,
}

/// Why an autosave did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutosaveSkip {
    NoChanges,
    NoDraft,
    FinalStep,
    Busy,
    Incomplete,
    Closed,
}

/// How request failures are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Toast the error and show field details inline.
    Notify,
    /// Log at debug level only.
    Silent,
}

/// Completed and total step counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.completed.min(self.total) * 100) / self.total) as u8
    }
}

enum StepRequest {
    Create(MaterialTypePayload),
    Update(AdId, BackendStep, serde_json::Value),
    Final(AdId, FinalStepForm),
}

struct Saved {
    ad_id: AdId,
    status: StepCompletionStatus,
}

/// One open wizard.
pub struct WizardSession {
    id: WizardSessionId,
    ad_id: Option<AdId>,
    state: WizardState,
    taxonomy: Taxonomy,
    status: SubmissionStatus,
    closed: bool,
    api: Arc<dyn AuctionApi>,
    notifier: Arc<dyn Notifier>,
}

impl WizardSession {
    /// Opens an empty creation wizard.
    pub fn create(api: Arc<dyn AuctionApi>, notifier: Arc<dyn Notifier>, taxonomy: Taxonomy) -> Self {
        Self::open(api, notifier, taxonomy, None, WizardState::new(WizardMode::Create))
    }

    /// Opens an edit wizard around a hydrated ad.
    pub fn edit(
        api: Arc<dyn AuctionApi>,
        notifier: Arc<dyn Notifier>,
        taxonomy: Taxonomy,
        hydrated: HydratedWizard,
    ) -> Self {
        Self::open(api, notifier, taxonomy, Some(hydrated.ad_id), hydrated.state)
    }

    fn open(
        api: Arc<dyn AuctionApi>,
        notifier: Arc<dyn Notifier>,
        taxonomy: Taxonomy,
        ad_id: Option<AdId>,
        state: WizardState,
    ) -> Self {
        let id = WizardSessionId::new();
        tracing::info!(session_id = %id, ad_id = ?ad_id, mode = ?state.mode(), "Wizard opened");
        Self {
            id,
            ad_id,
            state,
            taxonomy,
            status: SubmissionStatus::Idle,
            closed: false,
            api,
            notifier,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> WizardSessionId {
        self.id
    }

    pub fn ad_id(&self) -> Option<AdId> {
        self.ad_id
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn draft(&self) -> &AuctionDraft {
        self.state.draft()
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn is_complete(&self) -> bool {
        self.status == SubmissionStatus::Complete
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn progress(&self) -> Progress {
        let (completed, total) = self.state.progress();
        Progress { completed, total }
    }

    // ───────────────────────────────────────────────────────────────
    // Editing and navigation
    // ───────────────────────────────────────────────────────────────

    /// Merges user input into the draft.
    pub fn update(&mut self, update: DraftUpdate) {
        if self.closed {
            return;
        }
        self.state = self.state.apply_update(update);
    }

    pub fn go_to_step(&mut self, step_id: u8) -> Result<WizardStep, DomainError> {
        self.state.go_to(step_id)
    }

    pub fn go_back(&mut self) -> Option<WizardStep> {
        self.state.go_back()
    }

    /// Discards the draft. Later calls are no-ops.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        tracing::info!(
            session_id = %self.id,
            ad_id = ?self.ad_id,
            unsaved = self.state.has_unsaved_changes(),
            "Wizard closed"
        );
        self.state = WizardState::new(self.state.mode());
        self.ad_id = None;
        self.closed = true;
    }

    // ───────────────────────────────────────────────────────────────
    // Submission
    // ───────────────────────────────────────────────────────────────

    /// Validates and saves the active step, then advances.
    pub async fn submit_current_step(&mut self) -> Result<SubmitOutcome, SubmitError> {
        if self.closed {
            return Err(DomainError::new(ErrorCode::InvalidStateTransition, "Wizard is closed").into());
        }
        self.status = self.status.transition_to(SubmissionStatus::Validating)?;

        let step = self.state.active_step();
        let validation = self.state.validate_current_step();
        if !validation.is_valid {
            self.status = self.status.transition_to(SubmissionStatus::Idle)?;
            tracing::debug!(step = step.id, errors = validation.field_errors.len(), "Step failed validation");
            if let Some(summary) = validation.summary() {
                self.notifier.notify(Toast::error(summary));
            }
            return Err(SubmitError::Validation(validation));
        }

        let request = match self.build_request() {
            Ok(request) => request,
            Err(err) => {
                self.status = self.status.transition_to(SubmissionStatus::Idle)?;
                self.notifier.notify(Toast::error(blocked_message(&err)));
                return Err(err);
            }
        };

        self.status = self.status.transition_to(SubmissionStatus::Submitting)?;
        let saved = match self.send(request, FailurePolicy::Notify).await {
            Ok(saved) => saved,
            Err(err) => {
                self.status = self.status.transition_to(SubmissionStatus::Idle)?;
                return Err(err.into());
            }
        };

        self.apply_saved(&saved);

        if self.state.is_on_final_step() {
            self.status = self.status.transition_to(SubmissionStatus::Complete)?;
            tracing::info!(session_id = %self.id, ad_id = %saved.ad_id, "Auction saved");
            let message = match self.state.mode() {
                WizardMode::Create => "Your auction has been created",
                WizardMode::Edit => "Your auction has been updated",
            };
            self.notifier.notify(Toast::success(message));
            return Ok(SubmitOutcome::Completed { ad_id: saved.ad_id });
        }

        self.status = self.status.transition_to(SubmissionStatus::Idle)?;
        let next = self.state.advance().unwrap_or_else(|| self.state.active_step());
        tracing::debug!(ad_id = %saved.ad_id, from = step.id, to = next.id, "Step saved");
        Ok(SubmitOutcome::Advanced {
            ad_id: saved.ad_id,
            next,
        })
    }

    /// Saves unsaved changes in the background without validating.
    ///
    /// Never notifies the user; failures leave the draft dirty so the next
    /// attempt or an explicit submit picks them up.
    pub async fn autosave(&mut self) -> AutosaveOutcome {
        if let Some(reason) = self.autosave_skip_reason() {
            return AutosaveOutcome::Skipped(reason);
        }

        let request = match self.build_request() {
            Ok(request) => request,
            Err(err) => {
                tracing::debug!(error = %err, "Autosave skipped");
                return AutosaveOutcome::Skipped(AutosaveSkip::Incomplete);
            }
        };

        match self.send(request, FailurePolicy::Silent).await {
            Ok(saved) => {
                self.apply_saved(&saved);
                AutosaveOutcome::Saved
            }
            Err(_) => AutosaveOutcome::Failed,
        }
    }

    fn autosave_skip_reason(&self) -> Option<AutosaveSkip> {
        if self.closed {
            Some(AutosaveSkip::Closed)
        } else if !self.state.has_unsaved_changes() {
            Some(AutosaveSkip::NoChanges)
        } else if self.ad_id.is_none() {
            Some(AutosaveSkip::NoDraft)
        } else if self.state.is_on_final_step() {
            Some(AutosaveSkip::FinalStep)
        } else if self.status != SubmissionStatus::Idle {
            Some(AutosaveSkip::Busy)
        } else {
            None
        }
    }

    fn build_request(&self) -> Result<StepRequest, SubmitError> {
        let step = self.state.active_step();
        let draft = self.state.draft();
        let backend_step = StepRegistry::map_frontend_step(step.id, self.state.material_type());

        let body = match step.kind {
            StepKind::MaterialType => {
                let body = payload::material_type_payload(draft, &self.taxonomy).ok_or_else(|| {
                    SubmitError::MissingPayload {
                        step: step.kind,
                        reason: format!(
                            "category '{}' / subcategory '{}' not found",
                            draft.category, draft.subcategory
                        ),
                    }
                })?;
                match self.ad_id {
                    None => return Ok(StepRequest::Create(body)),
                    Some(_) => to_json(&body)?,
                }
            }
            StepKind::Specifications => to_json(&payload::specification_payload(draft))?,
            StepKind::MaterialOrigin => to_json(&payload::origin_payload(draft))?,
            StepKind::Contamination => to_json(&payload::contamination_payload(draft))?,
            StepKind::Processing => to_json(&payload::processing_payload(draft))?,
            StepKind::LocationLogistics => to_json(&payload::location_payload(draft))?,
            StepKind::QuantityPrice => {
                let body = payload::quantity_price_payload(draft).ok_or_else(|| {
                    SubmitError::MissingPayload {
                        step: step.kind,
                        reason: "no auction duration selected".to_string(),
                    }
                })?;
                to_json(&body)?
            }
            StepKind::TitleImage => {
                let ad_id = self.ad_id.ok_or(SubmitError::NoDraft)?;
                return Ok(StepRequest::Final(ad_id, payload::final_step_form(draft)));
            }
        };

        let ad_id = self.ad_id.ok_or(SubmitError::NoDraft)?;
        Ok(StepRequest::Update(ad_id, backend_step, body))
    }

    async fn send(&mut self, request: StepRequest, policy: FailurePolicy) -> Result<Saved, ApiError> {
        let result = match request {
            StepRequest::Create(body) => self.api.create_draft_step1(&body).await.map(|created| Saved {
                ad_id: created.ad_id,
                status: created.step_completion_status,
            }),
            StepRequest::Update(ad_id, step, body) => self
                .api
                .update_draft_step(ad_id, step, &body)
                .await
                .map(|update| Saved {
                    ad_id,
                    status: update.step_completion_status,
                }),
            StepRequest::Final(ad_id, form) => {
                self.api
                    .update_final_step(ad_id, &form)
                    .await
                    .map(|update| Saved {
                        ad_id,
                        status: update.step_completion_status,
                    })
            }
        };

        if let Err(err) = &result {
            self.report_failure(err, policy);
        }
        result
    }

    fn report_failure(&mut self, err: &ApiError, policy: FailurePolicy) {
        match policy {
            FailurePolicy::Silent => {
                tracing::debug!(session_id = %self.id, error = %err, "Autosave failed");
            }
            FailurePolicy::Notify => {
                tracing::warn!(session_id = %self.id, error = %err, "Step submission failed");
                if let Some(details) = err.field_errors() {
                    self.state.merge_backend_errors(details);
                }
                self.notifier.notify(Toast::error(err.user_message()));
            }
        }
    }

    fn apply_saved(&mut self, saved: &Saved) {
        if self.ad_id.is_none() {
            tracing::info!(session_id = %self.id, ad_id = %saved.ad_id, "Draft created");
        }
        self.ad_id = Some(saved.ad_id);
        self.state.record_backend_completion(&saved.status);
        self.state.mark_saved();
    }
}

fn to_json<T: serde::Serialize>(body: &T) -> Result<serde_json::Value, SubmitError> {
    serde_json::to_value(body).map_err(|e| {
        SubmitError::InvalidState(DomainError::new(
            ErrorCode::InternalError,
            format!("Failed to encode request: {}", e),
        ))
    })
}

fn blocked_message(err: &SubmitError) -> String {
    match err {
        SubmitError::MissingPayload {
            step: StepKind::MaterialType,
            ..
        } => "Please select a valid category and subcategory".to_string(),
        SubmitError::MissingPayload { .. } => "Please complete all required fields".to_string(),
        SubmitError::NoDraft => "Please complete the first step before continuing".to_string(),
        _ => "Something went wrong. Please try again.".to_string(),
    }
}
