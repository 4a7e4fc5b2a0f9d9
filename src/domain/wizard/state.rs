//! WizardState - the single state container behind the wizard.
//!
//! All draft edits go through [`WizardState::apply_update`], which merges
//! the update, recomputes the step list when the classification changes,
//! and keeps the active step, dirty flag and error map consistent in one
//! transition.

use std::collections::BTreeMap;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::listing::payload::draft_field_path;
use crate::domain::listing::{
    AuctionDraft, Contamination, ImageFile, Keywords, Location, Origin, Price, Processing,
    Quantity, Specifications,
};

use super::{
    validate_step, CompletionTracker, StepCompletionStatus, StepRegistry, StepValidation,
    ValidationProfile, WizardMode, WizardStep,
};

/// A partial draft: each `Some` replaces the whole top-level field.
///
/// Nested slices are not deep-merged; to change one sub-field, pass the
/// existing slice with that field modified.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftUpdate {
    pub material_type: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub specific_material: Option<String>,
    pub packaging: Option<String>,
    pub sell_frequency: Option<String>,
    pub specifications: Option<Specifications>,
    pub origin: Option<Origin>,
    pub contamination: Option<Contamination>,
    pub processing: Option<Processing>,
    pub location: Option<Location>,
    pub quantity: Option<Quantity>,
    pub price: Option<Price>,
    pub images: Option<Vec<ImageFile>>,
    pub existing_image_url: Option<Option<String>>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<Keywords>,
}

macro_rules! update_setters {
    ($($field:ident: $ty:ty),* $(,)?) => {
        $(
            pub fn $field(mut self, value: impl Into<$ty>) -> Self {
                self.$field = Some(value.into());
                self
            }
        )*
    };
}

impl DraftUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    update_setters! {
        material_type: String,
        category: String,
        subcategory: String,
        specific_material: String,
        packaging: String,
        sell_frequency: String,
        specifications: Specifications,
        origin: Origin,
        contamination: Contamination,
        processing: Processing,
        location: Location,
        quantity: Quantity,
        price: Price,
        images: Vec<ImageFile>,
        existing_image_url: Option<String>,
        title: String,
        description: String,
        keywords: Keywords,
    }

    /// Top-level draft fields this update sets.
    pub fn touched_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        let mut touch = |set: bool, name: &'static str| {
            if set {
                fields.push(name);
            }
        };
        touch(self.material_type.is_some(), "material_type");
        touch(self.category.is_some(), "category");
        touch(self.subcategory.is_some(), "subcategory");
        touch(self.specific_material.is_some(), "specific_material");
        touch(self.packaging.is_some(), "packaging");
        touch(self.sell_frequency.is_some(), "sell_frequency");
        touch(self.specifications.is_some(), "specifications");
        touch(self.origin.is_some(), "origin");
        touch(self.contamination.is_some(), "contamination");
        touch(self.processing.is_some(), "processing");
        touch(self.location.is_some(), "location");
        touch(self.quantity.is_some(), "quantity");
        touch(self.price.is_some(), "price");
        // A stored image satisfies the same rule as an uploaded one.
        touch(self.images.is_some() || self.existing_image_url.is_some(), "images");
        touch(self.title.is_some(), "title");
        touch(self.description.is_some(), "description");
        touch(self.keywords.is_some(), "keywords");
        fields
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True when the update can change which steps apply.
    pub fn reclassifies(&self) -> bool {
        self.material_type.is_some() || self.category.is_some()
    }

    fn apply_to(self, draft: &mut AuctionDraft) {
        macro_rules! merge {
            ($($field:ident),*) => {
                $(
                    if let Some(value) = self.$field {
                        draft.$field = value;
                    }
                )*
            };
        }
        merge!(
            material_type,
            category,
            subcategory,
            specific_material,
            packaging,
            sell_frequency,
            specifications,
            origin,
            contamination,
            processing,
            location,
            quantity,
            price,
            images,
            existing_image_url,
            title,
            description,
            keywords
        );
    }
}

/// Everything the wizard tracks about one draft.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    mode: WizardMode,
    draft: AuctionDraft,
    steps: Vec<WizardStep>,
    active_step: u8,
    completion: CompletionTracker,
    validation_errors: BTreeMap<String, String>,
    show_errors: bool,
    has_unsaved_changes: bool,
}

impl WizardState {
    /// Empty state for the creation form.
    pub fn new(mode: WizardMode) -> Self {
        Self::from_draft(mode, AuctionDraft::new(), StepCompletionStatus::new())
    }

    /// State around an existing draft, opened on the first step.
    pub fn from_draft(mode: WizardMode, draft: AuctionDraft, status: StepCompletionStatus) -> Self {
        let steps = StepRegistry::steps_for(&draft);
        Self {
            mode,
            draft,
            steps,
            active_step: 1,
            completion: CompletionTracker::new(status),
            validation_errors: BTreeMap::new(),
            show_errors: false,
            has_unsaved_changes: false,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn mode(&self) -> WizardMode {
        self.mode
    }

    pub fn draft(&self) -> &AuctionDraft {
        &self.draft
    }

    pub fn steps(&self) -> &[WizardStep] {
        &self.steps
    }

    pub fn active_step_id(&self) -> u8 {
        self.active_step
    }

    /// The active step. Always present in [`WizardState::steps`].
    pub fn active_step(&self) -> WizardStep {
        StepRegistry::find(&self.steps, self.active_step)
            .or_else(|| self.steps.first().copied())
            .unwrap_or_else(|| WizardStep::new(1, super::StepKind::MaterialType))
    }

    pub fn is_on_final_step(&self) -> bool {
        self.steps.last().map(|s| s.id) == Some(self.active_step)
    }

    pub fn material_type(&self) -> &str {
        StepRegistry::resolve_material_type(&self.draft)
    }

    pub fn completion(&self) -> &CompletionTracker {
        &self.completion
    }

    pub fn validation_errors(&self) -> &BTreeMap<String, String> {
        &self.validation_errors
    }

    pub fn show_errors(&self) -> bool {
        self.show_errors
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.has_unsaved_changes
    }

    pub fn validation_profile(&self) -> ValidationProfile {
        ValidationProfile::for_mode(self.mode)
    }

    pub fn is_step_complete(&self, step: &WizardStep) -> bool {
        self.completion.is_complete(step, self.material_type())
    }

    /// `(completed, total)` over the current step list.
    pub fn progress(&self) -> (usize, usize) {
        let completed = self
            .completion
            .completed_count(&self.steps, self.material_type());
        (completed, self.steps.len())
    }

    // ───────────────────────────────────────────────────────────────
    // Merge engine
    // ───────────────────────────────────────────────────────────────

    /// Merges `update` into a copy of this state.
    ///
    /// An empty update returns an identical state. Any other update marks
    /// the draft dirty and clears errors recorded for the touched fields.
    pub fn apply_update(&self, update: DraftUpdate) -> WizardState {
        if update.is_empty() {
            return self.clone();
        }

        let touched = update.touched_fields();
        let reclassifies = update.reclassifies();
        let previous_material = self.material_type().trim().to_lowercase();

        let mut next = self.clone();
        update.apply_to(&mut next.draft);

        if reclassifies {
            next.steps = StepRegistry::steps_for(&next.draft);
            if next.material_type().trim().to_lowercase() != previous_material {
                next.completion.invalidate_local();
            }
            if StepRegistry::find(&next.steps, next.active_step).is_none() {
                tracing::debug!(
                    from_step = next.active_step,
                    material_type = next.material_type(),
                    "Active step no longer applies, returning to step 1"
                );
                next.active_step = 1;
            }
        }

        next.has_unsaved_changes = true;
        next.clear_errors_for(&touched);
        next
    }

    fn clear_errors_for(&mut self, fields: &[&str]) {
        self.validation_errors.retain(|key, _| {
            !fields.iter().any(|&field| {
                key.as_str() == field
                    || key
                        .strip_prefix(field)
                        .is_some_and(|rest| rest.starts_with('.'))
            })
        });
        if self.validation_errors.is_empty() {
            self.show_errors = false;
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Validation
    // ───────────────────────────────────────────────────────────────

    /// Validates the active step and replaces the error map with the result.
    pub fn validate_current_step(&mut self) -> StepValidation {
        let step = self.active_step();
        let result = validate_step(&self.draft, step.kind, &self.validation_profile());
        self.completion.record_local(step.kind, result.is_valid);
        self.validation_errors = result.field_errors.clone();
        self.show_errors = !result.is_valid;
        result
    }

    /// Adds field errors reported by the backend to the error map, keyed
    /// by draft path so edits clear them like local errors.
    pub fn merge_backend_errors(&mut self, details: &BTreeMap<String, Vec<String>>) {
        for (field, messages) in details {
            let message = if messages.is_empty() {
                "Invalid value".to_string()
            } else {
                messages.join(" ")
            };
            self.validation_errors
                .entry(draft_field_path(field))
                .and_modify(|existing| {
                    existing.push(' ');
                    existing.push_str(&message);
                })
                .or_insert(message);
        }
        if !self.validation_errors.is_empty() {
            self.show_errors = true;
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Progress and navigation
    // ───────────────────────────────────────────────────────────────

    /// Applies a backend completion report.
    pub fn record_backend_completion(&mut self, status: &StepCompletionStatus) {
        self.completion.record_backend(status);
    }

    /// Marks the draft as persisted.
    pub fn mark_saved(&mut self) {
        self.has_unsaved_changes = false;
    }

    /// Moves to a step in the current list.
    pub fn go_to(&mut self, step_id: u8) -> Result<WizardStep, DomainError> {
        let step = StepRegistry::find(&self.steps, step_id).ok_or_else(|| {
            DomainError::new(
                ErrorCode::StepNotAvailable,
                format!("Step {} is not available for this material", step_id),
            )
            .with_detail("step", step_id.to_string())
        })?;
        self.active_step = step.id;
        Ok(step)
    }

    /// Moves to the first step the backend has not marked complete, or to
    /// the last step when every step is.
    pub fn open_on_first_incomplete(&mut self) -> WizardStep {
        let target = self
            .completion
            .first_incomplete(&self.steps, self.material_type());
        if let Some(step) = target {
            self.active_step = step.id;
        }
        self.active_step()
    }

    /// Moves to the next step; `None` when already on the last one.
    pub fn advance(&mut self) -> Option<WizardStep> {
        let next = StepRegistry::next(&self.steps, self.active_step)?;
        self.active_step = next.id;
        Some(next)
    }

    /// Moves to the previous step; `None` when already on the first one.
    pub fn go_back(&mut self) -> Option<WizardStep> {
        let previous = StepRegistry::previous(&self.steps, self.active_step)?;
        self.active_step = previous.id;
        Some(previous)
    }
}
