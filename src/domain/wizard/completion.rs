//! Step completion tracking.
//!
//! The backend reports which of its eight steps are complete; that report
//! is authoritative. For steps the backend has not reported on, the wizard
//! falls back to what it has validated locally during this session.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{BackendStep, StepKind, StepRegistry, WizardStep};

/// Completion flags keyed by backend step.
///
/// Deserializes from the backend's `step_completion_status` object, whose
/// keys are either `"1"` or `"step_1"`. Keys that are neither are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, bool>", into = "BTreeMap<String, bool>")]
pub struct StepCompletionStatus(BTreeMap<BackendStep, bool>);

impl StepCompletionStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, step: BackendStep, complete: bool) -> Self {
        self.0.insert(step, complete);
        self
    }

    /// The backend's flag for a step, `None` when it has not reported one.
    pub fn get(&self, step: BackendStep) -> Option<bool> {
        self.0.get(&step).copied()
    }

    pub fn is_complete(&self, step: BackendStep) -> bool {
        self.get(step).unwrap_or(false)
    }

    /// Overlays newer flags on top of these.
    pub fn merge(&mut self, newer: &StepCompletionStatus) {
        for (step, complete) in &newer.0 {
            self.0.insert(*step, *complete);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn parse_key(key: &str) -> Option<BackendStep> {
        let digits = key.trim().trim_start_matches("step").trim_start_matches('_');
        digits
            .parse::<u8>()
            .ok()
            .filter(|n| (1..=8).contains(n))
            .map(BackendStep::new)
    }
}

impl From<BTreeMap<String, bool>> for StepCompletionStatus {
    fn from(raw: BTreeMap<String, bool>) -> Self {
        Self(
            raw.into_iter()
                .filter_map(|(key, complete)| Self::parse_key(&key).map(|step| (step, complete)))
                .collect(),
        )
    }
}

impl From<StepCompletionStatus> for BTreeMap<String, bool> {
    fn from(status: StepCompletionStatus) -> Self {
        status
            .0
            .into_iter()
            .map(|(step, complete)| (step.to_string(), complete))
            .collect()
    }
}

/// Combined backend and local completion state for one wizard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionTracker {
    backend: StepCompletionStatus,
    local: BTreeSet<StepKind>,
}

impl CompletionTracker {
    pub fn new(backend: StepCompletionStatus) -> Self {
        Self {
            backend,
            local: BTreeSet::new(),
        }
    }

    pub fn backend(&self) -> &StepCompletionStatus {
        &self.backend
    }

    /// Applies a backend response.
    pub fn record_backend(&mut self, status: &StepCompletionStatus) {
        self.backend.merge(status);
    }

    /// Records the outcome of local validation for a step.
    pub fn record_local(&mut self, kind: StepKind, valid: bool) {
        if valid {
            self.local.insert(kind);
        } else {
            self.local.remove(&kind);
        }
    }

    /// Forgets local results; the backend's flags stay.
    pub fn invalidate_local(&mut self) {
        self.local.clear();
    }

    /// Backend flag when reported, local validation otherwise.
    pub fn is_complete(&self, step: &WizardStep, material_type: &str) -> bool {
        let backend_step = StepRegistry::map_frontend_step(step.id, material_type);
        self.backend
            .get(backend_step)
            .unwrap_or_else(|| self.local.contains(&step.kind))
    }

    /// Number of completed steps among `steps`.
    pub fn completed_count(&self, steps: &[WizardStep], material_type: &str) -> usize {
        steps
            .iter()
            .filter(|s| self.is_complete(s, material_type))
            .count()
    }

    /// First step whose backend step is not marked complete, or the last
    /// step when all are. Only the backend report is consulted.
    pub fn first_incomplete(&self, steps: &[WizardStep], material_type: &str) -> Option<WizardStep> {
        steps
            .iter()
            .find(|s| {
                !self
                    .backend
                    .is_complete(StepRegistry::map_frontend_step(s.id, material_type))
            })
            .or_else(|| steps.last())
            .copied()
    }
}
