//! SubmissionStatus - lifecycle of a step submission.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Where the controller is in handling a Next/Save.
///
/// ```text
/// Idle -> Validating -> Submitting -> Idle      (step saved, or failed)
///              |              \-----> Complete  (final step saved)
///              \-> Idle                         (local validation failed)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Validating,
    Submitting,
    Complete,
}

impl SubmissionStatus {
    /// True while a submission is being handled.
    pub fn is_busy(&self) -> bool {
        matches!(self, SubmissionStatus::Validating | SubmissionStatus::Submitting)
    }
}

impl StateMachine for SubmissionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SubmissionStatus::*;
        matches!(
            (self, target),
            (Idle, Validating)
                | (Validating, Idle)
                | (Validating, Submitting)
                | (Submitting, Idle)
                | (Submitting, Complete)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SubmissionStatus::*;
        match self {
            Idle => vec![Validating],
            Validating => vec![Idle, Submitting],
            Submitting => vec![Idle, Complete],
            Complete => vec![],
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SubmissionStatus::Idle => "Idle",
            SubmissionStatus::Validating => "Validating",
            SubmissionStatus::Submitting => "Submitting",
            SubmissionStatus::Complete => "Complete",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        assert_eq!(SubmissionStatus::default(), SubmissionStatus::Idle);
    }

    #[test]
    fn idle_cannot_skip_validation() {
        assert!(SubmissionStatus::Idle
            .transition_to(SubmissionStatus::Submitting)
            .is_err());
    }

    #[test]
    fn complete_is_terminal() {
        assert!(SubmissionStatus::Complete.is_terminal());
        assert!(!SubmissionStatus::Submitting.is_terminal());
    }

    #[test]
    fn busy_while_validating_or_submitting() {
        assert!(SubmissionStatus::Validating.is_busy());
        assert!(SubmissionStatus::Submitting.is_busy());
        assert!(!SubmissionStatus::Idle.is_busy());
        assert!(!SubmissionStatus::Complete.is_busy());
    }

    #[test]
    fn transitions_agree_with_valid_transitions() {
        for status in [
            SubmissionStatus::Idle,
            SubmissionStatus::Validating,
            SubmissionStatus::Submitting,
            SubmissionStatus::Complete,
        ] {
            for target in status.valid_transitions() {
                assert!(status.can_transition_to(&target), "{:?} -> {:?}", status, target);
            }
        }
    }
}
