//! StepRegistry - which steps apply, and where they live on the backend.
//!
//! Plastics walk through all eight screens. Every other material skips
//! the four plastics-only screens, so the frontend shows a compact 1-4
//! numbering that has to be translated to backend steps 1, 6, 7 and 8
//! before any request goes out.
//!
//! ```ignore
//! let steps = StepRegistry::compute_steps("Metals");
//! assert_eq!(steps.len(), 4);
//! assert_eq!(StepRegistry::map_frontend_step(2, "Metals"), BackendStep::new(6));
//! ```

use crate::domain::listing::AuctionDraft;

use super::{BackendStep, StepKind, WizardStep};

const NON_PLASTIC_STEPS: [StepKind; 4] = [
    StepKind::MaterialType,
    StepKind::LocationLogistics,
    StepKind::QuantityPrice,
    StepKind::TitleImage,
];

/// Stateless step-list computations.
pub struct StepRegistry;

impl StepRegistry {
    /// True for "plastic"/"plastics", ignoring case and surrounding space.
    pub fn is_plastic(material_type: &str) -> bool {
        let normalized = material_type.trim().to_lowercase();
        normalized == "plastic" || normalized == "plastics"
    }

    /// Material type the step list is keyed on: the explicit material type,
    /// or the category name when the material type was never set (the edit
    /// form only carries the category).
    pub fn resolve_material_type(draft: &AuctionDraft) -> &str {
        if draft.material_type.trim().is_empty() {
            &draft.category
        } else {
            &draft.material_type
        }
    }

    /// Ordered steps for a material type.
    pub fn compute_steps(material_type: &str) -> Vec<WizardStep> {
        let kinds: &[StepKind] = if Self::is_plastic(material_type) {
            &StepKind::ALL
        } else {
            &NON_PLASTIC_STEPS
        };

        kinds
            .iter()
            .enumerate()
            .map(|(i, kind)| WizardStep::new((i + 1) as u8, *kind))
            .collect()
    }

    /// Step list for a draft.
    pub fn steps_for(draft: &AuctionDraft) -> Vec<WizardStep> {
        Self::compute_steps(Self::resolve_material_type(draft))
    }

    /// Translates a frontend step id to the backend step number.
    ///
    /// Ids outside the compact non-plastics range are returned unchanged.
    pub fn map_frontend_step(frontend_step: u8, material_type: &str) -> BackendStep {
        if frontend_step == 1 || Self::is_plastic(material_type) {
            return BackendStep::new(frontend_step);
        }

        match frontend_step {
            2 => BackendStep::new(6),
            3 => BackendStep::new(7),
            4 => BackendStep::new(8),
            other => {
                tracing::warn!(
                    frontend_step = other,
                    material_type,
                    "No backend mapping for step, using it unchanged"
                );
                BackendStep::new(other)
            }
        }
    }

    /// Looks up a step by frontend id.
    pub fn find(steps: &[WizardStep], id: u8) -> Option<WizardStep> {
        steps.iter().find(|s| s.id == id).copied()
    }

    /// The step after `id`, if any.
    pub fn next(steps: &[WizardStep], id: u8) -> Option<WizardStep> {
        let index = steps.iter().position(|s| s.id == id)?;
        steps.get(index + 1).copied()
    }

    /// The step before `id`, if any.
    pub fn previous(steps: &[WizardStep], id: u8) -> Option<WizardStep> {
        let index = steps.iter().position(|s| s.id == id)?;
        index.checked_sub(1).and_then(|i| steps.get(i)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn plastics_get_all_eight_steps() {
        let steps = StepRegistry::compute_steps("Plastics");
        assert_eq!(steps.len(), 8);
        assert_eq!(steps[1], WizardStep::new(2, StepKind::Specifications));
        assert_eq!(steps[7], WizardStep::new(8, StepKind::TitleImage));
    }

    #[test]
    fn other_materials_get_four_steps() {
        let steps = StepRegistry::compute_steps("Metals");
        let kinds: Vec<_> = steps.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, NON_PLASTIC_STEPS.to_vec());
        let ids: Vec<_> = steps.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn plastic_check_ignores_case_and_whitespace() {
        assert!(StepRegistry::is_plastic(" PLASTIC "));
        assert!(StepRegistry::is_plastic("plastics"));
        assert!(!StepRegistry::is_plastic("plastic film"));
        assert!(!StepRegistry::is_plastic(""));
    }

    #[test]
    fn non_plastic_steps_map_to_backend_numbers() {
        assert_eq!(StepRegistry::map_frontend_step(1, "Metals"), BackendStep::new(1));
        assert_eq!(StepRegistry::map_frontend_step(2, "Metals"), BackendStep::new(6));
        assert_eq!(StepRegistry::map_frontend_step(3, "Metals"), BackendStep::new(7));
        assert_eq!(StepRegistry::map_frontend_step(4, "Metals"), BackendStep::new(8));
    }

    #[test]
    fn unknown_non_plastic_step_passes_through() {
        assert_eq!(StepRegistry::map_frontend_step(5, "Metals"), BackendStep::new(5));
    }

    #[test]
    fn mapper_agrees_with_step_kinds() {
        for material in ["Plastics", "Metals"] {
            for step in StepRegistry::compute_steps(material) {
                assert_eq!(
                    StepRegistry::map_frontend_step(step.id, material),
                    step.kind.backend_step()
                );
            }
        }
    }

    #[test]
    fn category_stands_in_for_missing_material_type() {
        let draft = AuctionDraft {
            category: "Plastics".to_string(),
            ..AuctionDraft::default()
        };
        assert_eq!(StepRegistry::steps_for(&draft).len(), 8);
    }

    #[test]
    fn next_and_previous_walk_the_list() {
        let steps = StepRegistry::compute_steps("Metals");
        assert_eq!(StepRegistry::next(&steps, 1).map(|s| s.id), Some(2));
        assert_eq!(StepRegistry::next(&steps, 4), None);
        assert_eq!(StepRegistry::previous(&steps, 1), None);
        assert_eq!(StepRegistry::previous(&steps, 3).map(|s| s.id), Some(2));
    }

    proptest! {
        #[test]
        fn step_count_depends_only_on_plastic_check(material in "\\PC{0,12}") {
            let steps = StepRegistry::compute_steps(&material);
            let expected = if StepRegistry::is_plastic(&material) { 8 } else { 4 };
            prop_assert_eq!(steps.len(), expected);
            prop_assert_eq!(steps, StepRegistry::compute_steps(&material));
        }

        #[test]
        fn plastics_map_identity(step in 1u8..=8, upper in any::<bool>()) {
            let material = if upper { "PLASTICS" } else { "plastic" };
            prop_assert_eq!(StepRegistry::map_frontend_step(step, material).value(), step);
        }

        #[test]
        fn non_plastics_map_compact_steps(material in "[A-Za-z]{1,10}") {
            prop_assume!(!StepRegistry::is_plastic(&material));
            prop_assert_eq!(StepRegistry::map_frontend_step(2, &material).value(), 6);
            prop_assert_eq!(StepRegistry::map_frontend_step(3, &material).value(), 7);
            prop_assert_eq!(StepRegistry::map_frontend_step(4, &material).value(), 8);
        }
    }
}
