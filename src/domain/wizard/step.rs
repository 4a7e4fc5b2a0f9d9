//! Step kinds and identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The eight canonical wizard screens, in backend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    MaterialType,
    Specifications,
    MaterialOrigin,
    Contamination,
    Processing,
    LocationLogistics,
    QuantityPrice,
    TitleImage,
}

impl StepKind {
    pub const ALL: [StepKind; 8] = [
        StepKind::MaterialType,
        StepKind::Specifications,
        StepKind::MaterialOrigin,
        StepKind::Contamination,
        StepKind::Processing,
        StepKind::LocationLogistics,
        StepKind::QuantityPrice,
        StepKind::TitleImage,
    ];

    /// The backend's fixed number for this step.
    pub fn backend_step(&self) -> BackendStep {
        let index = Self::ALL
            .iter()
            .position(|k| k == self)
            .unwrap_or_default();
        BackendStep((index + 1) as u8)
    }

    /// Steps that only apply to plastics.
    pub fn is_plastics_only(&self) -> bool {
        matches!(
            self,
            StepKind::Specifications
                | StepKind::MaterialOrigin
                | StepKind::Contamination
                | StepKind::Processing
        )
    }

    /// Steps whose fields are all optional.
    pub fn is_optional(&self) -> bool {
        matches!(self, StepKind::Specifications | StepKind::Processing)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StepKind::MaterialType => "Material Type",
            StepKind::Specifications => "Specifications",
            StepKind::MaterialOrigin => "Material Origin",
            StepKind::Contamination => "Contamination",
            StepKind::Processing => "Processing",
            StepKind::LocationLogistics => "Location & Logistics",
            StepKind::QuantityPrice => "Quantity & Price",
            StepKind::TitleImage => "Title & Image",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Step number in the backend's fixed 1-8 numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BackendStep(u8);

impl BackendStep {
    pub const FIRST: BackendStep = BackendStep(1);
    pub const FINAL: BackendStep = BackendStep(8);

    pub fn new(step: u8) -> Self {
        Self(step)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn is_final(&self) -> bool {
        *self == Self::FINAL
    }
}

impl fmt::Display for BackendStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the computed step list: the frontend id shown to the
/// user and the screen it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WizardStep {
    pub id: u8,
    pub kind: StepKind,
}

impl WizardStep {
    pub fn new(id: u8, kind: StepKind) -> Self {
        Self { id, kind }
    }

    pub fn title(&self) -> &'static str {
        self.kind.display_name()
    }
}
