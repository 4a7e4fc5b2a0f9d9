//! Validation engine - per-step required-field checks.
//!
//! Errors are keyed by dotted draft paths (`location.country`,
//! `price.auction_duration`) so the form can show them inline next to
//! the field they belong to.

use std::collections::BTreeMap;

use crate::domain::listing::{AuctionDraft, AuctionDuration, MAX_KEYWORDS_LENGTH};

use super::StepKind;

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 255;

/// Which form the wizard is running in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardMode {
    /// Creating a new ad.
    Create,
    /// Editing an existing ad.
    Edit,
}

/// Rules that differ between the creation and edit forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationProfile {
    pub require_material_type: bool,
    pub require_delivery_options: bool,
    pub require_contamination_details: bool,
}

impl ValidationProfile {
    pub fn for_mode(mode: WizardMode) -> Self {
        match mode {
            WizardMode::Create => Self {
                require_material_type: true,
                require_delivery_options: false,
                require_contamination_details: false,
            },
            WizardMode::Edit => Self {
                require_material_type: false,
                require_delivery_options: true,
                require_contamination_details: true,
            },
        }
    }
}

/// Outcome of validating one step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepValidation {
    pub is_valid: bool,
    pub field_errors: BTreeMap<String, String>,
}

impl StepValidation {
    fn from_errors(field_errors: BTreeMap<String, String>) -> Self {
        Self {
            is_valid: field_errors.is_empty(),
            field_errors,
        }
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field).map(String::as_str)
    }

    /// One-line summary for a toast.
    pub fn summary(&self) -> Option<String> {
        match self.field_errors.len() {
            0 => None,
            1 => self.field_errors.values().next().cloned(),
            n => Some(format!("Please fix {} fields before continuing", n)),
        }
    }
}

struct Errors(BTreeMap<String, String>);

impl Errors {
    fn new() -> Self {
        Self(BTreeMap::new())
    }

    fn require(&mut self, field: &str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.add(field, message);
        }
    }

    fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }
}

/// Validates the fields owned by `kind`.
pub fn validate_step(
    draft: &AuctionDraft,
    kind: StepKind,
    profile: &ValidationProfile,
) -> StepValidation {
    let mut errors = Errors::new();

    match kind {
        StepKind::MaterialType => validate_material_type(draft, profile, &mut errors),
        StepKind::Specifications | StepKind::Processing => {}
        StepKind::MaterialOrigin => {
            errors.require("origin.source", &draft.origin.source, "Material origin is required");
        }
        StepKind::Contamination => validate_contamination(draft, profile, &mut errors),
        StepKind::LocationLogistics => validate_location(draft, profile, &mut errors),
        StepKind::QuantityPrice => validate_quantity_price(draft, &mut errors),
        StepKind::TitleImage => validate_title_image(draft, &mut errors),
    }

    StepValidation::from_errors(errors.0)
}

fn validate_material_type(draft: &AuctionDraft, profile: &ValidationProfile, errors: &mut Errors) {
    if profile.require_material_type {
        errors.require("material_type", &draft.material_type, "Material type is required");
    }
    errors.require("category", &draft.category, "Category is required");
    errors.require("subcategory", &draft.subcategory, "Subcategory is required");
    errors.require("packaging", &draft.packaging, "Packaging is required");
    errors.require("sell_frequency", &draft.sell_frequency, "Sell frequency is required");
}

fn validate_contamination(draft: &AuctionDraft, profile: &ValidationProfile, errors: &mut Errors) {
    let contamination = &draft.contamination;
    errors.require("contamination.level", &contamination.level, "Contamination level is required");

    if profile.require_contamination_details {
        if contamination.additives.is_empty() {
            errors.add("contamination.additives", "Select at least one additive option");
        }
        errors.require("contamination.storage", &contamination.storage, "Storage conditions are required");
    }
}

fn validate_location(draft: &AuctionDraft, profile: &ValidationProfile, errors: &mut Errors) {
    let location = &draft.location;
    errors.require("location.country", &location.country, "Country is required");
    errors.require("location.region", &location.region, "Region is required");
    errors.require("location.city", &location.city, "City is required");

    if profile.require_delivery_options && location.delivery_options.is_empty() {
        errors.add("location.delivery_options", "Select at least one delivery option");
    }
}

fn validate_quantity_price(draft: &AuctionDraft, errors: &mut Errors) {
    let quantity = &draft.quantity;
    let price = &draft.price;

    if !(quantity.available.is_finite() && quantity.available > 0.0) {
        errors.add("quantity.available", "Available quantity must be greater than 0");
    }
    errors.require("quantity.unit", &quantity.unit, "Unit is required");
    if !(quantity.minimum_order.is_finite() && quantity.minimum_order >= 0.0) {
        errors.add("quantity.minimum_order", "Minimum order cannot be negative");
    }

    if !(price.base_price.is_finite() && price.base_price > 0.0) {
        errors.add("price.base_price", "Starting price must be greater than 0");
    }
    if let Some(reserve) = price.reserve_price {
        if !(reserve.is_finite() && reserve >= 0.0) {
            errors.add("price.reserve_price", "Reserve price cannot be negative");
        }
    }

    match price.auction_duration {
        None => errors.add("price.auction_duration", "Auction duration is required"),
        Some(AuctionDuration::Custom) if price.custom_auction_duration == 0 => {
            errors.add(
                "price.auction_duration",
                "Pick an end date for the custom auction duration",
            );
        }
        Some(_) => {}
    }
}

fn validate_title_image(draft: &AuctionDraft, errors: &mut Errors) {
    let title_chars = draft.title.trim().chars().count();
    if title_chars < TITLE_MIN_CHARS {
        errors.add("title", format!("Title must be at least {} characters", TITLE_MIN_CHARS));
    } else if title_chars > TITLE_MAX_CHARS {
        errors.add("title", format!("Title cannot exceed {} characters", TITLE_MAX_CHARS));
    }

    if !draft.has_image() {
        errors.add("images", "An image is required");
    }

    if !draft.keywords.are_valid() {
        errors.add(
            "keywords",
            format!("Keywords cannot exceed {} characters", MAX_KEYWORDS_LENGTH),
        );
    }
}
