//! FullAdRecord - the backend's full representation of a saved ad.
//!
//! Every field except the id is optional because the backend returns
//! whatever has been saved so far. Decimal columns may arrive as JSON
//! numbers or as strings; [`NumericField`] keeps the raw form so the
//! hydration mapping can reject malformed values explicitly.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AdId, ValidationError};
use crate::domain::wizard::StepCompletionStatus;

/// A numeric column as sent by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Number(f64),
    Text(String),
}

impl NumericField {
    /// Parses the value, naming `field` in the error.
    pub fn to_f64(&self, field: &str) -> Result<f64, ValidationError> {
        match self {
            NumericField::Number(n) => Ok(*n),
            NumericField::Text(text) => text.trim().parse::<f64>().map_err(|_| {
                ValidationError::invalid_format(field, format!("'{}' is not a number", text))
            }),
        }
    }
}

/// Stored address of an ad.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationRecord {
    pub country: Option<String>,
    pub state_province: Option<String>,
    pub city: Option<String>,
    pub address_line: Option<String>,
    pub postal_code: Option<String>,
}

/// Full ad detail as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullAdRecord {
    pub id: AdId,

    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Comma separated.
    #[serde(default)]
    pub keywords: Option<String>,
    /// URL of the stored image.
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub category: Option<u64>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub subcategory: Option<u64>,
    #[serde(default)]
    pub subcategory_name: Option<String>,
    #[serde(default)]
    pub specific_material: Option<String>,
    #[serde(default)]
    pub packaging: Option<String>,
    #[serde(default)]
    pub material_frequency: Option<String>,

    #[serde(default)]
    pub specification_grade: Option<String>,
    #[serde(default)]
    pub specification_color: Option<String>,
    #[serde(default)]
    pub specification_form: Option<String>,
    #[serde(default)]
    pub additional_specifications: Vec<String>,

    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub contamination: Option<String>,
    #[serde(default)]
    pub additives: Vec<String>,
    #[serde(default)]
    pub storage_conditions: Option<String>,
    #[serde(default)]
    pub processing_methods: Vec<String>,

    #[serde(default)]
    pub location_data: Option<LocationRecord>,
    #[serde(default)]
    pub delivery_options: Vec<String>,

    #[serde(default)]
    pub available_quantity: Option<NumericField>,
    #[serde(default)]
    pub unit_of_measurement: Option<String>,
    #[serde(default)]
    pub minimum_order_quantity: Option<NumericField>,
    #[serde(default)]
    pub starting_bid_price: Option<NumericField>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub auction_duration: Option<u32>,
    #[serde(default)]
    pub custom_auction_duration: Option<u32>,
    #[serde(default)]
    pub reserve_price: Option<NumericField>,
    #[serde(default)]
    pub allow_broker_bids: Option<bool>,

    #[serde(default)]
    pub step_completion_status: StepCompletionStatus,
    #[serde(default)]
    pub is_complete: bool,
}

impl FullAdRecord {
    /// Record with only an id, everything else unset.
    pub fn empty(id: AdId) -> Self {
        Self {
            id,
            title: None,
            description: None,
            keywords: None,
            image: None,
            category: None,
            category_name: None,
            subcategory: None,
            subcategory_name: None,
            specific_material: None,
            packaging: None,
            material_frequency: None,
            specification_grade: None,
            specification_color: None,
            specification_form: None,
            additional_specifications: Vec::new(),
            origin: None,
            contamination: None,
            additives: Vec::new(),
            storage_conditions: None,
            processing_methods: Vec::new(),
            location_data: None,
            delivery_options: Vec::new(),
            available_quantity: None,
            unit_of_measurement: None,
            minimum_order_quantity: None,
            starting_bid_price: None,
            currency: None,
            auction_duration: None,
            custom_auction_duration: None,
            reserve_price: None,
            allow_broker_bids: None,
            step_completion_status: StepCompletionStatus::default(),
            is_complete: false,
        }
    }
}
