//! Backend payload mapping.
//!
//! Converts draft slices into the shapes the marketplace API expects for
//! each step. Categorical labels are converted to backend codes here, and
//! category/subcategory names are resolved to ids through the taxonomy.

use serde::{Deserialize, Serialize};

use super::labels;
use super::{AuctionDraft, ImageFile, Taxonomy};

/// Step 1 body. Also used to create the draft on the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialTypePayload {
    pub category: u64,
    pub subcategory: u64,
    pub specific_material: String,
    pub packaging: String,
    pub material_frequency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecificationPayload {
    pub specification_grade: String,
    pub specification_color: String,
    pub specification_form: String,
    pub additional_specifications: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginPayload {
    pub origin: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContaminationPayload {
    pub contamination: String,
    pub additives: Vec<String>,
    pub storage_conditions: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingPayload {
    pub processing_methods: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationData {
    pub country: String,
    pub state_province: String,
    pub city: String,
    pub address_line: String,
    pub postal_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPayload {
    pub location_data: LocationData,
    pub delivery_options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityPricePayload {
    pub available_quantity: f64,
    pub unit_of_measurement: String,
    pub minimum_order_quantity: f64,
    pub starting_bid_price: f64,
    pub currency: String,
    /// Days the auction runs, custom lengths included.
    pub auction_duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_auction_duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserve_price: Option<f64>,
    pub allow_broker_bids: bool,
}

/// Multipart form for the final step.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalStepForm {
    pub title: String,
    pub description: String,
    /// Keywords joined with `", "`.
    pub keywords: String,
    pub image: Option<ImageFile>,
}

/// Multipart field name carrying the image.
pub const IMAGE_FIELD: &str = "image";

/// Draft path for a field named in a backend error.
///
/// Accepts bare keys (`postal_code`) and nested ones (`location_data.city`).
/// Keys with no draft counterpart come back as sent.
pub fn draft_field_path(backend_field: &str) -> String {
    let field = backend_field.trim();
    let leaf = field.strip_prefix("location_data.").unwrap_or(field);
    let path = match leaf {
        "material_frequency" => "sell_frequency",
        "specification_grade" => "specifications.grade",
        "specification_color" => "specifications.color",
        "specification_form" => "specifications.form",
        "additional_specifications" => "specifications.additional_specs",
        "origin" => "origin.source",
        "contamination" => "contamination.level",
        "additives" => "contamination.additives",
        "storage_conditions" => "contamination.storage",
        "processing_methods" => "processing.methods",
        "location_data" => "location",
        "country" => "location.country",
        "state_province" => "location.region",
        "city" => "location.city",
        "address_line" => "location.full_address",
        "postal_code" => "location.postal_code",
        "delivery_options" => "location.delivery_options",
        "available_quantity" => "quantity.available",
        "unit_of_measurement" => "quantity.unit",
        "minimum_order_quantity" => "quantity.minimum_order",
        "starting_bid_price" => "price.base_price",
        "currency" => "price.currency",
        "auction_duration" => "price.auction_duration",
        "custom_auction_duration" => "price.custom_auction_duration",
        "reserve_price" => "price.reserve_price",
        "allow_broker_bids" => "price.allow_broker_bids",
        IMAGE_FIELD => "images",
        _ => field,
    };
    path.to_string()
}

pub fn material_type_payload(
    draft: &AuctionDraft,
    taxonomy: &Taxonomy,
) -> Option<MaterialTypePayload> {
    let (category, subcategory) = taxonomy.resolve_ids(&draft.category, &draft.subcategory)?;
    Some(MaterialTypePayload {
        category,
        subcategory,
        specific_material: draft.specific_material.trim().to_string(),
        packaging: labels::PACKAGING.to_code(&draft.packaging),
        material_frequency: labels::SELL_FREQUENCY.to_code(&draft.sell_frequency),
    })
}

pub fn specification_payload(draft: &AuctionDraft) -> SpecificationPayload {
    let specs = &draft.specifications;
    SpecificationPayload {
        specification_grade: specs.grade.trim().to_string(),
        specification_color: specs.color.trim().to_string(),
        specification_form: specs.form.trim().to_string(),
        additional_specifications: specs
            .additional_specs
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
    }
}

pub fn origin_payload(draft: &AuctionDraft) -> OriginPayload {
    OriginPayload {
        origin: labels::ORIGIN.to_code(&draft.origin.source),
    }
}

pub fn contamination_payload(draft: &AuctionDraft) -> ContaminationPayload {
    let contamination = &draft.contamination;
    ContaminationPayload {
        contamination: labels::CONTAMINATION.to_code(&contamination.level),
        additives: labels::ADDITIVES.to_codes(&contamination.additives),
        storage_conditions: labels::STORAGE.to_code(&contamination.storage),
    }
}

pub fn processing_payload(draft: &AuctionDraft) -> ProcessingPayload {
    ProcessingPayload {
        processing_methods: labels::PROCESSING.to_codes(&draft.processing.methods),
    }
}

pub fn location_payload(draft: &AuctionDraft) -> LocationPayload {
    let location = &draft.location;
    LocationPayload {
        location_data: LocationData {
            country: location.country.trim().to_string(),
            state_province: location.region.trim().to_string(),
            city: location.city.trim().to_string(),
            address_line: location.full_address.trim().to_string(),
            postal_code: location.postal_code.trim().to_string(),
        },
        delivery_options: labels::DELIVERY.to_codes(&location.delivery_options),
    }
}

/// Quantity and price body; `None` while no auction duration is chosen.
pub fn quantity_price_payload(draft: &AuctionDraft) -> Option<QuantityPricePayload> {
    let price = &draft.price;
    let duration = price.auction_duration?;
    let (auction_duration, custom_auction_duration) = match duration.fixed_days() {
        Some(days) => (days, None),
        None => (price.custom_auction_duration, Some(price.custom_auction_duration)),
    };

    Some(QuantityPricePayload {
        available_quantity: draft.quantity.available,
        unit_of_measurement: labels::UNIT.to_code(&draft.quantity.unit),
        minimum_order_quantity: draft.quantity.minimum_order,
        starting_bid_price: price.base_price,
        currency: price.currency.trim().to_uppercase(),
        auction_duration,
        custom_auction_duration,
        reserve_price: price.reserve_price,
        allow_broker_bids: price.allow_broker_bids,
    })
}

pub fn final_step_form(draft: &AuctionDraft) -> FinalStepForm {
    FinalStepForm {
        title: draft.title.trim().to_string(),
        description: draft.description.trim().to_string(),
        keywords: draft.keywords.joined(),
        image: draft.upload_image().cloned(),
    }
}
