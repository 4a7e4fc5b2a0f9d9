//! Edit-mode hydration - turning a saved ad back into a wizard state.
//!
//! The backend record is mapped field by field into the draft shape,
//! converting backend codes into the labels the form displays. If the
//! record cannot be mapped (unknown category id, malformed number) the
//! wizard still opens, on a minimal draft built from the fields that are
//! always safe to copy.

use crate::domain::foundation::{AdId, DomainError, ErrorCode};
use crate::domain::listing::labels::{self, LabelTable};
use crate::domain::listing::{
    AuctionDraft, AuctionDuration, Contamination, FullAdRecord, Keywords, Location, Origin,
    NumericField, Price, Processing, Quantity, Specifications, Taxonomy,
};

use super::{WizardMode, WizardState};

/// A backend code with no display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmappedCode {
    pub field: &'static str,
    pub code: String,
}

/// What happened while hydrating.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HydrationReport {
    /// Codes shown as-is because no label matched.
    pub unmapped_codes: Vec<UnmappedCode>,
    /// Set when the full mapping failed and the minimal draft was used.
    pub fallback_reason: Option<DomainError>,
}

impl HydrationReport {
    pub fn used_fallback(&self) -> bool {
        self.fallback_reason.is_some()
    }
}

/// A wizard ready to edit an existing ad.
#[derive(Debug, Clone, PartialEq)]
pub struct HydratedWizard {
    pub ad_id: AdId,
    pub state: WizardState,
    pub report: HydrationReport,
}

/// Builds an edit-mode wizard from a saved ad. Never fails; see
/// [`HydrationReport::fallback_reason`].
pub fn hydrate(record: &FullAdRecord, taxonomy: &Taxonomy) -> HydratedWizard {
    let mut report = HydrationReport::default();

    let draft = match map_record(record, taxonomy, &mut report.unmapped_codes) {
        Ok(draft) => draft,
        Err(err) => {
            tracing::warn!(ad_id = %record.id, error = %err, "Falling back to minimal draft");
            report.unmapped_codes.clear();
            report.fallback_reason = Some(err);
            minimal_draft(record, taxonomy)
        }
    };

    for unmapped in &report.unmapped_codes {
        tracing::warn!(
            ad_id = %record.id,
            field = unmapped.field,
            code = %unmapped.code,
            "No display label for backend code"
        );
    }

    let mut state = WizardState::from_draft(
        WizardMode::Edit,
        draft,
        record.step_completion_status.clone(),
    );
    state.open_on_first_incomplete();

    HydratedWizard {
        ad_id: record.id,
        state,
        report,
    }
}

/// Draft built only from title, description, keywords, image and category.
///
/// Hydrated drafts leave `material_type` empty so the category decides
/// which steps apply.
pub fn minimal_draft(record: &FullAdRecord, taxonomy: &Taxonomy) -> AuctionDraft {
    let category = record
        .category
        .and_then(|id| taxonomy.category_by_id(id))
        .map(|c| c.name.clone())
        .or_else(|| record.category_name.clone())
        .unwrap_or_default();

    AuctionDraft {
        category,
        title: text(&record.title),
        description: text(&record.description),
        keywords: record
            .keywords
            .as_deref()
            .map(Keywords::parse_csv)
            .unwrap_or_default(),
        existing_image_url: record.image.clone().filter(|url| !url.trim().is_empty()),
        ..AuctionDraft::default()
    }
}

/// Full mapping from the backend record to the draft shape.
pub fn map_record(
    record: &FullAdRecord,
    taxonomy: &Taxonomy,
    unmapped: &mut Vec<UnmappedCode>,
) -> Result<AuctionDraft, DomainError> {
    let (category, subcategory) = resolve_classification(record, taxonomy)?;
    let mut labeler = Labeler { unmapped };

    let location = record.location_data.clone().unwrap_or_default();
    let packaging = labeler.label(&labels::PACKAGING, &record.packaging);

    Ok(AuctionDraft {
        material_type: String::new(),
        category,
        subcategory,
        specific_material: text(&record.specific_material),
        packaging: packaging.clone(),
        sell_frequency: labeler.label(&labels::SELL_FREQUENCY, &record.material_frequency),

        specifications: Specifications {
            grade: text(&record.specification_grade),
            color: text(&record.specification_color),
            form: text(&record.specification_form),
            additional_specs: record.additional_specifications.clone(),
        },
        origin: Origin {
            source: labeler.label(&labels::ORIGIN, &record.origin),
        },
        contamination: Contamination {
            level: labeler.label(&labels::CONTAMINATION, &record.contamination),
            additives: labeler.labels(&labels::ADDITIVES, &record.additives),
            storage: labeler.label(&labels::STORAGE, &record.storage_conditions),
        },
        processing: Processing {
            methods: labeler.labels(&labels::PROCESSING, &record.processing_methods),
        },

        location: Location {
            country: text(&location.country),
            region: text(&location.state_province),
            city: text(&location.city),
            delivery_options: labeler.labels(&labels::DELIVERY, &record.delivery_options),
            full_address: text(&location.address_line),
            postal_code: text(&location.postal_code),
        },
        quantity: Quantity {
            available: number(record.available_quantity.as_ref(), "available_quantity")?,
            unit: labeler.label(&labels::UNIT, &record.unit_of_measurement),
            minimum_order: number(record.minimum_order_quantity.as_ref(), "minimum_order_quantity")?,
            packaging,
        },
        price: map_price(record)?,

        images: Vec::new(),
        existing_image_url: record.image.clone().filter(|url| !url.trim().is_empty()),
        title: text(&record.title),
        description: text(&record.description),
        keywords: record
            .keywords
            .as_deref()
            .map(Keywords::parse_csv)
            .unwrap_or_default(),
    })
}

fn resolve_classification(
    record: &FullAdRecord,
    taxonomy: &Taxonomy,
) -> Result<(String, String), DomainError> {
    let Some(category_id) = record.category else {
        return Ok((text(&record.category_name), text(&record.subcategory_name)));
    };

    let category = taxonomy.category_by_id(category_id).ok_or_else(|| {
        DomainError::new(
            ErrorCode::UnknownCategory,
            format!("Category {} is not in the taxonomy", category_id),
        )
    })?;

    let subcategory = match record.subcategory {
        None => text(&record.subcategory_name),
        Some(id) => category
            .subcategory_by_id(id)
            .map(|s| s.name.clone())
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::UnknownSubcategory,
                    format!("Subcategory {} does not belong to {}", id, category.name),
                )
            })?,
    };

    Ok((category.name.clone(), subcategory))
}

fn map_price(record: &FullAdRecord) -> Result<Price, DomainError> {
    let custom_days = record.custom_auction_duration.filter(|days| *days > 0);
    let (auction_duration, custom_auction_duration) = match (custom_days, record.auction_duration) {
        (Some(days), _) => (Some(AuctionDuration::Custom), days),
        (None, Some(days)) => match AuctionDuration::from_days(days) {
            Some(fixed) => (Some(fixed), 0),
            // Lengths outside the offered set can only come from a custom end date.
            None if days > 0 => (Some(AuctionDuration::Custom), days),
            None => (None, 0),
        },
        (None, None) => (None, 0),
    };

    let reserve_price = record
        .reserve_price
        .as_ref()
        .map(|value| number(Some(value), "reserve_price"))
        .transpose()?;

    Ok(Price {
        base_price: number(record.starting_bid_price.as_ref(), "starting_bid_price")?,
        currency: record
            .currency
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| Price::default().currency),
        auction_duration,
        reserve_price,
        custom_auction_duration,
        allow_broker_bids: record.allow_broker_bids.unwrap_or(false),
    })
}

struct Labeler<'a> {
    unmapped: &'a mut Vec<UnmappedCode>,
}

impl Labeler<'_> {
    fn label(&mut self, table: &LabelTable, code: &Option<String>) -> String {
        match code.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            Some(code) => self.convert(table, code),
            None => String::new(),
        }
    }

    fn labels(&mut self, table: &LabelTable, codes: &[String]) -> Vec<String> {
        codes
            .iter()
            .map(|code| code.trim())
            .filter(|code| !code.is_empty())
            .map(|code| self.convert(table, code))
            .collect()
    }

    fn convert(&mut self, table: &LabelTable, code: &str) -> String {
        if !table.has_code(code) {
            let already_labeled = table.labels().any(|l| l.eq_ignore_ascii_case(code));
            if !already_labeled {
                self.unmapped.push(UnmappedCode {
                    field: table.field(),
                    code: code.to_string(),
                });
            }
        }
        table.to_label(code)
    }
}

fn text(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

fn number(value: Option<&NumericField>, field: &str) -> Result<f64, DomainError> {
    let parsed = value.map(|v| v.to_f64(field)).transpose().map_err(|err| {
        DomainError::new(ErrorCode::MalformedRecord, err.to_string()).with_detail("field", field)
    })?;
    Ok(parsed.unwrap_or(0.0))
}
