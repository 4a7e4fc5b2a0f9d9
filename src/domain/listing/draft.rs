//! AuctionDraft - the in-memory auction record the wizard builds up.
//!
//! A draft is a composite of per-step slices. Slices are plain data; the
//! rules about which are required live in the validation engine.

use serde::{Deserialize, Serialize};

use super::{AuctionDuration, Keywords};

/// Material grade, color and form. Plastics only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Specifications {
    pub grade: String,
    pub color: String,
    pub form: String,
    pub additional_specs: Vec<String>,
}

/// Where the material comes from. Plastics only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    pub source: String,
}

/// Contamination level, additives and storage. Plastics only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contamination {
    pub level: String,
    pub additives: Vec<String>,
    pub storage: String,
}

/// Processing methods the material suits. Plastics only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Processing {
    pub methods: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub country: String,
    pub region: String,
    pub city: String,
    pub delivery_options: Vec<String>,
    pub full_address: String,
    pub postal_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub available: f64,
    pub unit: String,
    pub minimum_order: f64,
    pub packaging: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub base_price: f64,
    pub currency: String,
    pub auction_duration: Option<AuctionDuration>,
    pub reserve_price: Option<f64>,
    /// Day count derived from the chosen end date when the duration is custom.
    pub custom_auction_duration: u32,
    pub allow_broker_bids: bool,
}

impl Default for Price {
    fn default() -> Self {
        Self {
            base_price: 0.0,
            currency: "EUR".to_string(),
            auction_duration: None,
            reserve_price: None,
            custom_auction_duration: 0,
            allow_broker_bids: false,
        }
    }
}

/// An image picked for upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// The draft auction record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuctionDraft {
    pub material_type: String,
    pub category: String,
    pub subcategory: String,
    pub specific_material: String,
    pub packaging: String,
    pub sell_frequency: String,

    pub specifications: Specifications,
    pub origin: Origin,
    pub contamination: Contamination,
    pub processing: Processing,

    pub location: Location,
    pub quantity: Quantity,
    pub price: Price,

    pub images: Vec<ImageFile>,
    /// Image already stored on the backend (edit mode).
    pub existing_image_url: Option<String>,
    pub title: String,
    pub description: String,
    pub keywords: Keywords,
}

impl AuctionDraft {
    /// Empty draft for the creation form.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when either a new image or a stored one is available.
    pub fn has_image(&self) -> bool {
        !self.images.is_empty()
            || self
                .existing_image_url
                .as_deref()
                .is_some_and(|url| !url.trim().is_empty())
    }

    /// The image that goes out with the final step; the backend takes one.
    pub fn upload_image(&self) -> Option<&ImageFile> {
        self.images.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_draft_has_no_image() {
        assert!(!AuctionDraft::new().has_image());
    }

    #[test]
    fn stored_image_url_counts_as_image() {
        let draft = AuctionDraft {
            existing_image_url: Some("https://cdn.example.com/ads/1.jpg".to_string()),
            ..AuctionDraft::default()
        };
        assert!(draft.has_image());
        assert!(draft.upload_image().is_none());
    }

    #[test]
    fn blank_image_url_does_not_count() {
        let draft = AuctionDraft {
            existing_image_url: Some("  ".to_string()),
            ..AuctionDraft::default()
        };
        assert!(!draft.has_image());
    }

    #[test]
    fn default_price_uses_euro() {
        assert_eq!(Price::default().currency, "EUR");
        assert!(Price::default().auction_duration.is_none());
    }
}
