//! Listing module - the auction draft and its backend representations.
//!
//! - `draft` - the in-memory draft and its per-step slices
//! - `duration` / `keywords` - value objects with their own rules
//! - `labels` - display label <-> backend code tables
//! - `taxonomy` - category/subcategory list
//! - `payload` - draft slices to backend request bodies
//! - `record` - the backend's full ad representation

mod draft;
mod duration;
mod keywords;
pub mod labels;
pub mod payload;
mod record;
mod taxonomy;

pub use draft::{
    AuctionDraft, Contamination, ImageFile, Location, Origin, Price, Processing, Quantity,
    Specifications,
};
pub use duration::AuctionDuration;
pub use keywords::{KeywordError, Keywords, KEYWORD_SEPARATOR, MAX_KEYWORDS_LENGTH};
pub use payload::{FinalStepForm, MaterialTypePayload};
pub use record::{FullAdRecord, LocationRecord, NumericField};
pub use taxonomy::{Category, Subcategory, Taxonomy};

#[cfg(test)]
pub(crate) use taxonomy::fixtures;
