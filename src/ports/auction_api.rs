//! Auction API Port - Interface to the marketplace backend.
//!
//! The wizard only needs five operations: create a draft from step 1,
//! update any later step, upload the final step as a multipart form, read
//! back a saved ad, and list the category taxonomy.
//!
//! # Error contract
//!
//! A non-2xx response carries `{error, details?}`. `details` maps field
//! names to messages and is surfaced as [`ApiError::Rejected::details`] so
//! the wizard can show the messages inline.

use async_trait::async_trait;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::foundation::AdId;
use crate::domain::listing::{Category, FinalStepForm, FullAdRecord, MaterialTypePayload};
use crate::domain::wizard::{BackendStep, StepCompletionStatus};

/// Port for the marketplace's ad endpoints.
#[async_trait]
pub trait AuctionApi: Send + Sync {
    /// Creates a draft ad from step 1 and returns its id.
    async fn create_draft_step1(&self, payload: &MaterialTypePayload) -> Result<CreatedDraft, ApiError>;

    /// Saves one step of an existing draft.
    async fn update_draft_step(
        &self,
        ad_id: AdId,
        step: BackendStep,
        payload: &serde_json::Value,
    ) -> Result<StepUpdate, ApiError>;

    /// Saves the final step as a multipart form.
    async fn update_final_step(&self, ad_id: AdId, form: &FinalStepForm) -> Result<StepUpdate, ApiError>;

    /// Loads everything saved for an ad.
    async fn get_full_ad_detail(&self, ad_id: AdId) -> Result<FullAdRecord, ApiError>;

    /// Lists categories with their subcategories.
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError>;
}

/// Result of creating a draft.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedDraft {
    pub ad_id: AdId,
    pub step_completion_status: StepCompletionStatus,
}

/// Result of saving a step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepUpdate {
    pub step_completion_status: StepCompletionStatus,
    /// True once the backend considers the whole ad complete.
    pub is_complete: bool,
}

/// Errors from the marketplace API.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request did not complete within the configured timeout.
    #[error("Connection timeout after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// No usable response (connection failure, non-JSON error page).
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a structured error.
    #[error("{message}")]
    Rejected {
        status: u16,
        message: String,
        details: BTreeMap<String, Vec<String>>,
    },

    /// A success response that could not be decoded.
    #[error("Unexpected response: {0}")]
    Parse(String),
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        ApiError::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        ApiError::Parse(message.into())
    }

    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        ApiError::Rejected {
            status,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    /// Adds field messages to a `Rejected` error; no-op for other variants.
    pub fn with_field_error(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        if let ApiError::Rejected { details, .. } = &mut self {
            details.entry(field.into()).or_default().push(message.into());
        }
        self
    }

    /// Field-level messages, when the backend sent any.
    pub fn field_errors(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        match self {
            ApiError::Rejected { details, .. } if !details.is_empty() => Some(details),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout { .. })
    }

    /// Text for a toast.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Timeout { .. } => {
                "Connection timeout. Please check your connection and try again.".to_string()
            }
            ApiError::Network(_) | ApiError::Parse(_) => {
                "Something went wrong. Please try again.".to_string()
            }
            ApiError::Rejected { message, .. } => message.clone(),
        }
    }
}
