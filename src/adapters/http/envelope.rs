//! Response bodies shared by every marketplace endpoint.

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::domain::foundation::AdId;
use crate::domain::wizard::StepCompletionStatus;
use crate::ports::ApiError;

/// Success envelope: `{data, step_completion_status, is_complete, message}`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub step_completion_status: StepCompletionStatus,
    #[serde(default)]
    pub is_complete: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// The payload, or a parse error naming the endpoint.
    pub fn into_data(self, endpoint: &str) -> Result<T, ApiError> {
        self.data
            .ok_or_else(|| ApiError::parse(format!("{} response has no data", endpoint)))
    }
}

/// The part of a created ad the wizard needs.
#[derive(Debug, Deserialize)]
pub struct CreatedAd {
    pub id: AdId,
}

/// A field message as sent by the backend: a list, or a bare string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FieldMessages {
    Many(Vec<String>),
    One(String),
}

impl FieldMessages {
    fn into_vec(self) -> Vec<String> {
        match self {
            FieldMessages::Many(messages) => messages,
            FieldMessages::One(message) => vec![message],
        }
    }
}

/// Error body: `{error, details?: {field: [msg]}}`.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: BTreeMap<String, FieldMessages>,
}

impl ErrorBody {
    /// Converts a non-2xx response body into an [`ApiError`].
    ///
    /// Bodies that are not JSON (proxy error pages) become `Network`.
    pub fn into_api_error(status: u16, body: &str) -> ApiError {
        let parsed = match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => parsed,
            Err(_) => {
                return ApiError::network(format!("HTTP {}: {}", status, truncate(body, 200)));
            }
        };

        let message = parsed
            .error
            .or(parsed.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status {}", status));

        ApiError::Rejected {
            status,
            message,
            details: parsed
                .details
                .into_iter()
                .map(|(field, messages)| (field, messages.into_vec()))
                .collect(),
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
