//! HTTP implementation of [`AuctionApi`] on top of reqwest.
//!
//! # Endpoints
//!
//! | Operation | Request |
//! |-----------|---------|
//! | create draft | `POST /api/ads/step/1/` (JSON) |
//! | update step | `PUT /api/ads/{id}/step/{n}/` (JSON) |
//! | final step | `PUT /api/ads/{id}/step/8/` (multipart) |
//! | ad detail | `GET /api/ads/{id}/` |
//! | categories | `GET /api/category/categories/` |
//!
//! Every request carries the configured bearer token when one is set.
//! Requests are sent once; retrying is left to the user.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use super::envelope::{CreatedAd, Envelope, ErrorBody};
use crate::config::ApiConfig;
use crate::domain::foundation::AdId;
use crate::domain::listing::payload::IMAGE_FIELD;
use crate::domain::listing::{Category, FinalStepForm, FullAdRecord, ImageFile, MaterialTypePayload};
use crate::domain::wizard::BackendStep;
use crate::ports::{ApiError, AuctionApi, CreatedDraft, StepUpdate};

/// Marketplace REST client.
pub struct HttpAuctionApi {
    client: Client,
    base_url: String,
    auth_token: Option<Secret<String>>,
    timeout: Duration,
}

impl HttpAuctionApi {
    /// Creates a client from configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.normalized_base_url().to_string(),
            auth_token: if config.has_auth_token() {
                config.auth_token.clone()
            } else {
                None
            },
            timeout: config.timeout(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn step_url(&self, ad_id: AdId, step: BackendStep) -> String {
        self.url(&format!("/api/ads/{}/step/{}/", ad_id, step))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    /// Sends a request, mapping transport failures.
    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        self.authorize(request)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))
    }

    fn map_transport_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else if e.is_connect() {
            ApiError::network(format!("Connection failed: {}", e))
        } else {
            ApiError::network(e.to_string())
        }
    }

    /// Reads the body, turning non-2xx statuses into `Rejected`.
    async fn read_body<T: DeserializeOwned>(&self, response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !status.is_success() {
            let error = ErrorBody::into_api_error(status.as_u16(), &body);
            tracing::debug!(status = status.as_u16(), error = %error, "Marketplace rejected request");
            return Err(error);
        }

        serde_json::from_str(&body).map_err(|e| ApiError::parse(e.to_string()))
    }

    fn image_part(image: &ImageFile) -> Part {
        let part = Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
        match part.mime_str(&image.content_type) {
            Ok(part) => part,
            Err(_) => Part::bytes(image.bytes.clone()).file_name(image.file_name.clone()),
        }
    }

    fn final_step_multipart(form: &FinalStepForm) -> Form {
        let multipart = Form::new()
            .text("title", form.title.clone())
            .text("description", form.description.clone())
            .text("keywords", form.keywords.clone());
        match &form.image {
            Some(image) => multipart.part(IMAGE_FIELD, Self::image_part(image)),
            None => multipart,
        }
    }
}

/// Categories arrive either bare or wrapped in the envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum CategoriesBody {
    Bare(Vec<Category>),
    Wrapped(Envelope<Vec<Category>>),
}

#[async_trait]
impl AuctionApi for HttpAuctionApi {
    async fn create_draft_step1(&self, payload: &MaterialTypePayload) -> Result<CreatedDraft, ApiError> {
        tracing::debug!(category = payload.category, subcategory = payload.subcategory, "Creating draft");

        let response = self
            .send(self.client.post(self.url("/api/ads/step/1/")).json(payload))
            .await?;
        let envelope: Envelope<CreatedAd> = self.read_body(response).await?;
        let step_completion_status = envelope.step_completion_status.clone();
        let created = envelope.into_data("create draft")?;

        tracing::info!(ad_id = %created.id, "Draft created");
        Ok(CreatedDraft {
            ad_id: created.id,
            step_completion_status,
        })
    }

    async fn update_draft_step(
        &self,
        ad_id: AdId,
        step: BackendStep,
        payload: &serde_json::Value,
    ) -> Result<StepUpdate, ApiError> {
        tracing::debug!(%ad_id, %step, "Updating draft step");

        let response = self
            .send(self.client.put(self.step_url(ad_id, step)).json(payload))
            .await?;
        let envelope: Envelope<serde_json::Value> = self.read_body(response).await?;

        Ok(StepUpdate {
            step_completion_status: envelope.step_completion_status,
            is_complete: envelope.is_complete,
        })
    }

    async fn update_final_step(&self, ad_id: AdId, form: &FinalStepForm) -> Result<StepUpdate, ApiError> {
        tracing::debug!(%ad_id, has_image = form.image.is_some(), "Uploading final step");

        let request = self
            .client
            .put(self.step_url(ad_id, BackendStep::FINAL))
            .multipart(Self::final_step_multipart(form));
        let response = self.send(request).await?;
        let envelope: Envelope<serde_json::Value> = self.read_body(response).await?;

        Ok(StepUpdate {
            step_completion_status: envelope.step_completion_status,
            is_complete: envelope.is_complete,
        })
    }

    async fn get_full_ad_detail(&self, ad_id: AdId) -> Result<FullAdRecord, ApiError> {
        let response = self
            .send(self.client.get(self.url(&format!("/api/ads/{}/", ad_id))))
            .await?;
        let envelope: Envelope<FullAdRecord> = self.read_body(response).await?;
        let status = envelope.step_completion_status.clone();
        let is_complete = envelope.is_complete;
        let mut record = envelope.into_data("ad detail")?;

        // Completion may be reported beside the record instead of inside it.
        if record.step_completion_status.is_empty() {
            record.step_completion_status = status;
        }
        record.is_complete |= is_complete;
        Ok(record)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let response = self
            .send(self.client.get(self.url("/api/category/categories/")))
            .await?;
        match self.read_body::<CategoriesBody>(response).await? {
            CategoriesBody::Bare(categories) => Ok(categories),
            CategoriesBody::Wrapped(envelope) => envelope.into_data("categories"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn urls_are_built_without_double_slashes() {
        let api = HttpAuctionApi::new(&config("https://market.example.com/")).unwrap();
        assert_eq!(
            api.step_url(AdId::new(7), BackendStep::new(6)),
            "https://market.example.com/api/ads/7/step/6/"
        );
        assert_eq!(api.url("/api/ads/step/1/"), "https://market.example.com/api/ads/step/1/");
    }

    #[test]
    fn blank_token_is_not_sent() {
        let api = HttpAuctionApi::new(&ApiConfig {
            auth_token: Some(Secret::new(String::new())),
            ..config("http://localhost:8000")
        })
        .unwrap();
        assert!(api.auth_token.is_none());
    }

    #[test]
    fn categories_body_accepts_bare_and_wrapped() {
        let bare: CategoriesBody =
            serde_json::from_str(r#"[{"id": 1, "name": "Plastics", "subcategories": []}]"#).unwrap();
        assert!(matches!(bare, CategoriesBody::Bare(c) if c.len() == 1));

        let wrapped: CategoriesBody =
            serde_json::from_str(r#"{"data": [{"id": 2, "name": "Metals"}]}"#).unwrap();
        assert!(matches!(wrapped, CategoriesBody::Wrapped(_)));
    }
}
