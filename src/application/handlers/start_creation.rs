//! StartCreationHandler - opens an empty wizard for a new auction.

use std::sync::Arc;

use crate::application::WizardSession;
use crate::domain::listing::Taxonomy;
use crate::ports::{ApiError, AuctionApi, Notifier, Toast};

/// Handler for starting a new auction.
pub struct StartCreationHandler {
    api: Arc<dyn AuctionApi>,
    notifier: Arc<dyn Notifier>,
}

impl StartCreationHandler {
    pub fn new(api: Arc<dyn AuctionApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    /// Loads the category taxonomy and opens a creation session.
    pub async fn handle(&self) -> Result<WizardSession, ApiError> {
        let categories = match self.api.list_categories().await {
            Ok(categories) => categories,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load categories");
                self.notifier.notify(Toast::error(err.user_message()));
                return Err(err);
            }
        };

        let taxonomy = Taxonomy::new(categories);
        if taxonomy.is_empty() {
            tracing::warn!("Category list is empty; step 1 cannot be submitted");
        }

        Ok(WizardSession::create(
            Arc::clone(&self.api),
            Arc::clone(&self.notifier),
            taxonomy,
        ))
    }
}
