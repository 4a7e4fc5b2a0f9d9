//! HydrateDraftHandler - opens a saved ad for editing.
//!
//! Categories and the ad detail are fetched concurrently; both are needed
//! before the draft can be rebuilt. A fetch failure is returned to the
//! caller. A record that cannot be mapped still opens, with a minimal
//! draft, and the report says so.

use std::sync::Arc;
use thiserror::Error;

use crate::application::WizardSession;
use crate::domain::foundation::AdId;
use crate::domain::listing::Taxonomy;
use crate::domain::wizard::{hydrate, HydrationReport};
use crate::ports::{ApiError, AuctionApi, Notifier, Toast};

/// Errors from opening a saved ad.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HydrateDraftError {
    #[error("Failed to load ad: {0}")]
    Api(#[from] ApiError),
}

/// Result of successful hydration.
pub struct HydrateDraftResult {
    pub session: WizardSession,
    pub report: HydrationReport,
}

/// Handler for opening an ad in edit mode.
pub struct HydrateDraftHandler {
    api: Arc<dyn AuctionApi>,
    notifier: Arc<dyn Notifier>,
}

impl HydrateDraftHandler {
    pub fn new(api: Arc<dyn AuctionApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    pub async fn handle(&self, ad_id: AdId) -> Result<HydrateDraftResult, HydrateDraftError> {
        let loaded = futures::try_join!(
            self.api.list_categories(),
            self.api.get_full_ad_detail(ad_id)
        );
        let (categories, record) = match loaded {
            Ok(loaded) => loaded,
            Err(err) => {
                tracing::warn!(%ad_id, error = %err, "Failed to load ad for editing");
                self.notifier.notify(Toast::error(err.user_message()));
                return Err(err.into());
            }
        };

        let taxonomy = Taxonomy::new(categories);
        let hydrated = hydrate(&record, &taxonomy);
        let report = hydrated.report.clone();

        if report.used_fallback() {
            self.notifier.notify(Toast::info(
                "Some saved details could not be loaded. Please review each step.",
            ));
        }
        tracing::info!(
            %ad_id,
            active_step = hydrated.state.active_step_id(),
            unmapped = report.unmapped_codes.len(),
            fallback = report.used_fallback(),
            "Ad hydrated for editing"
        );

        let session = WizardSession::edit(
            Arc::clone(&self.api),
            Arc::clone(&self.notifier),
            taxonomy,
            hydrated,
        );
        Ok(HydrateDraftResult { session, report })
    }
}
