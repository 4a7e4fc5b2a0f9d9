//! Application handlers that open wizard sessions.

mod hydrate_draft;
mod start_creation;

pub use hydrate_draft::{HydrateDraftError, HydrateDraftHandler, HydrateDraftResult};
pub use start_creation::StartCreationHandler;
