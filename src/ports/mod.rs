//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the wizard and the outside world. Adapters implement these ports.
//!
//! - `AuctionApi` - the marketplace REST backend
//! - `Notifier` - toasts shown to the user

mod auction_api;
mod notifier;

pub use auction_api::{ApiError, AuctionApi, CreatedDraft, StepUpdate};
pub use notifier::{Notifier, Toast, ToastLevel};
