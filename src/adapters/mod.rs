//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the wizard to external systems:
//! - `http` - the marketplace REST backend (reqwest)
//! - `notify` - toast sinks (tracing log, in-memory)

pub mod http;
pub mod notify;

pub use http::HttpAuctionApi;
pub use notify::{InMemoryNotifier, TracingNotifier};
