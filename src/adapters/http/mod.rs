//! HTTP adapter for the marketplace backend.

mod auction_client;
mod envelope;

pub use auction_client::HttpAuctionApi;
