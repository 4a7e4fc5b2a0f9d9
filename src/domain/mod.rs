//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, state machine trait)
//! - `listing` - The auction draft, its value objects and backend shapes
//! - `wizard` - Step computation, validation, state container and hydration

pub mod foundation;
pub mod listing;
pub mod wizard;
