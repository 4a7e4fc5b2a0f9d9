//! Auction Wizard - multi-step auction creation and editing
//!
//! This crate drives the listing wizard of an industrial-material
//! marketplace: it collects an auction draft step by step, decides which
//! steps apply to the selected material, validates each step, saves it
//! to the marketplace backend, autosaves in the background and reopens
//! saved ads for editing.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
