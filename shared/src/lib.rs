//! Shared types and domain logic for StockPoint
//!
//! This crate contains the models, validation rules, stock-application
//! rules, and financial aggregation functions shared across the system.
//! It is persistence-agnostic: everything here operates on in-memory
//! snapshots.

pub mod analytics;
pub mod models;
pub mod stock;
pub mod validation;

pub use models::*;
