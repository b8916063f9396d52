//! HTTP handlers for StockPoint

pub mod auth;
pub mod backup;
pub mod health;
pub mod inventory;
pub mod stats;
pub mod transactions;

pub use auth::*;
pub use backup::*;
pub use health::*;
pub use inventory::*;
pub use stats::*;
pub use transactions::*;
