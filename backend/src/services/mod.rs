//! Business logic services for StockPoint

pub mod analytics;
pub mod auth;
pub mod backup;
pub mod items;
pub mod transactions;

pub use analytics::AnalyticsService;
pub use auth::AuthService;
pub use backup::BackupService;
pub use items::ItemService;
pub use transactions::{TransactionFilter, TransactionService};
