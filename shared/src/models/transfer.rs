//! Bulk transfer document models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{InventoryItem, StockTransaction};

/// Bulk transfer document produced by an export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataExport {
    pub inventory: Vec<InventoryItem>,
    pub transactions: Vec<StockTransaction>,
    pub export_date: DateTime<Utc>,
}

/// Import payload. An exported document deserializes into this; the
/// export date is ignored on the way back in.
#[derive(Debug, Clone, Deserialize)]
pub struct DataImport {
    pub inventory: Vec<InventoryItem>,
    pub transactions: Vec<StockTransaction>,
}
