//! HTTP handlers for bulk export and import

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::backup::ImportOutcome;
use crate::services::BackupService;
use crate::AppState;
use shared::models::{DataExport, DataImport};

/// Export the full catalog and ledger as one JSON document
pub async fn export_data(State(state): State<AppState>) -> AppResult<Json<DataExport>> {
    let service = BackupService::new(state.db);
    let export = service.export().await?;
    Ok(Json(export))
}

/// Replace all data with the supplied document
pub async fn import_data(
    State(state): State<AppState>,
    Json(data): Json<DataImport>,
) -> AppResult<Json<ImportOutcome>> {
    let service = BackupService::new(state.db);
    let outcome = service.import(data).await?;
    Ok(Json(outcome))
}
