//! Tauri commands for the upload, summary and history views.

use tauri::State;

use crate::api::{HistoryEntry, SummarySnapshot, UploadReceipt};
use crate::error::FlowdeskError;
use crate::state::AppState;

/// Upload a CSV. The frontend reads the file and sends its bytes as Base64.
#[tauri::command]
pub async fn upload_csv(
    state: State<'_, AppState>,
    file_name: String,
    content_base64: String,
) -> Result<UploadReceipt, FlowdeskError> {
    state.upload_csv(&file_name, &content_base64).await
}

/// Latest summary, `None` if nothing was uploaded yet.
#[tauri::command]
pub async fn get_summary(
    state: State<'_, AppState>,
) -> Result<Option<SummarySnapshot>, FlowdeskError> {
    state.get_summary().await
}

#[tauri::command]
pub async fn get_history(state: State<'_, AppState>) -> Result<Vec<HistoryEntry>, FlowdeskError> {
    state.get_history().await
}
