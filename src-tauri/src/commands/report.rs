use tauri::{AppHandle, Manager, State};
use tracing::info;

use crate::error::FlowdeskError;
use crate::report::default_report_dir;
use crate::state::AppState;

/// Download the PDF report and return the path it was saved to.
#[tauri::command]
pub async fn download_pdf(
    app: AppHandle,
    state: State<'_, AppState>,
) -> Result<String, FlowdeskError> {
    let dir = default_report_dir()
        .or_else(|| app.path().app_data_dir().ok())
        .ok_or_else(|| FlowdeskError::Report("No folder available to save the report".to_string()))?;

    info!("Downloading report into {:?}", dir);
    let path = state.download_report(&dir).await?;
    Ok(path.to_string_lossy().to_string())
}
