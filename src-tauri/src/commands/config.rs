use std::time::Duration;

use tauri::AppHandle;
use tauri_plugin_store::StoreExt;
use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::error::FlowdeskError;

pub const PREFERENCES_STORE: &str = "preferences.json";
pub const API_BASE_URL_KEY: &str = "api_base_url";

#[tauri::command]
pub fn get_preference(app: AppHandle, key: &str) -> Result<Option<String>, FlowdeskError> {
    info!("Getting preference: {}", key);
    read_preference(&app, key)
}

/// Store a preference. The API URL is validated first and takes effect on next launch.
#[tauri::command]
pub fn set_preference(app: AppHandle, key: &str, value: &str) -> Result<(), FlowdeskError> {
    info!("Setting preference: {} = {}", key, value);
    if key == API_BASE_URL_KEY && !value.trim().is_empty() {
        ClientConfig::new(value, Duration::from_secs(1))?;
    }

    let store = app.store(PREFERENCES_STORE).map_err(|e| {
        warn!("Failed to open store: {}", e);
        FlowdeskError::Config(e.to_string())
    })?;
    store.set(key, serde_json::json!(value));
    store.save().map_err(|e| {
        warn!("Failed to save store: {}", e);
        FlowdeskError::Config(e.to_string())
    })
}

pub fn read_preference(app: &AppHandle, key: &str) -> Result<Option<String>, FlowdeskError> {
    let store = app.store(PREFERENCES_STORE).map_err(|e| {
        warn!("Failed to open store: {}", e);
        FlowdeskError::Config(e.to_string())
    })?;
    Ok(store
        .get(key)
        .and_then(|v| v.as_str().map(|s| s.to_string()))
        .filter(|s| !s.is_empty()))
}
