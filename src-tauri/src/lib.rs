pub mod api;
mod commands;
pub mod config;
pub mod error;
pub mod report;
pub mod session;
pub mod state;
pub mod validation;

pub use api::{ApiClient, EquipmentSummary, HistoryEntry, SummarySnapshot, UploadReceipt};
pub use error::FlowdeskError;
pub use state::AppState;

use anyhow::Context;
use tauri::Manager;

use crate::commands::config::{read_preference, API_BASE_URL_KEY};
use crate::config::ClientConfig;
use crate::session::{KeyringVault, SessionStore};

pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tauri::Builder::default()
        .plugin(tauri_plugin_store::Builder::new().build())
        .invoke_handler(tauri::generate_handler![
            commands::auth::register,
            commands::auth::login,
            commands::auth::logout,
            commands::auth::session_status,
            commands::data::upload_csv,
            commands::data::get_summary,
            commands::data::get_history,
            commands::report::download_pdf,
            commands::config::get_preference,
            commands::config::set_preference,
        ])
        .setup(|app| {
            let state = build_state(app.handle())?;
            app.manage(state);
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

/// Environment config, overridden by the saved API URL preference if any.
fn build_state(app: &tauri::AppHandle) -> anyhow::Result<AppState> {
    let mut config = ClientConfig::from_env().context("Invalid API configuration")?;

    match read_preference(app, API_BASE_URL_KEY) {
        Ok(Some(url)) => match config.clone().with_base_url(&url) {
            Ok(overridden) => config = overridden,
            Err(e) => tracing::warn!("Ignoring saved API URL {}: {}", url, e),
        },
        Ok(None) => {}
        Err(e) => tracing::warn!("Could not read preferences: {}", e),
    }

    let api = ApiClient::new(config).context("Failed to create API client")?;
    let session = SessionStore::initialize(Box::new(KeyringVault::new()));
    Ok(AppState::new(api, session))
}
