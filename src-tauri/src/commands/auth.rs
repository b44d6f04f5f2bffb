use tauri::State;
use tracing::info;

use crate::error::FlowdeskError;
use crate::session::Credentials;
use crate::state::AppState;
use crate::validation::RegistrationForm;

#[tauri::command]
pub async fn register(
    state: State<'_, AppState>,
    form: RegistrationForm,
) -> Result<(), FlowdeskError> {
    info!("Register requested for: {}", form.username);
    state.register(&form).await
}

#[tauri::command]
pub async fn login(
    state: State<'_, AppState>,
    username: String,
    password: String,
) -> Result<(), FlowdeskError> {
    let credentials = Credentials::new(username, password);
    state.login(&credentials).await
}

#[tauri::command]
pub fn logout(state: State<'_, AppState>) -> Result<(), FlowdeskError> {
    info!("Logout requested");
    state.logout()
}

/// Whether a session token is held. Used by the frontend guard at startup.
#[tauri::command]
pub fn session_status(state: State<'_, AppState>) -> bool {
    state.session().is_authenticated()
}
