//! Application state shared by all commands.
//!
//! Holds the API client and the session, and owns the auth-failure rule:
//! an `Auth` error from any authenticated call ends the local session, so
//! the frontend guard sends the user back to the login view.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::{info, warn};

use crate::api::{ApiClient, HistoryEntry, RegisterRequest, SummarySnapshot, UploadReceipt};
use crate::error::FlowdeskError;
use crate::report;
use crate::session::{AuthToken, Credentials, SessionStore};
use crate::validation::{validate_login, RegistrationForm};

pub struct AppState {
    api: ApiClient,
    session: SessionStore,
}

impl AppState {
    pub fn new(api: ApiClient, session: SessionStore) -> Self {
        Self { api, session }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Validate locally, create the account, then log straight in.
    pub async fn register(&self, form: &RegistrationForm) -> Result<(), FlowdeskError> {
        form.validate()?;
        let credentials = form.credentials();
        let request = RegisterRequest::new(&credentials.username, form.email.trim(), &credentials.password);
        self.api.register(&request).await?;
        self.session.login(AuthToken::from_credentials(&credentials))
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<(), FlowdeskError> {
        validate_login(credentials)?;
        let token = self.api.login(credentials).await?;
        self.session.login(token)
    }

    pub fn logout(&self) -> Result<(), FlowdeskError> {
        self.session.logout()
    }

    /// Upload a file handed over from the frontend as Base64.
    pub async fn upload_csv(
        &self,
        file_name: &str,
        content_base64: &str,
    ) -> Result<UploadReceipt, FlowdeskError> {
        let bytes = STANDARD.decode(content_base64.trim()).map_err(|e| {
            warn!("Could not decode upload {}: {}", file_name, e);
            FlowdeskError::Upload("Could not read the selected file".to_string())
        })?;
        if bytes.is_empty() {
            return Err(FlowdeskError::Upload("The selected file is empty".to_string()));
        }

        let token = self.session.token();
        let result = self.api.upload_csv(token.as_ref(), file_name, bytes).await;
        self.expire_on_auth(result)
    }

    pub async fn get_summary(&self) -> Result<Option<SummarySnapshot>, FlowdeskError> {
        let token = self.session.token();
        let result = self.api.get_summary(token.as_ref()).await;
        self.expire_on_auth(result)
    }

    pub async fn get_history(&self) -> Result<Vec<HistoryEntry>, FlowdeskError> {
        let token = self.session.token();
        let result = self.api.get_history(token.as_ref()).await;
        self.expire_on_auth(result)
    }

    /// Fetch the PDF report and save it under `dir`.
    pub async fn download_report(&self, dir: &Path) -> Result<PathBuf, FlowdeskError> {
        let token = self.session.token();
        let bytes = self.expire_on_auth(self.api.download_pdf(token.as_ref()).await)?;
        report::save_report(dir, &bytes)
    }

    fn expire_on_auth<T>(&self, result: Result<T, FlowdeskError>) -> Result<T, FlowdeskError> {
        if let Err(err) = &result {
            if err.is_auth() && self.session.is_authenticated() {
                info!("Backend rejected the stored session, logging out");
                if let Err(e) = self.session.logout() {
                    warn!("Failed to clear rejected session: {}", e);
                }
            }
        }
        result
    }
}
