use reqwest::{multipart, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::payload::error_message;
use super::types::{HistoryEntry, RegisterRequest, SummarySnapshot, UploadReceipt};
use crate::config::ClientConfig;
use crate::error::FlowdeskError;
use crate::session::{AuthToken, Credentials};

const USER_AGENT: &str = concat!("Flowdesk/", env!("CARGO_PKG_VERSION"));

pub const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// HTTP client for the analytics backend.
///
/// Stateless with respect to the session: every authenticated call takes
/// the token to attach, or `None` to send the request anonymously.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, FlowdeskError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| FlowdeskError::Config(format!("Failed to build HTTP client: {}", e)))?;

        info!("API client targeting {}", config.base_url);
        Ok(Self { http, config })
    }

    /// Create an account. The caller derives the session token itself.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), FlowdeskError> {
        info!("Registering user: {}", request.username);
        let response = self
            .send(self.request(Method::POST, "register/", None)?.json(request))
            .await?;

        if response.status().is_success() {
            info!("Registered user: {}", request.username);
            return Ok(());
        }

        let status = response.status();
        let body = read_body(response).await;
        warn!("Registration of {} rejected with {}", request.username, status);
        Err(FlowdeskError::Validation(error_message(
            &body,
            "Registration failed. Please try again.",
        )))
    }

    /// Check credentials by fetching the history with a freshly derived token.
    ///
    /// Returns the token on success so the caller can store it.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthToken, FlowdeskError> {
        info!("Logging in as: {}", credentials.username);
        let token = AuthToken::from_credentials(credentials);
        let response = self
            .send(self.request(Method::GET, "history/", Some(&token))?)
            .await?;

        let status = response.status();
        if status.is_success() {
            info!("Credentials accepted for {}", credentials.username);
            return Ok(token);
        }

        warn!("Login for {} rejected with {}", credentials.username, status);
        if is_auth_status(status) {
            return Err(FlowdeskError::Auth(INVALID_CREDENTIALS.to_string()));
        }
        let body = read_body(response).await;
        Err(FlowdeskError::Auth(error_message(
            &body,
            "Login failed. Please try again.",
        )))
    }

    /// Upload a CSV as multipart field `file` and return the computed summary.
    pub async fn upload_csv(
        &self,
        token: Option<&AuthToken>,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadReceipt, FlowdeskError> {
        info!("Uploading {} ({} bytes)", file_name, bytes.len());
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("text/csv")
            .map_err(|e| FlowdeskError::Upload(format!("Invalid upload part: {}", e)))?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .send(self.request(Method::POST, "upload/", token)?.multipart(form))
            .await?;

        if !response.status().is_success() {
            return Err(failure(response, "Upload failed", FlowdeskError::Upload).await);
        }

        let receipt: UploadReceipt = parse_json(response).await?;
        info!(
            "Upload accepted as dataset {:?} with {} rows",
            receipt.dataset_id, receipt.summary.total_count
        );
        Ok(receipt)
    }

    /// Most recent summary, or `None` when nothing has been uploaded yet.
    pub async fn get_summary(
        &self,
        token: Option<&AuthToken>,
    ) -> Result<Option<SummarySnapshot>, FlowdeskError> {
        let response = self
            .send(self.request(Method::GET, "summary/", token)?)
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("No summary available yet");
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(failure(response, "Failed to load summary", FlowdeskError::Network).await);
        }

        parse_json(response).await.map(Some)
    }

    /// Past uploads in the order the backend lists them.
    pub async fn get_history(
        &self,
        token: Option<&AuthToken>,
    ) -> Result<Vec<HistoryEntry>, FlowdeskError> {
        let response = self
            .send(self.request(Method::GET, "history/", token)?)
            .await?;

        if !response.status().is_success() {
            return Err(failure(response, "Failed to load history", FlowdeskError::Network).await);
        }

        let entries: Vec<HistoryEntry> = parse_json(response).await?;
        info!("Fetched {} history entries", entries.len());
        Ok(entries)
    }

    /// Fetch the PDF report for the latest upload.
    pub async fn download_pdf(&self, token: Option<&AuthToken>) -> Result<Vec<u8>, FlowdeskError> {
        let response = self
            .send(self.request(Method::GET, "report/pdf/", token)?)
            .await?;

        if !response.status().is_success() {
            return Err(failure(response, "Failed to download PDF", FlowdeskError::Report).await);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FlowdeskError::Network(format!("Failed to read report: {}", e)))?;
        info!("Downloaded report ({} bytes)", bytes.len());
        Ok(bytes.to_vec())
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&AuthToken>,
    ) -> Result<RequestBuilder, FlowdeskError> {
        let url = self.config.endpoint(path)?;
        let builder = self.http.request(method, url);
        Ok(match token {
            Some(token) => builder.header(reqwest::header::AUTHORIZATION, token.header_value()),
            None => builder,
        })
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, FlowdeskError> {
        builder.send().await.map_err(|e| {
            warn!("Request to backend failed: {}", e);
            if e.is_timeout() {
                FlowdeskError::Network("The server took too long to respond".to_string())
            } else {
                FlowdeskError::Network(
                    "Could not reach the server. Check your connection and try again.".to_string(),
                )
            }
        })
    }
}

fn is_auth_status(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}

/// Map a non-success response: auth statuses become `Auth`, anything else
/// carries the flattened body in the call's own error kind.
async fn failure(
    response: Response,
    fallback: &str,
    kind: fn(String) -> FlowdeskError,
) -> FlowdeskError {
    let status = response.status();
    warn!("{} returned {}", response.url().path(), status);
    if is_auth_status(status) {
        return FlowdeskError::Auth(SESSION_EXPIRED.to_string());
    }
    let body = read_body(response).await;
    kind(error_message(&body, fallback))
}

async fn read_body(response: Response) -> String {
    response.text().await.unwrap_or_else(|e| {
        warn!("Failed to read error body: {}", e);
        String::new()
    })
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, FlowdeskError> {
    response.json::<T>().await.map_err(|e| {
        warn!("Unexpected response body: {}", e);
        FlowdeskError::Network(format!("Unexpected response from server: {}", e))
    })
}
