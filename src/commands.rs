use std::fmt;

use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

// -- Errors --

/// Error reported by a backend command: `{kind, message}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiError {
    pub kind: String,
    pub message: String,
}

impl ApiError {
    fn bridge(message: impl Into<String>) -> Self {
        Self {
            kind: "bridge".to_string(),
            message: message.into(),
        }
    }

    /// The backend rejected the stored credentials.
    pub fn is_auth(&self) -> bool {
        self.kind == "auth"
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

fn to_api_error(err: JsValue) -> ApiError {
    if let Some(text) = err.as_string() {
        return ApiError::bridge(text);
    }
    serde_wasm_bindgen::from_value::<ApiError>(err)
        .unwrap_or_else(|_| ApiError::bridge("Unknown error"))
}

async fn call<A, T>(cmd: &str, args: &A) -> Result<T, ApiError>
where
    A: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let args = serde_wasm_bindgen::to_value(args).map_err(|e| ApiError::bridge(e.to_string()))?;
    let result = invoke(cmd, args).await.map_err(to_api_error)?;
    serde_wasm_bindgen::from_value(result)
        .map_err(|e| ApiError::bridge(format!("Failed to parse response: {}", e)))
}

fn no_args() -> serde_json::Value {
    serde_json::json!({})
}

// -- Models matching backend structs --

/// Aggregates computed by the backend for one uploaded CSV.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EquipmentSummary {
    pub total_count: u64,
    #[serde(default)]
    pub avg_flowrate: f64,
    #[serde(default)]
    pub avg_pressure: f64,
    #[serde(default)]
    pub avg_temperature: f64,
    #[serde(default)]
    pub type_distribution: TypeDistribution,
    #[serde(default)]
    pub equipment_data: Vec<EquipmentRow>,
}

/// Type label -> count, in backend order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeDistribution(pub Vec<(String, u64)>);

impl TypeDistribution {
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(l, _)| l.as_str())
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|(_, c)| *c).sum()
    }
}

impl<'de> Deserialize<'de> for TypeDistribution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = TypeDistribution;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of equipment type to count")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
                let mut entries = Vec::new();
                while let Some(entry) = access.next_entry::<String, u64>()? {
                    entries.push(entry);
                }
                Ok(TypeDistribution(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EquipmentRow {
    #[serde(rename = "Equipment Name", default)]
    pub name: String,
    #[serde(rename = "Type", default)]
    pub equipment_type: String,
    #[serde(rename = "Flowrate", default)]
    pub flowrate: Option<f64>,
    #[serde(rename = "Pressure", default)]
    pub pressure: Option<f64>,
    #[serde(rename = "Temperature", default)]
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    /// RFC 3339, UTC.
    pub uploaded_at: String,
    pub summary: EquipmentSummary,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub message: String,
    pub dataset_id: Option<i64>,
    pub summary: EquipmentSummary,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SummarySnapshot {
    pub summary: EquipmentSummary,
    pub uploaded_at: Option<String>,
}

// -- Arg structs for serialization --

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

#[derive(Serialize)]
struct RegisterArgs<'a> {
    form: &'a RegistrationForm,
}

#[derive(Serialize)]
struct LoginArgs<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadCsvArgs<'a> {
    file_name: &'a str,
    content_base64: &'a str,
}

#[derive(Serialize)]
struct GetPreferenceArgs<'a> {
    key: &'a str,
}

#[derive(Serialize)]
struct SetPreferenceArgs<'a> {
    key: &'a str,
    value: &'a str,
}

// -- Session --

/// Create an account and log in with it.
pub async fn register(form: &RegistrationForm) -> Result<(), ApiError> {
    call("register", &RegisterArgs { form }).await
}

/// Verify credentials against the backend and store the session.
pub async fn login(username: &str, password: &str) -> Result<(), ApiError> {
    call("login", &LoginArgs { username, password }).await
}

pub async fn logout() -> Result<(), ApiError> {
    call("logout", &no_args()).await
}

/// Whether the backend holds a stored session. No network involved.
pub async fn session_status() -> Result<bool, ApiError> {
    call("session_status", &no_args()).await
}

// -- Data --

pub async fn upload_csv(file_name: &str, content_base64: &str) -> Result<UploadReceipt, ApiError> {
    call(
        "upload_csv",
        &UploadCsvArgs {
            file_name,
            content_base64,
        },
    )
    .await
}

/// Latest summary; `Ok(None)` when nothing has been uploaded yet.
pub async fn get_summary() -> Result<Option<SummarySnapshot>, ApiError> {
    call("get_summary", &no_args()).await
}

pub async fn get_history() -> Result<Vec<HistoryEntry>, ApiError> {
    call("get_history", &no_args()).await
}

/// Save the PDF report locally. Returns where it was written.
pub async fn download_pdf() -> Result<String, ApiError> {
    call("download_pdf", &no_args()).await
}

// -- Preferences --

pub async fn get_preference(key: &str) -> Result<Option<String>, ApiError> {
    call("get_preference", &GetPreferenceArgs { key }).await
}

pub async fn set_preference(key: &str, value: &str) -> Result<(), ApiError> {
    call("set_preference", &SetPreferenceArgs { key, value }).await
}
