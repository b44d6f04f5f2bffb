//! Upload view: pick a CSV, send it, and visualize the resulting summary.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use leptos::html::Input;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, EquipmentSummary};
use crate::components::charts::{AverageBarChart, TypePieChart};
use crate::components::equipment_table::EquipmentTable;
use crate::components::nav_bar::{alert, NavBar};
use crate::components::summary_cards::SummaryCards;
use crate::format::{report_guard, report_password};
use crate::session::use_session;

#[component]
pub fn UploadPage() -> impl IntoView {
    let session = use_session();

    let (summary, set_summary) = signal::<Option<EquipmentSummary>>(None);
    let (uploading, set_uploading) = signal(false);
    let (downloading, set_downloading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (notice, set_notice) = signal::<Option<String>>(None);
    let file_input = NodeRef::<Input>::new();

    // Latest summary on mount; failures just leave the empty state
    spawn_local(async move {
        match commands::get_summary().await {
            Ok(Some(snapshot)) => set_summary.set(Some(snapshot.summary)),
            Ok(None) => {}
            Err(e) => {
                session.absorb(&e);
                web_sys::console::warn_1(&format!("No summary loaded: {}", e).into());
            }
        }
    });

    let on_upload = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);
        set_notice.set(None);

        let Some(input) = file_input.get() else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            set_error.set(Some("Please select a file".to_string()));
            return;
        };

        set_uploading.set(true);
        spawn_local(async move {
            let name = file.name();
            let result = match read_file_as_base64(file).await {
                Ok(content) => commands::upload_csv(&name, &content).await.map_err(|e| {
                    session.absorb(&e);
                    e.to_string()
                }),
                Err(e) => Err(e),
            };
            match result {
                Ok(receipt) => {
                    set_summary.set(Some(receipt.summary));
                    input.set_value("");
                }
                Err(msg) => set_error.set(Some(msg)),
            }
            set_uploading.set(false);
        });
    };

    let on_download = Callback::new(move |_: ()| {
        set_error.set(None);
        set_notice.set(None);

        let total_count = match summary.with_untracked(|s| report_guard(s.as_ref())) {
            Ok(count) => count,
            Err(msg) => {
                set_error.set(Some(msg.to_string()));
                return;
            }
        };

        set_downloading.set(true);
        spawn_local(async move {
            match commands::download_pdf().await {
                Ok(path) => {
                    let password = report_password(total_count);
                    alert(&format!(
                        "PDF saved to {}\n\nThe PDF is password protected.\nPassword: {}",
                        path, password
                    ));
                    set_notice.set(Some(format!("Report saved to {} (password: {})", path, password)));
                }
                Err(e) => {
                    session.absorb(&e);
                    let message = e.to_string();
                    alert(&message);
                    set_error.set(Some(message));
                }
            }
            set_downloading.set(false);
        });
    });

    view! {
        <NavBar on_download=on_download downloading=downloading />
        <div class="page upload-page">
            <div class="card upload-card">
                <h2>"Upload Equipment CSV"</h2>
                <form on:submit=on_upload class="upload-form">
                    <input type="file" accept=".csv" class="input" node_ref=file_input />
                    <button type="submit" class="btn btn-primary" disabled=move || uploading.get()>
                        {move || if uploading.get() { "Uploading..." } else { "Upload" }}
                    </button>
                </form>
                {move || error.get().map(|msg| view! { <p class="error-message">{msg}</p> })}
                {move || notice.get().map(|msg| view! { <p class="success-message">{msg}</p> })}
            </div>

            {move || match summary.get() {
                None => view! {
                    <div class="card empty-state">
                        <p>"Upload a CSV file to see equipment statistics."</p>
                    </div>
                }.into_any(),
                Some(s) => view! {
                    <SummaryCards summary=s.clone() />
                    <div class="charts">
                        <TypePieChart distribution=s.type_distribution.clone() />
                        <AverageBarChart summary=s.clone() />
                    </div>
                    <div class="card">
                        <h3>"Equipment Data"</h3>
                        <EquipmentTable rows=s.equipment_data />
                    </div>
                }.into_any(),
            }}
        </div>
    }
}

/// Read the selected file and Base64-encode it for the command bridge.
async fn read_file_as_base64(file: web_sys::File) -> Result<String, String> {
    use js_sys::{ArrayBuffer, Uint8Array};
    use wasm_bindgen_futures::JsFuture;

    let array_buffer: ArrayBuffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Failed to read file: {:?}", e))?
        .dyn_into()
        .map_err(|_| "Failed to read file".to_string())?;

    let bytes = Uint8Array::new(&array_buffer).to_vec();
    Ok(STANDARD.encode(bytes))
}
