use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, HistoryEntry};
use crate::components::history_list::HistoryList;
use crate::components::nav_bar::{alert, NavBar};
use crate::format::history_report_guard;
use crate::session::use_session;

#[derive(Debug, Clone, PartialEq)]
enum HistoryState {
    Loading,
    Failed,
    Loaded(Vec<HistoryEntry>),
}

#[component]
pub fn HistoryPage() -> impl IntoView {
    let session = use_session();

    let (state, set_state) = signal(HistoryState::Loading);
    let (downloading, set_downloading) = signal(false);
    let (message, set_message) = signal::<Option<String>>(None);

    spawn_local(async move {
        match commands::get_history().await {
            Ok(entries) => set_state.set(HistoryState::Loaded(entries)),
            Err(e) => {
                session.absorb(&e);
                web_sys::console::error_1(&format!("History fetch failed: {}", e).into());
                set_state.set(HistoryState::Failed);
            }
        }
    });

    let on_download = Callback::new(move |_: ()| {
        set_message.set(None);
        let guard = state.with_untracked(|s| match s {
            HistoryState::Loaded(entries) => history_report_guard(Some(entries.as_slice())),
            _ => history_report_guard(None),
        });
        if let Err(msg) = guard {
            set_message.set(Some(msg.to_string()));
            return;
        }

        set_downloading.set(true);
        spawn_local(async move {
            match commands::download_pdf().await {
                Ok(path) => alert(&format!("PDF saved to {}", path)),
                Err(e) => {
                    session.absorb(&e);
                    alert(&e.to_string());
                    set_message.set(Some(e.to_string()));
                }
            }
            set_downloading.set(false);
        });
    });

    view! {
        <NavBar on_download=on_download downloading=downloading />
        <div class="page history-page">
            <h2>"Upload History"</h2>
            {move || message.get().map(|msg| view! { <p class="error-message">{msg}</p> })}
            {move || match state.get() {
                HistoryState::Loading => view! { <p class="history-loading">"Loading..."</p> }.into_any(),
                HistoryState::Failed => view! { <p class="error-message">"Failed to load history"</p> }.into_any(),
                HistoryState::Loaded(entries) if entries.is_empty() => {
                    view! { <p class="history-empty">"No upload history available"</p> }.into_any()
                }
                HistoryState::Loaded(entries) => view! { <HistoryList entries=entries /> }.into_any(),
            }}
        </div>
    }
}
