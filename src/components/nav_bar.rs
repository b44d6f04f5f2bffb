use leptos::prelude::*;

use crate::session::use_session;
use crate::theme::ThemeContext;

/// Top bar shared by the upload and history views.
#[component]
pub fn NavBar(
    /// Invoked by the "Download PDF" button.
    #[prop(into)]
    on_download: Callback<()>,
    #[prop(into)] downloading: Signal<bool>,
) -> impl IntoView {
    let session = use_session();
    let theme = expect_context::<ThemeContext>();

    view! {
        <nav class="nav">
            <div class="nav-brand">
                <h2>"Chemical Equipment Visualizer"</h2>
            </div>
            <div class="nav-links">
                <a href="/upload" class="nav-link">"Upload"</a>
                <a href="/history" class="nav-link">"History"</a>
                <button
                    class="btn btn-secondary"
                    on:click=move |_| on_download.run(())
                    disabled=move || downloading.get()
                >
                    {move || if downloading.get() { "Downloading..." } else { "Download PDF" }}
                </button>
                <button class="btn btn-secondary" on:click=move |_| theme.toggle()>
                    {move || theme.theme.get().toggle_label()}
                </button>
                <button class="btn btn-secondary" on:click=move |_| session.logout()>
                    "Logout"
                </button>
            </div>
        </nav>
    }
}

/// Blocking browser dialog for outcomes the user must acknowledge.
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
