use leptos::prelude::*;

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <div class="page landing-page">
            <h1 class="landing-title">"Flowdesk"</h1>
            <p class="landing-tagline">"Chemical Data Intelligence, Simplified."</p>
            <p class="page-description">
                "Upload equipment CSV exports, review aggregate parameters and keep a history of every dataset."
            </p>
            <a href="/auth" class="btn btn-primary">"Login"</a>
        </div>
    }
}
