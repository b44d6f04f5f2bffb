use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;
use wasm_bindgen_futures::spawn_local;

use crate::commands;
use crate::pages::auth::AuthPage;
use crate::pages::history::HistoryPage;
use crate::pages::landing::LandingPage;
use crate::pages::upload::UploadPage;
use crate::session::{guard, Route as Guarded, SessionContext, View};
use crate::theme::{apply_theme, Theme, ThemeContext, THEME_PREFERENCE};

#[component]
pub fn App() -> impl IntoView {
    let session = SessionContext::new();
    session.initialize();
    provide_context(session);

    let (theme, set_theme) = signal(Theme::Light);
    provide_context(ThemeContext { theme, set_theme });

    // Load saved theme preference on mount
    Effect::new(move |_| {
        spawn_local(async move {
            if let Ok(Some(saved)) = commands::get_preference(THEME_PREFERENCE).await {
                set_theme.set(Theme::from_preference(&saved));
            }
        });
    });

    // Apply and persist whenever the theme changes
    Effect::new(move |previous: Option<Theme>| {
        let current = theme.get();
        apply_theme(current);
        if previous.is_some_and(|p| p != current) {
            spawn_local(async move {
                let _ = commands::set_preference(THEME_PREFERENCE, current.as_str()).await;
            });
        }
        current
    });

    view! {
        <Show
            when=move || session.is_ready()
            fallback=|| view! { <div class="app-loading">"Loading..."</div> }
        >
            <Router>
                <main class="content">
                    <Routes fallback=|| view! { <p class="not-found">"Page not found"</p> }>
                        <Route path=path!("/") view=|| view! { <GuardedView view=View::Landing /> } />
                        <Route path=path!("/auth") view=|| view! { <GuardedView view=View::Auth /> } />
                        <Route path=path!("/login") view=|| view! { <Redirect path="/auth" /> } />
                        <Route path=path!("/upload") view=|| view! { <GuardedView view=View::Upload /> } />
                        <Route path=path!("/history") view=|| view! { <GuardedView view=View::History /> } />
                    </Routes>
                </main>
            </Router>
        </Show>
    }
}

/// Render `view` or redirect, re-evaluated whenever the session changes.
#[component]
fn GuardedView(view: View) -> impl IntoView {
    let session = expect_context::<SessionContext>();

    move || match guard(view, session.is_authenticated()) {
        Guarded::Redirect(path) => view! { <Redirect path=path /> }.into_any(),
        Guarded::Render(View::Landing) => view! { <LandingPage /> }.into_any(),
        Guarded::Render(View::Auth) => view! { <AuthPage /> }.into_any(),
        Guarded::Render(View::Upload) => view! { <UploadPage /> }.into_any(),
        Guarded::Render(View::History) => view! { <HistoryPage /> }.into_any(),
    }
}
