//! Session context and route guard.
//!
//! The backend owns the token; the frontend only tracks whether one is
//! held. `App` creates one [`SessionContext`] at startup and provides it to
//! every view through Leptos context.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, ApiError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Landing,
    Auth,
    Upload,
    History,
}

impl View {
    pub fn path(self) -> &'static str {
        match self {
            View::Landing => "/",
            View::Auth => "/auth",
            View::Upload => "/upload",
            View::History => "/history",
        }
    }

    fn requires_session(self) -> bool {
        matches!(self, View::Upload | View::History)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Render(View),
    Redirect(&'static str),
}

/// Decide whether `view` may be shown for the current session state.
pub fn guard(view: View, authenticated: bool) -> Route {
    if view.requires_session() && !authenticated {
        Route::Redirect(View::Auth.path())
    } else if view == View::Auth && authenticated {
        Route::Redirect(View::Upload.path())
    } else {
        Route::Render(view)
    }
}

#[derive(Clone, Copy)]
pub struct SessionContext {
    authenticated: ReadSignal<bool>,
    set_authenticated: WriteSignal<bool>,
    ready: ReadSignal<bool>,
    set_ready: WriteSignal<bool>,
}

impl SessionContext {
    pub fn new() -> Self {
        let (authenticated, set_authenticated) = signal(false);
        let (ready, set_ready) = signal(false);
        Self {
            authenticated,
            set_authenticated,
            ready,
            set_ready,
        }
    }

    /// Ask the backend whether a session was persisted. Routes stay hidden until this answers.
    pub fn initialize(&self) {
        let set_authenticated = self.set_authenticated;
        let set_ready = self.set_ready;
        spawn_local(async move {
            match commands::session_status().await {
                Ok(active) => set_authenticated.set(active),
                Err(e) => {
                    web_sys::console::warn_1(&format!("Session check failed: {}", e).into());
                    set_authenticated.set(false);
                }
            }
            set_ready.set(true);
        });
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated.get()
    }

    pub fn is_ready(&self) -> bool {
        self.ready.get()
    }

    /// Login or registration succeeded; the backend has stored the token.
    pub fn establish(&self) {
        self.set_authenticated.set(true);
    }

    /// The backend rejected the token and already cleared it.
    pub fn expire(&self) {
        self.set_authenticated.set(false);
    }

    /// Route an error through the session: auth failures end it.
    pub fn absorb(&self, err: &ApiError) {
        if err.is_auth() {
            self.expire();
        }
    }

    pub fn logout(&self) {
        let set_authenticated = self.set_authenticated;
        spawn_local(async move {
            if let Err(e) = commands::logout().await {
                web_sys::console::warn_1(&format!("Logout failed: {}", e).into());
            }
            set_authenticated.set(false);
        });
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}
