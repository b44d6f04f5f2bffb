//! Login and registration form.
//!
//! Validation runs locally before any command is sent; the backend repeats
//! it for registration. A successful command establishes the session and
//! the route guard moves the user on to `/upload`.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, RegistrationForm};
use crate::session::use_session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Login,
    Register,
}

pub fn validate_login(username: &str, password: &str) -> Result<(), String> {
    if username.is_empty() || password.is_empty() {
        return Err("Please enter username and password".to_string());
    }
    Ok(())
}

pub fn validate_registration(form: &RegistrationForm) -> Result<(), String> {
    if form.username.is_empty()
        || form.email.is_empty()
        || form.password.is_empty()
        || form.password_confirm.is_empty()
    {
        return Err("Please fill in all fields".to_string());
    }
    if form.password != form.password_confirm {
        return Err("Passwords do not match".to_string());
    }
    if form.password.chars().count() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    Ok(())
}

#[component]
pub fn AuthPage() -> impl IntoView {
    let session = use_session();

    let (mode, set_mode) = signal(Mode::Login);
    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (password_confirm, set_password_confirm) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);

    let switch_mode = move |next: Mode| {
        set_mode.set(next);
        set_error.set(None);
        set_password.set(String::new());
        set_password_confirm.set(String::new());
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get() {
            return;
        }
        set_error.set(None);

        match mode.get() {
            Mode::Login => {
                let user = username.get();
                let pass = password.get();
                if let Err(msg) = validate_login(&user, &pass) {
                    set_error.set(Some(msg));
                    return;
                }
                set_submitting.set(true);
                spawn_local(async move {
                    match commands::login(&user, &pass).await {
                        Ok(()) => session.establish(),
                        Err(e) => set_error.set(Some(e.to_string())),
                    }
                    set_submitting.set(false);
                });
            }
            Mode::Register => {
                let form = RegistrationForm {
                    username: username.get(),
                    email: email.get(),
                    password: password.get(),
                    password_confirm: password_confirm.get(),
                };
                if let Err(msg) = validate_registration(&form) {
                    set_error.set(Some(msg));
                    return;
                }
                set_submitting.set(true);
                spawn_local(async move {
                    match commands::register(&form).await {
                        Ok(()) => session.establish(),
                        Err(e) => set_error.set(Some(e.to_string())),
                    }
                    set_submitting.set(false);
                });
            }
        }
    };

    let is_register = move || mode.get() == Mode::Register;

    view! {
        <div class="page auth-page">
            <div class="card auth-card">
                <h2>{move || if is_register() { "Create Account" } else { "Login" }}</h2>

                <form on:submit=on_submit class="auth-form">
                    <label class="form-label">
                        "Username"
                        <input
                            type="text"
                            class="input"
                            autocomplete="username"
                            prop:value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                        />
                    </label>

                    <Show when=is_register>
                        <label class="form-label">
                            "Email"
                            <input
                                type="email"
                                class="input"
                                prop:value=move || email.get()
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                            />
                        </label>
                    </Show>

                    <label class="form-label">
                        "Password"
                        <input
                            type="password"
                            class="input"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                    </label>

                    <Show when=is_register>
                        <label class="form-label">
                            "Confirm Password"
                            <input
                                type="password"
                                class="input"
                                prop:value=move || password_confirm.get()
                                on:input=move |ev| set_password_confirm.set(event_target_value(&ev))
                            />
                        </label>
                    </Show>

                    {move || error.get().map(|msg| view! { <p class="error-message">{msg}</p> })}

                    <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                        {move || match (submitting.get(), is_register()) {
                            (true, _) => "Please wait...",
                            (false, true) => "Register",
                            (false, false) => "Login",
                        }}
                    </button>
                </form>

                <p class="auth-switch">
                    {move || if is_register() {
                        view! {
                            "Already have an account? "
                            <button class="btn-link" on:click=move |_| switch_mode(Mode::Login)>"Login"</button>
                        }.into_any()
                    } else {
                        view! {
                            "Don't have an account? "
                            <button class="btn-link" on:click=move |_| switch_mode(Mode::Register)>"Register"</button>
                        }.into_any()
                    }}
                </p>
                <a href="/" class="auth-back">"Back to home"</a>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(password: &str, confirm: &str) -> RegistrationForm {
        RegistrationForm {
            username: "operator".to_string(),
            email: "operator@plant.io".to_string(),
            password: password.to_string(),
            password_confirm: confirm.to_string(),
        }
    }

    #[test]
    fn test_login_requires_both_fields() {
        assert_eq!(
            validate_login("operator", "").unwrap_err(),
            "Please enter username and password"
        );
        assert!(validate_login("operator", "secret").is_ok());
    }

    #[test]
    fn test_registration_messages_in_order() {
        assert_eq!(
            validate_registration(&form("", "")).unwrap_err(),
            "Please fill in all fields"
        );
        assert_eq!(
            validate_registration(&form("short", "other")).unwrap_err(),
            "Passwords do not match"
        );
        assert_eq!(
            validate_registration(&form("short", "short")).unwrap_err(),
            "Password must be at least 8 characters"
        );
        assert!(validate_registration(&form("abcd1234", "abcd1234")).is_ok());
    }
}
