//! Customer/provider and admin login pages.
//!
//! Both pages share one form; only the endpoint and the session type differ.
//! A successful login stores the hint and publishes the session. The page then
//! leaves through the same path as a visitor who arrived signed in: to the
//! sanitized `from` location or their role's home.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use super::forms::{describe_error, signed_in_redirect, validate_login};
use crate::net::types::SessionType;
use crate::paths;
use crate::session::provider::use_session;

#[component]
pub fn LoginPage() -> impl IntoView {
    view! { <LoginForm kind=SessionType::User/> }
}

#[component]
pub fn AdminLoginPage() -> impl IntoView {
    view! { <LoginForm kind=SessionType::Admin/> }
}

#[component]
fn LoginForm(kind: SessionType) -> impl IntoView {
    let session = use_session();
    let query = use_query_map();
    let navigate = use_navigate();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    // Signed in, whether on arrival or after submitting: leave the form.
    Effect::new(move || {
        let from = query.with(|q| q.get(paths::RETURN_PARAM));
        if let Some(target) = session.state.with(|s| signed_in_redirect(s, from.as_deref())) {
            navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match validate_login(&email.get(), &password.get()) {
            Ok(request) => request,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                let outcome = match crate::net::api::login(kind, &request).await {
                    Ok(raw) => session.sign_in(kind, raw),
                    Err(e) => Err(e),
                };
                match outcome {
                    Ok(()) => log::info!("signed in as {kind:?}"),
                    Err(e) => {
                        info.set(describe_error(&e, "Invalid email or password."));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
        }
    };

    let (title, subtitle) = match kind {
        SessionType::User => ("Welcome back", "Sign in to plan your next camp"),
        SessionType::Admin => ("Admin console", "Staff sign-in"),
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>{title}</h1>
                <p class="login-card__subtitle">{subtitle}</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        autocomplete="username"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign in"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                {(kind == SessionType::User)
                    .then(|| {
                        view! {
                            <div class="login-links">
                                <a href=paths::FORGOT_PASSWORD>"Forgot password?"</a>
                                <a href=paths::REGISTER>"Create an account"</a>
                            </div>
                        }
                    })}
            </div>
        </div>
    }
}
