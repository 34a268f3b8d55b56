//! Email verification after registration.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use super::forms::{describe_error, validate_otp};
use crate::paths;

#[component]
pub fn VerifyEmailPage() -> impl IntoView {
    let navigate = use_navigate();
    let code = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let pending = RwSignal::new(None::<String>);

    // Storage is browser-only; read the address once mounted.
    Effect::new(move || {
        #[cfg(feature = "hydrate")]
        pending.set(crate::guard::auth_flow::pending_email(&crate::session::storage::BrowserStorage));
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let verification_code = match validate_otp(&code.get()) {
            Ok(value) => value,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        let Some(email_value) = pending.get() else {
            navigate(paths::REGISTER, NavigateOptions::default());
            return;
        };
        busy.set(true);
        info.set("Verifying...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            use crate::guard::auth_flow::finish_email_verification;
            use crate::session::storage::BrowserStorage;

            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::verify_email(&email_value, &verification_code).await {
                    Ok(()) => {
                        finish_email_verification(&BrowserStorage);
                        navigate(paths::LOGIN, NavigateOptions { replace: true, ..NavigateOptions::default() });
                    }
                    Err(e) => {
                        info.set(describe_error(&e, "Invalid or expired code."));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email_value, verification_code);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Verify your email"</h1>
                <p class="login-card__subtitle">
                    {move || match pending.get() {
                        Some(address) => format!("We sent a 6-digit code to {address}."),
                        None => "We sent you a 6-digit code.".to_owned(),
                    }}
                </p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input login-input--code"
                        type="text"
                        inputmode="numeric"
                        maxlength="6"
                        placeholder="123456"
                        prop:value=move || code.get()
                        on:input=move |ev| code.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Verify email"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
