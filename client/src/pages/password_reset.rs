//! Three-step password reset: request a code, verify it, choose a password.
//!
//! ARCHITECTURE
//! ============
//! Each step writes the marker the next step's `AuthFlowRoute` checks:
//! `resetEmail` after step one, then `resetToken` + `otpVerified` (tab
//! scoped) after step two. Step three clears them all.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use super::forms::{describe_error, validate_email, validate_new_password, validate_otp};
use crate::paths;

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let navigate = use_navigate();
    let email = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = match validate_email(&email.get()) {
            Ok(value) => value,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Sending code...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            use crate::guard::auth_flow::begin_password_reset;
            use crate::session::storage::BrowserStorage;

            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::request_password_reset(&email_value).await {
                    Ok(()) => {
                        begin_password_reset(&BrowserStorage, &email_value);
                        navigate(paths::RESET_VERIFY_OTP, NavigateOptions::default());
                    }
                    Err(e) => {
                        info.set(describe_error(&e, "Could not send a reset code."));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email_value, &navigate);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Reset your password"</h1>
                <p class="login-card__subtitle">"We'll email you a 6-digit code."</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Send code"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <div class="login-links">
                    <a href=paths::LOGIN>"Back to sign in"</a>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn VerifyOtpPage() -> impl IntoView {
    let navigate = use_navigate();
    let code = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let otp = match validate_otp(&code.get()) {
            Ok(otp) => otp,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };

        #[cfg(feature = "hydrate")]
        {
            use crate::guard::auth_flow::{reset_email, record_otp_verified};
            use crate::session::storage::BrowserStorage;

            let Some(email_value) = reset_email(&BrowserStorage) else {
                navigate(paths::FORGOT_PASSWORD, NavigateOptions::default());
                return;
            };
            busy.set(true);
            info.set("Verifying code...".to_owned());
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::verify_reset_otp(&email_value, &otp).await {
                    Ok(token) => {
                        record_otp_verified(&BrowserStorage, &token);
                        navigate(paths::RESET_NEW_PASSWORD, NavigateOptions::default());
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
            let _ = (otp, &navigate);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Enter your code"</h1>
                <p class="login-card__subtitle">"Check your inbox for the 6-digit code."</p>
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
                        "Verify"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <div class="login-links">
                    <a href=paths::FORGOT_PASSWORD>"Send a new code"</a>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn NewPasswordPage() -> impl IntoView {
    let navigate = use_navigate();
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let new_password = match validate_new_password(&password.get(), &confirm.get()) {
            Ok(value) => value,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };

        #[cfg(feature = "hydrate")]
        {
            use crate::guard::auth_flow::{finish_password_reset, reset_token};
            use crate::session::storage::BrowserStorage;

            let Some(token) = reset_token(&BrowserStorage) else {
                navigate(paths::FORGOT_PASSWORD, NavigateOptions::default());
                return;
            };
            busy.set(true);
            info.set("Saving...".to_owned());
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::reset_password(&token, &new_password).await {
                    Ok(()) => {
                        finish_password_reset(&BrowserStorage);
                        log::info!("password reset complete");
                        navigate(paths::LOGIN, NavigateOptions { replace: true, ..NavigateOptions::default() });
                    }
                    Err(e) => {
                        info.set(describe_error(&e, "Could not reset password."));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (new_password, &navigate);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Choose a new password"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="password"
                        placeholder="New password (8+ characters)"
                        autocomplete="new-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Confirm password"
                        autocomplete="new-password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Save password"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
