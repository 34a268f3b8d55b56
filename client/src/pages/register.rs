//! Account registration. Success leaves the pending-user marker and moves on
//! to email verification.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use super::forms::{RegistrationInput, describe_error, validate_registration};
use crate::net::types::ProviderType;
use crate::paths;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let navigate = use_navigate();
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let as_provider = RwSignal::new(false);
    let provider_type = RwSignal::new(None::<ProviderType>);
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let input = RegistrationInput {
            name: name.get(),
            email: email.get(),
            password: password.get(),
            confirm: confirm.get(),
            as_provider: as_provider.get(),
            provider_type: provider_type.get(),
        };
        let request = match validate_registration(&input) {
            Ok(request) => request,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Creating your account...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            use crate::guard::auth_flow::begin_email_verification;
            use crate::session::storage::BrowserStorage;

            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::register(&request).await {
                    Ok(()) => {
                        begin_email_verification(&BrowserStorage, &request.name, &request.email);
                        navigate(paths::VERIFY_EMAIL, NavigateOptions::default());
                    }
                    Err(e) => {
                        info.set(describe_error(&e, "Could not create your account."));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (request, &navigate);
        }
    };

    let on_provider_type = move |ev: leptos::ev::Event| {
        provider_type.set(ProviderType::parse(&event_target_value(&ev)));
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Create an account"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Full name"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password (8+ characters)"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Confirm password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                    <label class="login-checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || as_provider.get()
                            on:change=move |ev| as_provider.set(event_target_checked(&ev))
                        />
                        "I offer services (guiding or equipment rental)"
                    </label>
                    <Show when=move || as_provider.get()>
                        <select class="login-input" on:change=on_provider_type>
                            <option value="">"Choose a provider type"</option>
                            <option value=ProviderType::LocalGuide.as_str()>{ProviderType::LocalGuide.as_str()}</option>
                            <option value=ProviderType::EquipmentRenter.as_str()>
                                {ProviderType::EquipmentRenter.as_str()}
                            </option>
                        </select>
                    </Show>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign up"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <div class="login-links">
                    <a href=paths::LOGIN>"Already have an account? Sign in"</a>
                </div>
            </div>
        </div>
    }
}
