//! Account settings: Travel Buddy opt-in and sign out.

use leptos::prelude::*;

use super::forms::describe_error;
use crate::net::types::Role;
use crate::session::provider::use_session;

#[component]
pub fn SettingsPage() -> impl IntoView {
    let session = use_session();
    let enabled = RwSignal::new(None::<bool>);
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let is_customer = move || session.state.with(|s| s.role() == Some(Role::Customer));

    let requested = RwSignal::new(false);
    Effect::new(move || {
        if requested.get_untracked() || !is_customer() {
            return;
        }
        requested.set(true);
        leptos::task::spawn_local(async move {
            match session.travel_buddy_status().await {
                Ok(status) => enabled.set(Some(status.enabled)),
                Err(e) => info.set(describe_error(&e, "Could not load Travel Buddy settings.")),
            }
        });
    });

    let on_toggle = move |ev: leptos::ev::Event| {
        if busy.get() {
            return;
        }
        let next = event_target_checked(&ev);
        busy.set(true);
        info.set(String::new());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::set_travel_buddy_enabled(next).await {
                Ok(status) => {
                    enabled.set(Some(status.enabled));
                    info.set(if status.enabled { "Travel Buddy is on." } else { "Travel Buddy is off." }.to_owned());
                }
                Err(e) => info.set(describe_error(&e, "Could not update Travel Buddy.")),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = next;
    };

    view! {
        <section class="settings">
            <h1>"Settings"</h1>
            <Show when=is_customer>
                <div class="settings__row">
                    <label class="settings__toggle">
                        <input
                            type="checkbox"
                            prop:checked=move || enabled.get().unwrap_or(false)
                            disabled=move || busy.get() || enabled.get().is_none()
                            on:change=on_toggle
                        />
                        "Travel Buddy"
                    </label>
                    <p class="settings__hint">"Let other campers on similar trips find you."</p>
                </div>
            </Show>
            <Show when=move || !info.get().is_empty()>
                <p class="settings__message">{move || info.get()}</p>
            </Show>
            <div class="settings__row">
                <button class="btn btn--danger" on:click=move |_| session.logout()>
                    "Sign out"
                </button>
            </div>
        </section>
    }
}
