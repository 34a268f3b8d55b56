//! Travel Buddy route wrapper and the "feature off" modal.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::Redirect;
use leptos_router::hooks::{use_location, use_navigate};

use super::gate::{Eligibility, GateState, ModalChoice, eligibility, gate_state, redirect_for};
use crate::guard::components::LoadingScreen;
use crate::net::error::ApiError;
use crate::net::types::FeatureStatus;
use crate::paths;
use crate::session::provider::use_session;

/// Render `children` only for customers who have Travel Buddy enabled.
///
/// The remote flag is fetched once, after the session settles on an
/// eligible customer.
#[component]
pub fn TravelBuddyProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    let location = use_location();
    let navigate = use_navigate();
    let flag = RwSignal::new(None::<Result<FeatureStatus, ApiError>>);
    let requested = RwSignal::new(false);
    let choice = RwSignal::new(None::<ModalChoice>);

    Effect::new(move || {
        let eligible = session.state.with(|s| eligibility(s) == Eligibility::Eligible);
        if !eligible || requested.get_untracked() {
            return;
        }
        requested.set(true);
        leptos::task::spawn_local(async move {
            let result = session.travel_buddy_status().await;
            flag.set(Some(result));
        });
    });

    Effect::new(move || {
        if let Some(picked) = choice.get() {
            navigate(picked.target(), NavigateOptions::default());
        }
    });

    let state = Memo::new(move |_| session.state.with(|s| flag.with(|f| gate_state(s, f.as_ref()))));
    let on_choice = Callback::new(move |picked: ModalChoice| choice.set(Some(picked)));

    move || {
        let current = state.get();
        let path = location.pathname.get();
        if let Some(target) = session.state.with(|s| redirect_for(&current, s, &path)) {
            return view! { <Redirect path=target.href()/> }.into_any();
        }
        match current {
            GateState::Authorized => children().into_any(),
            GateState::FeatureOff => view! { <FeatureOffModal on_choice=on_choice/> }.into_any(),
            GateState::Error(message) => view! {
                <div class="gate-error" role="alert">
                    <h2>"Travel Buddy"</h2>
                    <p>{message}</p>
                    <a href=paths::HOME class="btn">"Back to home"</a>
                </div>
            }
            .into_any(),
            _ => view! { <LoadingScreen message="Checking Travel Buddy access..."/> }.into_any(),
        }
    }
}

/// Blocking modal shown to customers who have not enabled Travel Buddy.
#[component]
pub fn FeatureOffModal(on_choice: Callback<ModalChoice>) -> impl IntoView {
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            on_choice.run(ModalChoice::Cancel);
        }
    };

    view! {
        <div class="feature-off-modal__backdrop">
            <div class="feature-off-modal" role="dialog" aria-modal="true" tabindex="0" on:keydown=on_keydown>
                <h2>"Travel Buddy is turned off"</h2>
                <p>
                    "Enable Travel Buddy in your settings to find companions for your next trip."
                </p>
                <div class="feature-off-modal__actions">
                    <button class="btn" on:click=move |_| on_choice.run(ModalChoice::Cancel)>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" on:click=move |_| on_choice.run(ModalChoice::OpenSettings)>
                        "Open settings"
                    </button>
                </div>
            </div>
        </div>
    }
}
