//! Route-guard components.

use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;

use super::auth_flow::{AuthFlowStep, evaluate_auth_flow};
use super::decision::{GuardOutcome, evaluate, evaluate_provider};
use crate::net::types::{ProviderType, Role};
use crate::paths;
use crate::session::provider::use_session;
use crate::session::storage::BrowserStorage;

/// Placeholder rendered while a guard is undecided.
#[component]
pub fn LoadingScreen(#[prop(optional, into)] message: Option<String>) -> impl IntoView {
    let message = message.unwrap_or_else(|| "Checking your session...".to_owned());
    view! {
        <div class="loading-screen" role="status" aria-live="polite">
            <div class="loading-screen__spinner"></div>
            <p>{message}</p>
        </div>
    }
}

fn render_outcome(outcome: GuardOutcome, children: &ChildrenFn) -> AnyView {
    match outcome {
        GuardOutcome::Loading => view! { <LoadingScreen/> }.into_any(),
        GuardOutcome::Allow => children().into_any(),
        GuardOutcome::Redirect(target) => view! { <Redirect path=target.href()/> }.into_any(),
    }
}

/// Render `children` only for an authenticated session whose role is in
/// `roles` (any role when empty); otherwise redirect. Setting
/// `provider_type` restricts the route to that kind of service provider.
#[component]
pub fn ProtectedRoute(
    #[prop(optional)] roles: Vec<Role>,
    #[prop(optional)] provider_type: Option<ProviderType>,
    #[prop(optional, into)] redirect_to: Option<String>,
    children: ChildrenFn,
) -> impl IntoView {
    let session = use_session();
    let location = use_location();
    let redirect_to = redirect_to.unwrap_or_else(|| paths::LOGIN.to_owned());

    let outcome = Memo::new(move |_| {
        let path = location.pathname.get();
        session.state.with(|s| match provider_type {
            Some(required) => evaluate_provider(s, required, &redirect_to, &path),
            None => evaluate(s, &roles, &redirect_to, &path),
        })
    });

    move || render_outcome(outcome.get(), &children)
}

/// Render `children` only if the previous auth-flow step left its markers.
///
/// Storage is browser-only, so the decision waits for hydration.
#[component]
pub fn AuthFlowRoute(step: AuthFlowStep, children: ChildrenFn) -> impl IntoView {
    let hydrated = RwSignal::new(false);
    Effect::new(move |_| hydrated.set(true));

    let outcome = Memo::new(move |_| {
        if hydrated.get() {
            evaluate_auth_flow(step, &BrowserStorage)
        } else {
            GuardOutcome::Loading
        }
    });

    move || render_outcome(outcome.get(), &children)
}
