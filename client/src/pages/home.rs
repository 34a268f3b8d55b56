//! Public landing page.

use leptos::prelude::*;

use crate::paths;
use crate::session::provider::use_session;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = use_session();
    let greeting = move || {
        session.state.with(|s| match s.display_name() {
            Some(name) if s.authenticated => format!("Welcome back, {name}."),
            _ => "Find a campsite, a guide, or the gear you forgot.".to_owned(),
        })
    };
    let signed_out = move || session.state.with(|s| !s.loading && !s.authenticated);

    view! {
        <section class="home-hero">
            <h1>"Campfire"</h1>
            <p class="home-hero__subtitle">{greeting}</p>
            <Show when=signed_out>
                <div class="home-hero__actions">
                    <a class="btn btn--primary" href=paths::LOGIN>"Sign in"</a>
                    <a class="btn" href=paths::REGISTER>"Create an account"</a>
                </div>
            </Show>
        </section>
    }
}
