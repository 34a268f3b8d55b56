//! Top navigation bar. Links follow the current role.

use leptos::prelude::*;

use crate::guard::decision::home_for;
use crate::net::types::Role;
use crate::paths;
use crate::session::provider::use_session;
use crate::state::session::Session;

#[component]
pub fn NavBar() -> impl IntoView {
    let session = use_session();
    let role = move || session.state.with(Session::role);
    let home = move || session.state.with(|s| if s.authenticated { home_for(s) } else { paths::HOME });
    let name = move || session.state.with(|s| s.display_name().unwrap_or_default().to_owned());

    let links = move || match role() {
        Some(Role::Customer) => view! {
            <a href=paths::BOOKINGS>"Bookings"</a>
            <a href=paths::TRAVEL_BUDDY>"Travel Buddy"</a>
            <a href=paths::SETTINGS>"Settings"</a>
        }
        .into_any(),
        Some(Role::ServiceProvider | Role::Admin) => view! { <a href=paths::SETTINGS>"Settings"</a> }.into_any(),
        None => view! { <a href=paths::LOGIN>"Sign in"</a> }.into_any(),
    };

    view! {
        <nav class="nav-bar">
            <a class="nav-bar__brand" href=home>
                "Campfire"
            </a>
            <div class="nav-bar__links">{links}</div>
            <Show when=move || role().is_some()>
                <span class="nav-bar__user">{name}</span>
                <button class="nav-bar__logout" on:click=move |_| session.logout()>
                    "Sign out"
                </button>
            </Show>
        </nav>
    }
}
