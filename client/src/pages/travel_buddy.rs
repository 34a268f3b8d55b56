//! Travel Buddy matching page, mounted behind `TravelBuddyProtectedRoute`.

use leptos::prelude::*;

use crate::paths;

#[component]
pub fn TravelBuddyPage() -> impl IntoView {
    view! {
        <section class="travel-buddy">
            <h1>"Travel Buddy"</h1>
            <p>"Match with other campers heading the same way."</p>
            <p class="dashboard__empty">"No matches yet. Check back after your next booking."</p>
            <a class="btn" href=paths::SETTINGS>"Travel Buddy settings"</a>
        </section>
    }
}
