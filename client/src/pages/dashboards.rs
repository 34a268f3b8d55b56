//! Role landing pages. Each is mounted behind a `ProtectedRoute`, so the
//! session is always authenticated with the right role by the time these
//! render.

use leptos::prelude::*;

use crate::paths;
use crate::session::provider::use_session;

fn display_name() -> impl Fn() -> String + Copy {
    let session = use_session();
    move || session.state.with(|s| s.display_name().unwrap_or("camper").to_owned())
}

#[component]
pub fn BookingsPage() -> impl IntoView {
    let name = display_name();
    view! {
        <section class="dashboard">
            <h1>"My bookings"</h1>
            <p>{move || format!("Trips booked by {}.", name())}</p>
            <p class="dashboard__empty">"No upcoming trips yet."</p>
            <a class="btn" href=paths::TRAVEL_BUDDY>"Find a travel buddy"</a>
        </section>
    }
}

#[component]
pub fn LocalGuideDashboard() -> impl IntoView {
    let name = display_name();
    view! {
        <section class="dashboard">
            <h1>"Guide dashboard"</h1>
            <p>{move || format!("Signed in as {}.", name())}</p>
            <p class="dashboard__empty">"No tours scheduled."</p>
        </section>
    }
}

#[component]
pub fn EquipmentRenterDashboard() -> impl IntoView {
    let name = display_name();
    view! {
        <section class="dashboard">
            <h1>"Rental dashboard"</h1>
            <p>{move || format!("Signed in as {}.", name())}</p>
            <p class="dashboard__empty">"No active rentals."</p>
        </section>
    }
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let name = display_name();
    view! {
        <section class="dashboard dashboard--admin">
            <h1>"Admin dashboard"</h1>
            <p>{move || format!("Signed in as {}.", name())}</p>
        </section>
    }
}

/// Shown to service providers whose provider type is missing or unknown.
#[component]
pub fn UnauthorizedPage() -> impl IntoView {
    let session = use_session();
    view! {
        <section class="dashboard dashboard--denied">
            <h1>"No access"</h1>
            <p>"Your account can't open this area. Contact support if this looks wrong."</p>
            <div class="dashboard__actions">
                <a class="btn" href=paths::HOME>"Back to home"</a>
                <button class="btn" on:click=move |_| session.logout()>
                    "Sign out"
                </button>
            </div>
        </section>
    }
}
