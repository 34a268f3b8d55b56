//! Root application component with routing and the session provider.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::nav_bar::NavBar;
use crate::config::SessionConfig;
use crate::guard::auth_flow::AuthFlowStep;
use crate::guard::components::{AuthFlowRoute, ProtectedRoute};
use crate::net::types::{ProviderType, Role};
use crate::pages::{
    dashboards::{AdminDashboardPage, BookingsPage, EquipmentRenterDashboard, LocalGuideDashboard, UnauthorizedPage},
    home::HomePage,
    login::{AdminLoginPage, LoginPage},
    password_reset::{ForgotPasswordPage, NewPasswordPage, VerifyOtpPage},
    register::RegisterPage,
    settings::SettingsPage,
    travel_buddy::TravelBuddyPage,
    verify_email::VerifyEmailPage,
};
use crate::paths;
use crate::session::provider::provide_session;
use crate::travel_buddy::components::TravelBuddyProtectedRoute;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session context and wraps every non-public route in the
/// guard that matches its audience.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_session(SessionConfig::default());

    view! {
        <Stylesheet id="leptos" href="/pkg/campfire.css"/>
        <Title text="Campfire"/>

        <Router>
            <NavBar/>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=(StaticSegment("admin"), StaticSegment("login")) view=AdminLoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route path=StaticSegment("forgot-password") view=ForgotPasswordPage/>
                    <Route path=StaticSegment("unauthorized") view=UnauthorizedPage/>

                    <Route
                        path=(StaticSegment("reset"), StaticSegment("verify-otp"))
                        view=|| view! { <AuthFlowRoute step=AuthFlowStep::VerifyOtp><VerifyOtpPage/></AuthFlowRoute> }
                    />
                    <Route
                        path=(StaticSegment("reset"), StaticSegment("new-password"))
                        view=|| view! { <AuthFlowRoute step=AuthFlowStep::NewPassword><NewPasswordPage/></AuthFlowRoute> }
                    />
                    <Route
                        path=StaticSegment("verify-email")
                        view=|| view! { <AuthFlowRoute step=AuthFlowStep::VerifyEmail><VerifyEmailPage/></AuthFlowRoute> }
                    />

                    <Route
                        path=StaticSegment("bookings")
                        view=|| view! { <ProtectedRoute roles=vec![Role::Customer]><BookingsPage/></ProtectedRoute> }
                    />
                    <Route
                        path=(StaticSegment("provider"), StaticSegment("local-guide"))
                        view=|| view! {
                            <ProtectedRoute provider_type=ProviderType::LocalGuide><LocalGuideDashboard/></ProtectedRoute>
                        }
                    />
                    <Route
                        path=(StaticSegment("provider"), StaticSegment("equipment-renter"))
                        view=|| view! {
                            <ProtectedRoute provider_type=ProviderType::EquipmentRenter><EquipmentRenterDashboard/></ProtectedRoute>
                        }
                    />
                    <Route
                        path=(StaticSegment("admin"), StaticSegment("dashboard"))
                        view=|| view! {
                            <ProtectedRoute roles=vec![Role::Admin] redirect_to=paths::ADMIN_LOGIN>
                                <AdminDashboardPage/>
                            </ProtectedRoute>
                        }
                    />
                    <Route
                        path=StaticSegment("settings")
                        view=|| view! { <ProtectedRoute><SettingsPage/></ProtectedRoute> }
                    />
                    <Route
                        path=StaticSegment("travel-buddy")
                        view=|| view! { <TravelBuddyProtectedRoute><TravelBuddyPage/></TravelBuddyProtectedRoute> }
                    />
                </Routes>
            </main>
        </Router>
    }
}
