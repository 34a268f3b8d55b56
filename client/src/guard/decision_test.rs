use super::*;
use crate::net::types::{AdminRecord, UserRecord};
use crate::session::test_support::{customer, provider};

fn admin() -> Session {
    Session::for_admin(AdminRecord { id: Some("1".to_owned()), name: "Root".to_owned(), email: String::new() })
}

fn user(record: UserRecord) -> Session {
    Session::for_user(record)
}

// =============================================================
// Loading / unauthenticated
// =============================================================

#[test]
fn loading_session_never_renders_children() {
    let outcome = evaluate(&Session::default(), &[], "/login", "/bookings");
    assert_eq!(outcome, GuardOutcome::Loading);
}

#[test]
fn signed_out_redirects_with_return_location() {
    let outcome = evaluate(&Session::signed_out(None), &[Role::Customer], "/login", "/bookings");
    assert_eq!(
        outcome,
        GuardOutcome::Redirect(RedirectTarget { to: "/login".to_owned(), from: Some("/bookings".to_owned()) })
    );
}

#[test]
fn backend_failure_redirects_to_login() {
    let session = Session::signed_out(Some("backend responded with status 500".to_owned()));
    match evaluate(&session, &[], "/login", "/settings") {
        GuardOutcome::Redirect(target) => assert_eq!(target.to, "/login"),
        other => panic!("expected redirect, got {other:?}"),
    }
}

#[test]
fn authenticated_flag_without_record_is_denied() {
    let mut session = Session::signed_out(None);
    session.authenticated = true;
    assert!(matches!(evaluate(&session, &[], "/login", "/"), GuardOutcome::Redirect(_)));
}

#[test]
fn custom_redirect_target_is_used() {
    let outcome = evaluate(&Session::signed_out(None), &[Role::Admin], "/admin/login", "/admin/dashboard");
    match outcome {
        GuardOutcome::Redirect(target) => assert_eq!(target.to, "/admin/login"),
        other => panic!("expected redirect, got {other:?}"),
    }
}

// =============================================================
// Role checks
// =============================================================

#[test]
fn empty_role_set_admits_customer() {
    assert_eq!(evaluate(&user(customer()), &[], "/login", "/settings"), GuardOutcome::Allow);
}

#[test]
fn matching_role_is_allowed() {
    let outcome = evaluate(&user(provider(Some("Local Guide"))), &[Role::ServiceProvider], "/login", "/provider/local-guide");
    assert_eq!(outcome, GuardOutcome::Allow);
}

#[test]
fn provider_on_customer_route_goes_to_provider_home() {
    let guide = evaluate(&user(provider(Some("Local Guide"))), &[Role::Customer], "/login", "/bookings");
    assert_eq!(guide, GuardOutcome::Redirect(RedirectTarget::plain("/provider/local-guide")));

    let renter = evaluate(&user(provider(Some("Equipment Renter"))), &[Role::Customer], "/login", "/bookings");
    assert_eq!(renter, GuardOutcome::Redirect(RedirectTarget::plain("/provider/equipment-renter")));
}

#[test]
fn provider_with_known_type_is_never_sent_home() {
    for kind in ["Local Guide", "Equipment Renter"] {
        match evaluate(&user(provider(Some(kind))), &[Role::Customer], "/login", "/bookings") {
            GuardOutcome::Redirect(target) => assert_ne!(target.to, "/"),
            other => panic!("expected redirect, got {other:?}"),
        }
    }
}

#[test]
fn provider_with_unknown_type_goes_to_unauthorized() {
    let outcome = evaluate(&user(provider(None)), &[Role::Customer], "/login", "/bookings");
    assert_eq!(outcome, GuardOutcome::Redirect(RedirectTarget::plain("/unauthorized")));
}

#[test]
fn customer_on_provider_route_goes_home() {
    let outcome = evaluate(&user(customer()), &[Role::ServiceProvider], "/login", "/provider/local-guide");
    assert_eq!(outcome, GuardOutcome::Redirect(RedirectTarget::plain("/")));
}

#[test]
fn provider_dashboard_requires_matching_type() {
    let guide = user(provider(Some("Local Guide")));
    assert_eq!(
        evaluate_provider(&guide, ProviderType::LocalGuide, "/login", "/provider/local-guide"),
        GuardOutcome::Allow
    );
    assert_eq!(
        evaluate_provider(&guide, ProviderType::EquipmentRenter, "/login", "/provider/equipment-renter"),
        GuardOutcome::Redirect(RedirectTarget::plain("/provider/local-guide"))
    );
}

#[test]
fn provider_dashboard_rejects_unknown_type_and_other_roles() {
    let untyped = evaluate_provider(&user(provider(None)), ProviderType::LocalGuide, "/login", "/provider/local-guide");
    assert_eq!(untyped, GuardOutcome::Redirect(RedirectTarget::plain("/unauthorized")));

    let camper = evaluate_provider(&user(customer()), ProviderType::LocalGuide, "/login", "/provider/local-guide");
    assert_eq!(camper, GuardOutcome::Redirect(RedirectTarget::plain("/")));

    let signed_out =
        evaluate_provider(&Session::signed_out(None), ProviderType::LocalGuide, "/login", "/provider/local-guide");
    assert!(matches!(signed_out, GuardOutcome::Redirect(target) if target.to == "/login"));
}

#[test]
fn admin_on_user_route_goes_to_dashboard() {
    let outcome = evaluate(&admin(), &[Role::Customer], "/login", "/bookings");
    assert_eq!(outcome, GuardOutcome::Redirect(RedirectTarget::plain("/admin/dashboard")));
}

// =============================================================
// RedirectTarget
// =============================================================

#[test]
fn href_encodes_return_location() {
    let target = RedirectTarget::with_return("/login", "/travel-buddy/matches");
    assert_eq!(target.href(), "/login?from=%2Ftravel-buddy%2Fmatches");
}

#[test]
fn href_appends_to_existing_query() {
    let target = RedirectTarget { to: "/login?expired=1".to_owned(), from: Some("/settings".to_owned()) };
    assert_eq!(target.href(), "/login?expired=1&from=%2Fsettings");
}

#[test]
fn with_return_skips_self_reference() {
    assert_eq!(RedirectTarget::with_return("/login", "/login").from, None);
    assert_eq!(RedirectTarget::with_return("/login", "").from, None);
}

// =============================================================
// sanitize_return_to
// =============================================================

#[test]
fn sanitize_accepts_local_paths() {
    assert_eq!(sanitize_return_to(Some("/bookings")), Some("/bookings".to_owned()));
}

#[test]
fn sanitize_rejects_external_and_protocol_relative() {
    assert_eq!(sanitize_return_to(Some("https://evil.test/")), None);
    assert_eq!(sanitize_return_to(Some("//evil.test")), None);
    assert_eq!(sanitize_return_to(Some("/\\evil.test")), None);
    assert_eq!(sanitize_return_to(None), None);
}

#[test]
fn sanitize_rejects_login_pages() {
    assert_eq!(sanitize_return_to(Some("/login")), None);
    assert_eq!(sanitize_return_to(Some("/admin/login?from=%2F")), None);
}
