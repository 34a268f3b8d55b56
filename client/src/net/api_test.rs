use super::*;

#[test]
fn join_endpoint_avoids_double_slashes() {
    assert_eq!(join_endpoint("/api/", "/auth/user/me"), "/api/auth/user/me");
    assert_eq!(join_endpoint("https://backend.test", "travel-buddy/status"), "https://backend.test/travel-buddy/status");
}

#[test]
fn session_paths_differ_by_kind() {
    assert_eq!(identity_path(SessionType::User), "/auth/user/me");
    assert_eq!(identity_path(SessionType::Admin), "/auth/admin/me");
    assert_eq!(logout_path(SessionType::Admin), "/auth/admin/logout");
    assert_eq!(login_path(SessionType::User), "/auth/user/login");
}

#[test]
fn accept_passes_successful_envelope() {
    let envelope = ActionResponse { success: true, token: Some("t".to_owned()), ..ActionResponse::default() };
    assert_eq!(accept(envelope, "nope").unwrap().token.as_deref(), Some("t"));
}

#[test]
fn accept_uses_backend_message_on_rejection() {
    let envelope = ActionResponse { success: false, message: Some("Account locked".to_owned()), ..ActionResponse::default() };
    assert_eq!(accept(envelope, "nope"), Err(ApiError::Rejected("Account locked".to_owned())));
}

#[test]
fn accept_falls_back_when_message_blank() {
    let envelope = ActionResponse { success: false, message: Some("  ".to_owned()), ..ActionResponse::default() };
    assert_eq!(accept(envelope, "Invalid or expired code."), Err(ApiError::Rejected("Invalid or expired code.".to_owned())));
}

#[cfg(not(feature = "hydrate"))]
#[tokio::test]
async fn calls_are_unavailable_outside_the_browser() {
    assert_eq!(fetch_identity(SessionType::User).await, Err(ApiError::Unavailable));
    assert_eq!(logout(SessionType::Admin).await, Err(ApiError::Unavailable));
    assert_eq!(fetch_travel_buddy_status().await, Err(ApiError::Unavailable));
}
