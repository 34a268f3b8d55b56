//! Scripted backend and fixtures shared by session, guard, and gate tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::backend::SessionBackend;
use crate::net::error::ApiError;
use crate::net::types::{FeatureStatus, IdentityResponse, Role, SessionType, UserRecord};

/// Backend that replays fixed answers and counts calls.
pub struct FakeBackend {
    user: Mutex<Result<IdentityResponse, ApiError>>,
    admin: Mutex<Result<IdentityResponse, ApiError>>,
    logout: Result<(), ApiError>,
    feature: Result<FeatureStatus, ApiError>,
    pub identity_calls: Mutex<Vec<SessionType>>,
    pub logout_calls: Mutex<Vec<SessionType>>,
    pub feature_calls: Mutex<usize>,
    during_fetch: Mutex<Option<Box<dyn Fn()>>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            user: Mutex::new(Ok(IdentityResponse::default())),
            admin: Mutex::new(Ok(IdentityResponse::default())),
            logout: Ok(()),
            feature: Ok(FeatureStatus { enabled: true }),
            identity_calls: Mutex::new(Vec::new()),
            logout_calls: Mutex::new(Vec::new()),
            feature_calls: Mutex::new(0),
            during_fetch: Mutex::new(None),
        }
    }
}

impl FakeBackend {
    pub fn with_user(self, resp: Result<IdentityResponse, ApiError>) -> Self {
        *self.user.lock().unwrap() = resp;
        self
    }

    pub fn with_admin(self, resp: Result<IdentityResponse, ApiError>) -> Self {
        *self.admin.lock().unwrap() = resp;
        self
    }

    pub fn with_logout(mut self, resp: Result<(), ApiError>) -> Self {
        self.logout = resp;
        self
    }

    pub fn with_feature(mut self, resp: Result<FeatureStatus, ApiError>) -> Self {
        self.feature = resp;
        self
    }

    /// Run `hook` inside every identity fetch, before the answer is returned.
    pub fn set_during_fetch(&self, hook: impl Fn() + 'static) {
        *self.during_fetch.lock().unwrap() = Some(Box::new(hook));
    }

    pub fn identity_call_count(&self) -> usize {
        self.identity_calls.lock().unwrap().len()
    }

    pub fn logout_call_count(&self) -> usize {
        self.logout_calls.lock().unwrap().len()
    }
}

#[async_trait(?Send)]
impl SessionBackend for FakeBackend {
    async fn fetch_identity(&self, kind: SessionType) -> Result<IdentityResponse, ApiError> {
        self.identity_calls.lock().unwrap().push(kind);
        if let Some(hook) = self.during_fetch.lock().unwrap().as_ref() {
            hook();
        }
        match kind {
            SessionType::User => self.user.lock().unwrap().clone(),
            SessionType::Admin => self.admin.lock().unwrap().clone(),
        }
    }

    async fn logout(&self, kind: SessionType) -> Result<(), ApiError> {
        self.logout_calls.lock().unwrap().push(kind);
        self.logout.clone()
    }

    async fn travel_buddy_status(&self) -> Result<FeatureStatus, ApiError> {
        *self.feature_calls.lock().unwrap() += 1;
        self.feature.clone()
    }
}

/// `{authenticated: true, user: <json>}`.
pub fn authenticated(user: serde_json::Value) -> Result<IdentityResponse, ApiError> {
    Ok(IdentityResponse { authenticated: true, user: Some(user) })
}

pub fn customer_json() -> serde_json::Value {
    serde_json::json!({ "id": 11, "name": "Casey", "email": "casey@example.com", "role": "customer" })
}

pub fn provider_json(kind: &str) -> serde_json::Value {
    serde_json::json!({
        "id": 12,
        "name": "Pat",
        "email": "pat@example.com",
        "role": "service_provider",
        "provider_type": kind
    })
}

pub fn admin_json() -> serde_json::Value {
    serde_json::json!({ "id": 1, "name": "Root", "email": "root@example.com" })
}

pub fn customer() -> UserRecord {
    UserRecord {
        id: Some("11".to_owned()),
        name: "Casey".to_owned(),
        email: "casey@example.com".to_owned(),
        role: Role::Customer,
        provider_type: None,
    }
}

pub fn provider(kind: Option<&str>) -> UserRecord {
    UserRecord {
        id: Some("12".to_owned()),
        name: "Pat".to_owned(),
        email: "pat@example.com".to_owned(),
        role: Role::ServiceProvider,
        provider_type: kind.map(str::to_owned),
    }
}
