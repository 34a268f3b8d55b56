//! Backend seam for session validation.
//!
//! The store only needs three calls; keeping them behind a trait lets tests
//! script backend behavior without a browser.

use async_trait::async_trait;

use crate::net::api;
use crate::net::error::ApiError;
use crate::net::types::{FeatureStatus, IdentityResponse, SessionType};

/// Remote calls the session layer depends on.
///
/// Futures are not `Send`: the browser runs everything on one thread.
#[async_trait(?Send)]
pub trait SessionBackend {
    /// Ask who is logged in for `kind`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when the backend cannot answer.
    async fn fetch_identity(&self, kind: SessionType) -> Result<IdentityResponse, ApiError>;

    /// End the backend session for `kind`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when the call fails.
    async fn logout(&self, kind: SessionType) -> Result<(), ApiError>;

    /// Current Travel Buddy flag for the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when the backend cannot answer.
    async fn travel_buddy_status(&self) -> Result<FeatureStatus, ApiError>;
}

/// The real backend, reached through [`crate::net::api`].
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpBackend;

#[async_trait(?Send)]
impl SessionBackend for HttpBackend {
    async fn fetch_identity(&self, kind: SessionType) -> Result<IdentityResponse, ApiError> {
        api::fetch_identity(kind).await
    }

    async fn logout(&self, kind: SessionType) -> Result<(), ApiError> {
        api::logout(kind).await
    }

    async fn travel_buddy_status(&self) -> Result<FeatureStatus, ApiError> {
        api::fetch_travel_buddy_status().await
    }
}
