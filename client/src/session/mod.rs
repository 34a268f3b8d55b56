//! Client-side session mechanism.
//!
//! ARCHITECTURE
//! ============
//! `storage` holds persisted hints, `backend` the remote calls, `store` the
//! validation rules, `schedule` the idle/re-validation clock, and `provider`
//! the Leptos context that ties them to the UI. Only `provider` depends on
//! Leptos.

pub mod backend;
pub mod provider;
pub mod schedule;
pub mod storage;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;
