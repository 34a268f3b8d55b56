//! Travel Buddy feature gate: customer-only, and only when the user has
//! switched the feature on in settings.

pub mod components;
pub mod gate;
