//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Pages hold form state and call the API; access control lives in the
//! route wrappers from `guard` and `travel_buddy`, never in the pages.

pub mod dashboards;
pub(crate) mod forms;
pub mod home;
pub mod login;
pub mod password_reset;
pub mod register;
pub mod settings;
pub mod travel_buddy;
pub mod verify_email;
