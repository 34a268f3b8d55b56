//! Route guards.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guards are UX, not security: the backend still authorizes every call.
//! They exist so pages never flash for the wrong audience and so a user who
//! is bounced to login can come back where they were.

pub mod auth_flow;
pub mod components;
pub mod decision;
