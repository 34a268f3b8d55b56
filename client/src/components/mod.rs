//! Shared UI components.

pub mod nav_bar;
