//! Query Module
//!
//! Read-only access to the published rankings once distribution has finished.
//!
//! ## Submodules
//! - **`handlers`**: HTTP endpoints (`/recommendations/:category`, `/categories`).
//! - **`prompt`**: the interactive terminal lookup.

pub mod handlers;
pub mod prompt;
