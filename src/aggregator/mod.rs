//! Aggregation Module
//!
//! Turns the collected worker results into the global ranking served to users.
//!
//! ## Submodules
//! - **`ranking`**: vote counting per (category, product) and the deterministic sort.
//! - **`store`**: `RecommendationStore`, the lock-guarded published snapshot read by
//!   the query surface.

pub mod ranking;
pub mod store;
