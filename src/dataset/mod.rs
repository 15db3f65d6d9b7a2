//! Dataset Module
//!
//! Everything that happens to the review data before it reaches a worker.
//!
//! ## Submodules
//! - **`types`**: `Review`, `Partition` and the product → category `CategoryIndex`.
//! - **`loader`**: CSV ingestion (`load_reviews`).
//! - **`partitioner`**: contiguous `split` into shards and the optional seeded shuffle.

pub mod loader;
pub mod partitioner;
pub mod types;
