//! Distributed Recommender Library
//!
//! This library crate defines the core modules of a distributed
//! collaborative-filtering recommender. It serves as the foundation for the binary
//! executable (`main.rs`), which runs either the coordinator or a worker.
//!
//! ## Architecture Modules
//! Data flows through the modules in this order:
//!
//! - **`dataset`**: CSV ingestion, the product → category index and the partitioner
//!   that shards the reviews for distribution.
//! - **`protocol`**: the newline-delimited JSON messages exchanged between the
//!   coordinator and its workers.
//! - **`coordinator`**: the TCP service that hands out one partition per worker
//!   connection and collects the results.
//! - **`worker`**: the client side of a session. Runs the engine on one partition.
//! - **`engine`**: user-based collaborative filtering (cosine similarity and
//!   similarity-weighted rating prediction).
//! - **`aggregator`**: vote counting per category and the published rankings.
//! - **`query`**: HTTP endpoints and the terminal prompt over the rankings.
//!
//! Cross-cutting: **`config`** (YAML settings) and **`error`** (`RecommenderError`).

pub mod aggregator;
pub mod config;
pub mod coordinator;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod protocol;
pub mod query;
pub mod worker;
