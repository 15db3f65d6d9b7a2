//! Coordinator ↔ Worker Protocol
//!
//! One TCP connection per worker session, two messages per session:
//! 1. Coordinator → Worker: a `WorkMessage` (partition offer or `NO_MORE_WORK`).
//! 2. Worker → Coordinator: a `WorkerResult`, after which the worker shuts down its
//!    write side.
//!
//! ## Submodules
//! - **`messages`**: the message types and their JSON shape.
//! - **`codec`**: newline-delimited JSON framing over any async byte stream.

pub mod codec;
pub mod messages;
