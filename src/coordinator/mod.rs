//! Coordinator Module
//!
//! Distributes partitions to workers over TCP and collects their results.
//!
//! ## Architecture Overview
//! The coordinator follows a **Push-on-connect** model:
//! 1. **Accept**: every incoming connection becomes a session task.
//! 2. **Claim**: the next partition is taken from the assignment cursor under a short
//!    lock. When none are left the worker receives `NO_MORE_WORK`.
//! 3. **Exchange**: the partition is sent and a single `WorkerResult` awaited, bounded
//!    by the session timeout.
//! 4. **Completion**: the accept loop stops once the cursor is exhausted (or the accept
//!    deadline expires) and waits for all in-flight sessions.
//!
//! A session that fails for any reason forfeits its partition for the run. Forfeited
//! partitions are reported in the `RunSummary` but never offered again.
//!
//! ## Submodules
//! - **`assignment`**: cursor and per-partition status.
//! - **`session`**: session identity, outcomes and the wire exchange.
//! - **`service`**: the `Coordinator` itself and its accept loop.

pub mod assignment;
pub mod service;
pub mod session;
