//! Worker Module
//!
//! The process that connects to the coordinator, runs the recommendation engine on
//! the partition it is offered and returns the result. One connection, one
//! partition.

pub mod client;

#[cfg(test)]
mod tests;
