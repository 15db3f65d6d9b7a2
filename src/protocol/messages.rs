//! Wire Messages
//!
//! Defines the two messages of a worker session.
//!
//! ## Coordinator → Worker
//! On the wire this is a single JSON object carrying either a partition or the
//! `NO_MORE_WORK` sentinel:
//!
//! ```json
//! {"partition": [{"review_id": "...", ...}], "partition_index": 2}
//! {"message": "NO_MORE_WORK"}
//! ```
//!
//! Decoding goes through [`WorkEnvelope`] and is converted into the tagged
//! [`WorkMessage`] enum, so callers never inspect optional fields themselves.
//!
//! ## Worker → Coordinator
//! `{"recommendations": {"<user id>": ["<product id>", ...]}}`

use crate::dataset::types::{Partition, Review};

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

pub const NO_MORE_WORK: &str = "NO_MORE_WORK";

/// What the coordinator tells a freshly connected worker.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "WorkEnvelope")]
pub enum WorkMessage {
    /// Every partition has already been claimed; the worker should exit.
    NoMoreWork,
    /// The partition this worker is responsible for.
    PartitionOffer(Partition),
}

/// Raw shape of the coordinator's message as it appears on the wire.
#[derive(Debug, Deserialize)]
struct WorkEnvelope {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    partition: Option<Vec<Review>>,
    #[serde(default)]
    partition_index: Option<usize>,
}

impl TryFrom<WorkEnvelope> for WorkMessage {
    type Error = String;

    fn try_from(envelope: WorkEnvelope) -> Result<Self, Self::Error> {
        match (envelope.message.as_deref(), envelope.partition) {
            (Some(NO_MORE_WORK), _) => Ok(WorkMessage::NoMoreWork),
            (Some(other), _) => Err(format!("unknown coordinator message '{}'", other)),
            (None, Some(reviews)) => Ok(WorkMessage::PartitionOffer(Partition::new(
                envelope.partition_index.unwrap_or(0),
                reviews,
            ))),
            (None, None) => Err("message carries neither a partition nor a sentinel".to_string()),
        }
    }
}

impl Serialize for WorkMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            WorkMessage::NoMoreWork => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("message", NO_MORE_WORK)?;
                map.end()
            }
            WorkMessage::PartitionOffer(partition) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("partition", partition.reviews())?;
                map.serialize_entry("partition_index", &partition.index())?;
                map.end()
            }
        }
    }
}

/// Recommendations computed by one worker for every user in its partition.
///
/// Order inside each list carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkerResult {
    #[serde(default)]
    pub recommendations: HashMap<String, Vec<String>>,
}

impl WorkerResult {
    /// Total number of (user, product) pairs, duplicates included.
    pub fn recommendation_count(&self) -> usize {
        self.recommendations.values().map(Vec::len).sum()
    }

    pub fn user_count(&self) -> usize {
        self.recommendations.len()
    }
}
