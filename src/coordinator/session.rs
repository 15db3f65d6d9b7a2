//! Worker Sessions
//!
//! One session per accepted connection:
//! `Connected -> PartitionOffered -> ResultReceived | Disconnected (forfeit)`.

use crate::dataset::types::Partition;
use crate::error::{RecommenderError, Result};
use crate::protocol::codec::{read_frame, write_frame};
use crate::protocol::messages::{WorkMessage, WorkerResult};

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncWrite, BufReader};

/// Identifies a session in the logs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a session ended.
#[derive(Debug)]
pub enum SessionOutcome {
    /// The worker returned a result for its partition.
    Completed { partition: usize, users: usize },
    /// Nothing was left to hand out; the worker was sent `NO_MORE_WORK`.
    NoWorkOffered,
    /// The partition's result was lost for this run.
    Forfeited {
        partition: usize,
        error: RecommenderError,
    },
}

/// Sends the offer and waits for the worker's single reply.
pub(crate) async fn exchange<S>(stream: S, partition: &Partition) -> Result<WorkerResult>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut stream = BufReader::new(stream);

    write_frame(&mut stream, &WorkMessage::PartitionOffer(partition.clone())).await?;
    read_frame(&mut stream).await
}

/// Tells a worker there is nothing left to do.
pub(crate) async fn turn_away<S>(mut stream: S) -> Result<()>
where
    S: AsyncWrite + Unpin,
{
    write_frame(&mut stream, &WorkMessage::NoMoreWork).await
}
