//! Worker Client
//!
//! The worker side of a session: connect, receive one partition, compute
//! recommendations on a blocking thread, send the result back and close the write
//! side of the connection.

use crate::engine::recommend::RecommendationEngine;
use crate::error::{RecommenderError, Result, TransportError};
use crate::protocol::codec::{read_frame, write_frame};
use crate::protocol::messages::WorkMessage;

use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerOutcome {
    /// A partition was processed and its result delivered.
    Processed {
        partition: usize,
        reviews: usize,
        users: usize,
    },
    /// The coordinator had nothing left to hand out.
    NoMoreWork,
}

pub struct WorkerClient {
    engine: RecommendationEngine,
}

impl WorkerClient {
    pub fn new(engine: RecommendationEngine) -> Self {
        Self { engine }
    }

    /// Connects to the coordinator at `address` and runs one session.
    pub async fn run(&self, address: &str, connect_timeout: Duration) -> Result<WorkerOutcome> {
        tracing::info!("Connecting to coordinator at {}", address);

        let stream = tokio::time::timeout(connect_timeout, TcpStream::connect(address))
            .await
            .map_err(|_| TransportError::Timeout(connect_timeout))??;

        tracing::info!("Connected to coordinator");
        self.process(stream).await
    }

    /// Runs one session over an already established stream.
    pub async fn process<S>(&self, stream: S) -> Result<WorkerOutcome>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let mut stream = BufReader::new(stream);

        let partition = match read_frame(&mut stream).await? {
            WorkMessage::NoMoreWork => {
                tracing::info!("No more work assigned by coordinator");
                return Ok(WorkerOutcome::NoMoreWork);
            }
            WorkMessage::PartitionOffer(partition) => partition,
        };

        let index = partition.index();
        let reviews = partition.len();
        tracing::info!("Received partition {} with {} reviews", index, reviews);

        let engine = self.engine;
        let started = std::time::Instant::now();
        let result = tokio::task::spawn_blocking(move || engine.compute(partition.reviews()))
            .await
            .map_err(|e| RecommenderError::Computation(e.to_string()))?;

        let users = result.user_count();
        tracing::info!(
            "Computed {} recommendations for {} users in {:.2?}",
            result.recommendation_count(),
            users,
            started.elapsed()
        );

        write_frame(&mut stream, &result).await?;
        stream.shutdown().await?;
        tracing::info!("Results sent to coordinator");

        Ok(WorkerOutcome::Processed {
            partition: index,
            reviews,
            users,
        })
    }
}

impl Default for WorkerClient {
    fn default() -> Self {
        Self::new(RecommendationEngine::default())
    }
}
