use super::assignment::{AssignmentState, PartitionStatus, StatusCounts};
use super::session::{exchange, turn_away, SessionId, SessionOutcome};
use crate::dataset::types::Partition;
use crate::error::TransportError;
use crate::protocol::messages::WorkerResult;

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tokio::time::Instant;

/// Hands out partitions to workers and collects their results.
///
/// The assignment cursor and the result collection each sit behind their own mutex.
/// Neither lock is ever held across an `.await`, so a slow worker cannot stall
/// partition assignment for the others.
pub struct Coordinator {
    partitions: Vec<Partition>,
    assignment: Mutex<AssignmentState>,
    results: Mutex<Vec<WorkerResult>>,
    session_timeout: Duration,
}

/// What happened during one distribution run, reported once all sessions ended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub partitions: usize,
    pub completed: Vec<usize>,
    pub forfeited: Vec<usize>,
    /// Never handed out because the accept deadline expired first.
    pub unclaimed: usize,
    /// Sessions that received `NO_MORE_WORK`.
    pub turned_away: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &SessionOutcome) {
        match outcome {
            SessionOutcome::Completed { partition, .. } => self.completed.push(*partition),
            SessionOutcome::Forfeited { partition, .. } => self.forfeited.push(*partition),
            SessionOutcome::NoWorkOffered => self.turned_away += 1,
        }
    }
}

impl Coordinator {
    pub fn new(partitions: Vec<Partition>, session_timeout: Duration) -> Arc<Self> {
        let partition_count = partitions.len();
        Arc::new(Self {
            partitions,
            assignment: Mutex::new(AssignmentState::new(partition_count)),
            results: Mutex::new(Vec::new()),
            session_timeout,
        })
    }

    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }

    /// Atomically takes the next unclaimed partition. Returns `None` once every
    /// partition has been claimed. Never waits on I/O.
    pub fn claim_next_partition(&self) -> Option<Partition> {
        let index = self.assignment().claim_next()?;
        Some(self.partitions[index].clone())
    }

    pub fn is_exhausted(&self) -> bool {
        self.assignment().is_exhausted()
    }

    pub fn claimed_count(&self) -> usize {
        self.assignment().claimed()
    }

    pub fn partition_status(&self, index: usize) -> Option<PartitionStatus> {
        self.assignment().status(index)
    }

    pub fn status_counts(&self) -> StatusCounts {
        self.assignment().counts()
    }

    /// Number of results delivered so far.
    pub fn result_count(&self) -> usize {
        self.results().len()
    }

    /// Drains the collected results for aggregation.
    pub fn take_results(&self) -> Vec<WorkerResult> {
        std::mem::take(&mut *self.results())
    }

    /// Drives one worker connection through its whole session: claim a partition
    /// (or turn the worker away), send it, wait for the result and store it.
    ///
    /// Transport and decode failures never escape; they forfeit the partition and
    /// are reported through the returned outcome.
    pub async fn accept_session<S>(&self, stream: S, peer: &str) -> SessionOutcome
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let offer = self.claim_next_partition();
        self.run_session(stream, offer, peer).await
    }

    async fn run_session<S>(&self, stream: S, offer: Option<Partition>, peer: &str) -> SessionOutcome
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let session_id = SessionId::new();
        tracing::info!("Session {} opened for worker {}", session_id, peer);

        let Some(partition) = offer else {
            tracing::info!("No more partitions to assign, turning away worker {}", peer);
            match tokio::time::timeout(self.session_timeout, turn_away(stream)).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::warn!("Failed to send NO_MORE_WORK to worker {}: {}", peer, e)
                }
                Err(_) => tracing::warn!("Timed out sending NO_MORE_WORK to worker {}", peer),
            }
            return SessionOutcome::NoWorkOffered;
        };

        let index = partition.index();
        tracing::info!(
            "Session {}: offering partition {} ({} reviews) to worker {}",
            session_id,
            index,
            partition.len(),
            peer
        );

        let received = match tokio::time::timeout(self.session_timeout, exchange(stream, &partition)).await {
            Ok(result) => result,
            Err(_) => Err(TransportError::Timeout(self.session_timeout).into()),
        };

        match received {
            Ok(result) => {
                let users = result.user_count();
                tracing::info!(
                    "Session {}: received {} recommendations for {} users from worker {}",
                    session_id,
                    result.recommendation_count(),
                    users,
                    peer
                );
                self.deliver_result(index, result);
                SessionOutcome::Completed {
                    partition: index,
                    users,
                }
            }
            Err(error) => {
                tracing::warn!(
                    "Session {}: worker {} forfeited partition {}: {}",
                    session_id,
                    peer,
                    index,
                    error
                );
                self.assignment().finish(index, PartitionStatus::Forfeited);
                SessionOutcome::Forfeited {
                    partition: index,
                    error,
                }
            }
        }
    }

    fn deliver_result(&self, index: usize, result: WorkerResult) {
        self.results().push(result);
        self.assignment().finish(index, PartitionStatus::Completed);
    }

    /// Accepts workers until every partition is claimed or `accept_timeout` expires,
    /// then waits for all in-flight sessions before returning.
    ///
    /// The listener is dropped as soon as the accept loop ends, so late workers get
    /// a refused connection rather than hanging.
    pub async fn serve(self: Arc<Self>, listener: TcpListener, accept_timeout: Duration) -> RunSummary {
        let deadline = Instant::now() + accept_timeout;
        let mut sessions = JoinSet::new();

        if let Ok(addr) = listener.local_addr() {
            tracing::info!(
                "Coordinator listening on {} with {} partitions",
                addr,
                self.partition_count()
            );
        }

        while !self.is_exhausted() {
            let accepted = match tokio::time::timeout_at(deadline, listener.accept()).await {
                Ok(accepted) => accepted,
                Err(_) => {
                    tracing::warn!(
                        "Accept deadline expired with {} of {} partitions claimed",
                        self.claimed_count(),
                        self.partition_count()
                    );
                    break;
                }
            };

            let (stream, peer) = match accepted {
                Ok(connection) => connection,
                Err(e) => {
                    tracing::error!("Error accepting connection: {}", e);
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    continue;
                }
            };

            // Claim here rather than inside the task so the exhaustion check below
            // already sees this connection's claim.
            let offer = self.claim_next_partition();
            let coordinator = self.clone();
            sessions.spawn(async move {
                coordinator
                    .run_session(stream, offer, &peer.to_string())
                    .await
            });
        }

        drop(listener);
        tracing::info!("Stopped accepting workers, waiting for {} sessions", sessions.len());

        let mut summary = RunSummary {
            partitions: self.partition_count(),
            ..RunSummary::default()
        };

        while let Some(joined) = sessions.join_next().await {
            match joined {
                Ok(outcome) => summary.record(&outcome),
                Err(e) => tracing::error!("Session task failed: {}", e),
            }
        }

        summary.completed.sort_unstable();
        summary.forfeited.sort_unstable();
        summary.unclaimed = self.status_counts().unclaimed;

        tracing::info!(
            "Distribution finished: {} completed, {} forfeited, {} unclaimed, {} turned away",
            summary.completed.len(),
            summary.forfeited.len(),
            summary.unclaimed,
            summary.turned_away
        );

        summary
    }

    fn assignment(&self) -> std::sync::MutexGuard<'_, AssignmentState> {
        self.assignment.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn results(&self) -> std::sync::MutexGuard<'_, Vec<WorkerResult>> {
        self.results.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
