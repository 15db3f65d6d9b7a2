//! Assignment State
//!
//! The cursor over the partition list and the per-partition lifecycle. Always
//! accessed under the coordinator's assignment mutex, so nothing here synchronizes
//! on its own.

/// Lifecycle of a partition within one run.
///
/// `Unclaimed -> Claimed -> Completed | Forfeited`. A forfeited partition is not
/// offered again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionStatus {
    /// Not yet handed to any worker.
    Unclaimed,
    /// Offered to a worker whose result has not arrived yet.
    Claimed,
    /// The worker's result was received and stored.
    Completed,
    /// The worker disconnected, sent garbage or timed out.
    Forfeited,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub unclaimed: usize,
    pub claimed: usize,
    pub completed: usize,
    pub forfeited: usize,
}

#[derive(Debug)]
pub(crate) struct AssignmentState {
    cursor: usize,
    claimed: usize,
    statuses: Vec<PartitionStatus>,
}

impl AssignmentState {
    pub(crate) fn new(partition_count: usize) -> Self {
        Self {
            cursor: 0,
            claimed: 0,
            statuses: vec![PartitionStatus::Unclaimed; partition_count],
        }
    }

    /// Advances the cursor and returns the index it pointed at, or `None` once every
    /// partition has been handed out.
    pub(crate) fn claim_next(&mut self) -> Option<usize> {
        if self.cursor >= self.statuses.len() {
            return None;
        }

        let index = self.cursor;
        self.cursor += 1;
        self.claimed += 1;
        self.statuses[index] = PartitionStatus::Claimed;
        Some(index)
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.cursor >= self.statuses.len()
    }

    pub(crate) fn claimed(&self) -> usize {
        self.claimed
    }

    pub(crate) fn status(&self, index: usize) -> Option<PartitionStatus> {
        self.statuses.get(index).copied()
    }

    /// Moves a claimed partition to a terminal state. Returns `false` (and changes
    /// nothing) if the partition was not in `Claimed`.
    pub(crate) fn finish(&mut self, index: usize, outcome: PartitionStatus) -> bool {
        match self.statuses.get_mut(index) {
            Some(status @ PartitionStatus::Claimed) => {
                *status = outcome;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for status in &self.statuses {
            match status {
                PartitionStatus::Unclaimed => counts.unclaimed += 1,
                PartitionStatus::Claimed => counts.claimed += 1,
                PartitionStatus::Completed => counts.completed += 1,
                PartitionStatus::Forfeited => counts.forfeited += 1,
            }
        }
        counts
    }
}
