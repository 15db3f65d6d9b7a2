use super::types::{Partition, Review};
use crate::error::{RecommenderError, Result};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Splits `reviews` into at most `n` contiguous partitions of `ceil(len / n)` rows.
///
/// Order is preserved and the last partition is shorter when the length does not
/// divide evenly. An empty input yields no partitions.
pub fn split(reviews: Vec<Review>, n: usize) -> Result<Vec<Partition>> {
    if n == 0 {
        return Err(RecommenderError::InvalidInput(
            "partition count must be positive".to_string(),
        ));
    }

    if reviews.is_empty() {
        return Ok(Vec::new());
    }

    let partition_size = reviews.len().div_ceil(n);

    let partitions: Vec<Partition> = reviews
        .chunks(partition_size)
        .enumerate()
        .map(|(index, chunk)| Partition::new(index, chunk.to_vec()))
        .collect();

    tracing::debug!(
        "Split {} reviews into {} partitions of up to {} rows",
        reviews.len(),
        partitions.len(),
        partition_size
    );

    Ok(partitions)
}

/// Shuffles in place with an explicit seed, so the same seed always yields the same
/// order. Used to spread categories more evenly across shards.
pub fn shuffle_seeded(reviews: &mut [Review], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    reviews.shuffle(&mut rng);
}
