use super::similarity::{build_user_ratings, compute_user_similarities, Similarities, UserRatings};
use crate::dataset::types::Review;
use crate::protocol::messages::WorkerResult;

use std::collections::BTreeMap;

/// Minimum predicted rating for a product to be recommended.
pub const DEFAULT_THRESHOLD: f64 = 2.0;

/// User-based collaborative filtering over a single partition.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationEngine {
    threshold: f64,
}

impl RecommendationEngine {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Runs the full pipeline: rating vectors, pairwise similarity, then candidate
    /// scoring for every user. Users without any qualifying product still appear in
    /// the result with an empty list.
    pub fn compute(&self, reviews: &[Review]) -> WorkerResult {
        let ratings = build_user_ratings(reviews);
        let similarities = compute_user_similarities(&ratings);

        tracing::debug!(
            "Partition has {} users, {} with at least one similar user",
            ratings.len(),
            similarities.len()
        );

        let recommendations = ratings
            .keys()
            .map(|user_id| {
                let products = recommend_products(user_id, &ratings, &similarities, self.threshold);
                (user_id.clone(), products)
            })
            .collect();

        WorkerResult { recommendations }
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

/// Predicts ratings for products the target has not rated, as the
/// similarity-weighted average of what similar users gave them, and returns those
/// at or above `threshold`.
pub fn recommend_products(
    target_user: &str,
    ratings: &UserRatings,
    similarities: &Similarities,
    threshold: f64,
) -> Vec<String> {
    let Some(neighbours) = similarities.get(target_user) else {
        return Vec::new();
    };
    let rated_by_target = ratings.get(target_user);

    // product -> (Σ sim * rating, Σ sim)
    let mut candidates: BTreeMap<&str, (f64, f64)> = BTreeMap::new();

    for (other_user, similarity) in neighbours {
        let Some(other_ratings) = ratings.get(other_user) else {
            continue;
        };

        for (product_id, rating) in other_ratings {
            if rated_by_target.is_some_and(|own| own.contains_key(product_id)) {
                continue;
            }
            let entry = candidates.entry(product_id.as_str()).or_insert((0.0, 0.0));
            entry.0 += similarity * rating;
            entry.1 += similarity;
        }
    }

    candidates
        .into_iter()
        .filter_map(|(product_id, (score, weight))| {
            if weight == 0.0 {
                return None;
            }
            let predicted = score / weight;
            tracing::trace!(
                "User {}, product {}, predicted {:.3}",
                target_user,
                product_id,
                predicted
            );
            (predicted >= threshold).then(|| product_id.to_string())
        })
        .collect()
}

/// Convenience wrapper using the default threshold.
pub fn compute_recommendations(reviews: &[Review]) -> WorkerResult {
    RecommendationEngine::default().compute(reviews)
}
