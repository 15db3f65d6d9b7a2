//! User Similarity
//!
//! Builds per-user rating vectors from a partition and compares every pair of users
//! with cosine similarity restricted to the products both have rated.
//!
//! The pairwise pass is O(U² · P) for U users and P products per user. That is
//! acceptable at shard size and is the known scaling limit of a worker.

use crate::dataset::types::Review;

use std::collections::BTreeMap;

/// Ratings of a single user: `product id -> stars`.
pub type Ratings = BTreeMap<String, f64>;

/// `user id -> Ratings` for every reviewer present in a partition.
pub type UserRatings = BTreeMap<String, Ratings>;

/// Symmetric `user -> other user -> similarity`, holding only positive entries.
pub type Similarities = BTreeMap<String, BTreeMap<String, f64>>;

/// Folds reviews into per-user rating vectors. A later review of the same product by
/// the same user overwrites the earlier one.
pub fn build_user_ratings(reviews: &[Review]) -> UserRatings {
    let mut ratings = UserRatings::new();
    for review in reviews {
        ratings
            .entry(review.reviewer_id.clone())
            .or_default()
            .insert(review.product_id.clone(), review.stars);
    }
    ratings
}

/// Cosine similarity over the products rated by both users.
///
/// Returns `0.0` when the users share no products or either restricted vector has
/// zero magnitude, never `NaN`.
pub fn cosine_similarity(a: &Ratings, b: &Ratings) -> f64 {
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;

    for (product_id, rating_a) in a {
        if let Some(rating_b) = b.get(product_id) {
            dot += rating_a * rating_b;
            norm_a += rating_a * rating_a;
            norm_b += rating_b * rating_b;
        }
    }

    let denominator = norm_a.sqrt() * norm_b.sqrt();
    if denominator == 0.0 {
        return 0.0;
    }
    dot / denominator
}

/// Computes similarity for every unordered pair of distinct users and keeps the
/// strictly positive ones, stored in both directions.
pub fn compute_user_similarities(ratings: &UserRatings) -> Similarities {
    let users: Vec<(&String, &Ratings)> = ratings.iter().collect();
    let mut similarities = Similarities::new();

    for (i, (user_a, ratings_a)) in users.iter().enumerate() {
        for (user_b, ratings_b) in users.iter().skip(i + 1) {
            let similarity = cosine_similarity(ratings_a, ratings_b);
            if similarity <= 0.0 {
                continue;
            }

            tracing::trace!(
                "Similarity between user {} and user {}: {:.4}",
                user_a,
                user_b,
                similarity
            );

            similarities
                .entry((*user_a).clone())
                .or_default()
                .insert((*user_b).clone(), similarity);
            similarities
                .entry((*user_b).clone())
                .or_default()
                .insert((*user_a).clone(), similarity);
        }
    }

    similarities
}
