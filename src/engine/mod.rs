//! Recommendation Engine
//!
//! The computation each worker runs on its partition.
//!
//! ## Pipeline
//! 1. **Ratings**: fold reviews into `user -> product -> stars` (last write wins).
//! 2. **Similarity**: cosine similarity between every pair of users over the products
//!    they both rated; only positive values are kept.
//! 3. **Prediction**: for each user, score unrated products by the similarity-weighted
//!    average rating of similar users and keep those at or above the threshold.
//!
//! ## Submodules
//! - **`similarity`**: rating vectors and pairwise cosine similarity.
//! - **`recommend`**: candidate scoring and the `RecommendationEngine` entry point.

pub mod recommend;
pub mod similarity;

#[cfg(test)]
mod tests;
