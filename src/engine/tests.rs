//! Engine Module Tests
//!
//! ## Test Scopes
//! - **Cosine similarity**: symmetry, disjoint users, identical ratings, zero vectors.
//! - **Rating vectors**: last-write-wins per (user, product).
//! - **Recommendation threshold**: the weighted-average cutoff and its edge cases.

#[cfg(test)]
mod tests {
    use crate::dataset::types::Review;
    use crate::engine::recommend::{
        compute_recommendations, recommend_products, RecommendationEngine, DEFAULT_THRESHOLD,
    };
    use crate::engine::similarity::{
        build_user_ratings, compute_user_similarities, cosine_similarity, Ratings, Similarities,
        UserRatings,
    };

    fn ratings(pairs: &[(&str, f64)]) -> Ratings {
        pairs.iter().map(|(p, r)| (p.to_string(), *r)).collect()
    }

    fn review(user: &str, product: &str, stars: f64) -> Review {
        Review {
            review_id: format!("{}-{}", user, product),
            product_id: product.to_string(),
            reviewer_id: user.to_string(),
            stars,
            category: "books".to_string(),
        }
    }

    // ============================================================
    // COSINE SIMILARITY
    // ============================================================

    #[test]
    fn test_cosine_is_symmetric() {
        let a = ratings(&[("p1", 5.0), ("p2", 3.0), ("p3", 1.0)]);
        let b = ratings(&[("p1", 2.0), ("p3", 4.0), ("p4", 5.0)]);

        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn test_cosine_without_shared_products_is_zero() {
        let a = ratings(&[("p1", 5.0)]);
        let b = ratings(&[("p2", 5.0)]);

        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_cosine_identical_single_product_is_one() {
        let a = ratings(&[("p1", 4.0)]);
        let b = ratings(&[("p1", 4.0)]);

        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_zero_vector_is_zero_not_nan() {
        let a = ratings(&[("p1", 0.0), ("p2", 0.0)]);
        let b = ratings(&[("p1", 3.0), ("p2", 4.0)]);

        let similarity = cosine_similarity(&a, &b);
        assert!(!similarity.is_nan());
        assert_eq!(similarity, 0.0);

        assert_eq!(cosine_similarity(&Ratings::new(), &Ratings::new()), 0.0);
    }

    #[test]
    fn test_cosine_restricted_to_intersection() {
        // Only p1 is shared, so the extra products do not dilute the score.
        let a = ratings(&[("p1", 3.0), ("p2", 5.0)]);
        let b = ratings(&[("p1", 1.0), ("p9", 1.0)]);

        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-12);
    }

    // ============================================================
    // RATING VECTORS & SIMILARITY MATRIX
    // ============================================================

    #[test]
    fn test_build_user_ratings_last_write_wins() {
        let reviews = vec![
            review("u1", "p1", 1.0),
            review("u1", "p2", 4.0),
            review("u1", "p1", 5.0),
        ];

        let user_ratings = build_user_ratings(&reviews);

        assert_eq!(user_ratings.len(), 1);
        assert_eq!(user_ratings["u1"]["p1"], 5.0);
        assert_eq!(user_ratings["u1"]["p2"], 4.0);
    }

    #[test]
    fn test_similarities_are_symmetric_and_positive_only() {
        let reviews = vec![
            review("u1", "p1", 5.0),
            review("u2", "p1", 4.0),
            review("u3", "p2", 3.0),
        ];

        let similarities = compute_user_similarities(&build_user_ratings(&reviews));

        assert_eq!(similarities["u1"]["u2"], similarities["u2"]["u1"]);
        assert!(!similarities.contains_key("u3"));
        assert!(!similarities["u1"].contains_key("u1"));
    }

    // ============================================================
    // RECOMMENDATION THRESHOLD
    // ============================================================

    #[test]
    fn test_similar_user_product_is_recommended() {
        let reviews = vec![
            review("A", "P", 5.0),
            review("B", "P", 5.0),
            review("B", "Q", 5.0),
        ];

        let result = compute_recommendations(&reviews);

        assert_eq!(result.recommendations["A"], vec!["Q".to_string()]);
        assert!(result.recommendations["B"].is_empty());
    }

    #[test]
    fn test_no_recommendation_without_candidate_rating() {
        let reviews = vec![review("A", "P", 5.0), review("B", "P", 5.0)];

        let result = compute_recommendations(&reviews);

        assert!(result.recommendations["A"].is_empty());
    }

    #[test]
    fn test_no_recommendation_without_similarity() {
        let mut user_ratings = UserRatings::new();
        user_ratings.insert("A".to_string(), ratings(&[("P", 5.0)]));
        user_ratings.insert("B".to_string(), ratings(&[("P", 5.0), ("Q", 5.0)]));

        let recommendations =
            recommend_products("A", &user_ratings, &Similarities::new(), DEFAULT_THRESHOLD);

        assert!(recommendations.is_empty());
    }

    #[test]
    fn test_low_predicted_rating_is_dropped() {
        let reviews = vec![
            review("A", "P", 5.0),
            review("B", "P", 5.0),
            review("B", "Q", 1.0),
        ];

        let result = compute_recommendations(&reviews);

        assert!(result.recommendations["A"].is_empty());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let reviews = vec![
            review("A", "P", 5.0),
            review("B", "P", 5.0),
            review("B", "Q", 2.0),
        ];

        let result = compute_recommendations(&reviews);

        assert_eq!(result.recommendations["A"], vec!["Q".to_string()]);
    }

    #[test]
    fn test_weighted_average_across_neighbours() {
        // A is similar to B and C with equal weight; Q averages (5 + 1) / 2 = 3.
        let reviews = vec![
            review("A", "P", 4.0),
            review("B", "P", 4.0),
            review("C", "P", 4.0),
            review("B", "Q", 5.0),
            review("C", "Q", 1.0),
        ];

        let engine = RecommendationEngine::new(3.0);
        assert_eq!(engine.compute(&reviews).recommendations["A"], vec!["Q".to_string()]);

        let strict = RecommendationEngine::new(3.5);
        assert!(strict.compute(&reviews).recommendations["A"].is_empty());
    }

    #[test]
    fn test_every_user_is_present_in_result() {
        let reviews = vec![review("lonely", "p1", 5.0), review("other", "p2", 5.0)];

        let result = compute_recommendations(&reviews);

        assert_eq!(result.user_count(), 2);
        assert_eq!(result.recommendation_count(), 0);
    }

    #[test]
    fn test_empty_partition() {
        let result = compute_recommendations(&[]);
        assert!(result.recommendations.is_empty());
    }
}
