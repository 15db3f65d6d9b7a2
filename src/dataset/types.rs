//! Dataset Types
//!
//! Records produced by ingestion and the shards handed out to workers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// A single user review of a product.
///
/// Immutable once parsed. The serde names match the JSON workers exchange with
/// the coordinator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub review_id: String,
    pub product_id: String,
    pub reviewer_id: String,
    pub stars: f64,
    #[serde(rename = "product_category")]
    pub category: String,
}

/// A contiguous, immutable slice of the dataset assigned to one worker session.
///
/// Cloning is cheap: the reviews are shared behind an `Arc`, so the coordinator can
/// hand a partition to a session task without copying the rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    index: usize,
    reviews: Arc<[Review]>,
}

impl Partition {
    pub fn new(index: usize, reviews: Vec<Review>) -> Self {
        Self {
            index,
            reviews: Arc::from(reviews),
        }
    }

    /// Position of this partition in the coordinator's partition list.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }
}

/// Maps product IDs to their (normalised) category.
///
/// Built alongside ingestion. When a product appears with several categories the
/// last row wins.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    categories: HashMap<String, String>,
}

impl CategoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_reviews(reviews: &[Review]) -> Self {
        let mut index = Self::new();
        for review in reviews {
            index.insert(&review.product_id, &review.category);
        }
        index
    }

    pub fn insert(&mut self, product_id: &str, category: &str) {
        self.categories
            .insert(product_id.to_string(), category.to_string());
    }

    /// Returns `None` for unknown products and for products with an empty category.
    pub fn category_of(&self, product_id: &str) -> Option<&str> {
        self.categories
            .get(product_id)
            .map(String::as_str)
            .filter(|category| !category.is_empty())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Normalises a category name: trimmed and lower-cased.
///
/// Applied both at ingestion and on every query so lookups are case-insensitive.
pub fn normalize_category(raw: &str) -> String {
    raw.trim().to_lowercase()
}
