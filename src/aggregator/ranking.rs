//! Vote Counting & Ranking
//!
//! Folds every worker's `user -> [product]` lists into `category -> ranked products`.
//! Each (user, product) occurrence is one vote for that product in its category;
//! duplicates within one user's list are counted, not collapsed.

use crate::dataset::types::CategoryIndex;
use crate::protocol::messages::WorkerResult;

use std::collections::HashMap;

/// Resolves a product to its category. `None` means the product is skipped.
pub trait CategoryLookup {
    fn category_of(&self, product_id: &str) -> Option<&str>;
}

impl CategoryLookup for CategoryIndex {
    fn category_of(&self, product_id: &str) -> Option<&str> {
        CategoryIndex::category_of(self, product_id)
    }
}

impl CategoryLookup for HashMap<String, String> {
    fn category_of(&self, product_id: &str) -> Option<&str> {
        self.get(product_id)
            .map(String::as_str)
            .filter(|category| !category.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedProduct {
    pub product_id: String,
    pub votes: usize,
}

/// Final per-category rankings. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct AggregatedState {
    rankings: HashMap<String, Vec<RankedProduct>>,
}

impl AggregatedState {
    /// Ranked entries for a category, or an empty slice when the category is unknown.
    pub fn ranking(&self, category: &str) -> &[RankedProduct] {
        self.rankings
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Ranked product IDs for a category, best first.
    pub fn products(&self, category: &str) -> Vec<String> {
        self.ranking(category)
            .iter()
            .map(|ranked| ranked.product_id.clone())
            .collect()
    }

    /// All categories with at least one vote, sorted.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self.rankings.keys().cloned().collect();
        categories.sort();
        categories
    }

    pub fn category_count(&self) -> usize {
        self.rankings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rankings.is_empty()
    }
}

/// Merges worker results into per-category rankings.
///
/// Products are ordered by descending vote count, ties broken by product ID so the
/// output does not depend on map iteration order. Products whose category cannot be
/// resolved are dropped silently.
pub fn aggregate<L>(results: &[WorkerResult], lookup: &L) -> AggregatedState
where
    L: CategoryLookup + ?Sized,
{
    let mut votes: HashMap<String, HashMap<String, usize>> = HashMap::new();
    let mut unresolved = 0usize;

    for result in results {
        for products in result.recommendations.values() {
            for product_id in products {
                let Some(category) = lookup.category_of(product_id) else {
                    unresolved += 1;
                    continue;
                };
                *votes
                    .entry(category.to_string())
                    .or_default()
                    .entry(product_id.clone())
                    .or_insert(0) += 1;
            }
        }
    }

    if unresolved > 0 {
        tracing::debug!("Skipped {} recommendations with unknown category", unresolved);
    }

    let rankings = votes
        .into_iter()
        .map(|(category, products)| {
            let mut ranked: Vec<RankedProduct> = products
                .into_iter()
                .map(|(product_id, votes)| RankedProduct { product_id, votes })
                .collect();
            ranked.sort_by(|a, b| {
                b.votes
                    .cmp(&a.votes)
                    .then_with(|| a.product_id.cmp(&b.product_id))
            });
            (category, ranked)
        })
        .collect();

    AggregatedState { rankings }
}
