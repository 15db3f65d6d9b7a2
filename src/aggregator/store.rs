//! Published Rankings
//!
//! Holds the current [`AggregatedState`] behind a reader-writer lock. Publishing swaps
//! in a whole new snapshot under one write, so readers see either the previous
//! rankings or the new ones, never a half-built map.

use super::ranking::AggregatedState;

use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct RecommendationStore {
    state: RwLock<Option<Arc<AggregatedState>>>,
}

impl RecommendationStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Replaces the published rankings.
    pub async fn publish(&self, state: AggregatedState) {
        let categories = state.category_count();
        *self.state.write().await = Some(Arc::new(state));
        tracing::info!("Published rankings for {} categories", categories);
    }

    /// Current snapshot, if rankings have been published. The lock is released
    /// before returning.
    pub async fn snapshot(&self) -> Option<Arc<AggregatedState>> {
        self.state.read().await.clone()
    }

    pub async fn is_ready(&self) -> bool {
        self.state.read().await.is_some()
    }

    /// Ranked products for `category`. Unknown categories and a store that has not
    /// been published yet both yield an empty list.
    pub async fn query_category(&self, category: &str) -> Vec<String> {
        match self.snapshot().await {
            Some(state) => state.products(category),
            None => Vec::new(),
        }
    }

    pub async fn categories(&self) -> Vec<String> {
        match self.snapshot().await {
            Some(state) => state.categories(),
            None => Vec::new(),
        }
    }
}
