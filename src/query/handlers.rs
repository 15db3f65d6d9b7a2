use crate::aggregator::store::RecommendationStore;
use crate::dataset::types::normalize_category;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct RecommendationParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RecommendationsResponse {
    pub category: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

/// Routes of the query endpoint, sharing one store.
pub fn router(store: Arc<RecommendationStore>) -> Router {
    Router::new()
        .route("/recommendations/:category", get(handle_recommendations))
        .route("/categories", get(handle_categories))
        .layer(Extension(store))
}

pub async fn handle_recommendations(
    Path(category): Path<String>,
    Query(params): Query<RecommendationParams>,
    Extension(store): Extension<Arc<RecommendationStore>>,
) -> (StatusCode, Json<RecommendationsResponse>) {
    let category = normalize_category(&category);

    if !store.is_ready().await {
        tracing::debug!("Query for '{}' before rankings were published", category);
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(RecommendationsResponse {
                category,
                recommendations: Vec::new(),
            }),
        );
    }

    let mut recommendations = store.query_category(&category).await;
    if let Some(limit) = params.limit {
        recommendations.truncate(limit);
    }
    tracing::debug!(
        "Serving {} recommendations for '{}'",
        recommendations.len(),
        category
    );

    (
        StatusCode::OK,
        Json(RecommendationsResponse {
            category,
            recommendations,
        }),
    )
}

pub async fn handle_categories(
    Extension(store): Extension<Arc<RecommendationStore>>,
) -> (StatusCode, Json<CategoriesResponse>) {
    let status = if store.is_ready().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(CategoriesResponse {
            categories: store.categories().await,
        }),
    )
}
