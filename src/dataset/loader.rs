//! CSV Ingestion
//!
//! Reads the review export into typed [`Review`] records and builds the
//! [`CategoryIndex`] used later by aggregation.
//!
//! The export has a header row and a leading row-number column, so the fields we
//! care about sit at fixed positions (see the `*_COLUMN` constants). Rows with an
//! unparseable star rating or too few columns are skipped with a warning.

use super::types::{normalize_category, CategoryIndex, Review};
use crate::error::{RecommenderError, Result};

use std::io::Read;
use std::path::Path;

const REVIEW_ID_COLUMN: usize = 1;
const PRODUCT_ID_COLUMN: usize = 2;
const REVIEWER_ID_COLUMN: usize = 3;
const STARS_COLUMN: usize = 4;
const CATEGORY_COLUMN: usize = 8;

/// Parsed reviews plus the product → category lookup derived from them.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub reviews: Vec<Review>,
    pub categories: CategoryIndex,
}

/// Loads and parses the CSV file at `path`.
pub fn load_reviews(path: &Path) -> Result<Dataset> {
    tracing::info!("Loading reviews from {}", path.display());

    let file = std::fs::File::open(path).map_err(|e| {
        RecommenderError::Dataset(format!("cannot open {}: {}", path.display(), e))
    })?;

    let dataset = parse_reviews(file)?;
    tracing::info!(
        "Loaded {} reviews covering {} products",
        dataset.reviews.len(),
        dataset.categories.len()
    );
    Ok(dataset)
}

/// Parses reviews from any CSV source. The first row is treated as a header.
pub fn parse_reviews<R: Read>(source: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let mut reviews = Vec::new();
    let mut categories = CategoryIndex::new();

    for (row, record) in reader.records().enumerate() {
        let record = record?;

        let field = |column: usize| record.get(column).map(str::trim);

        let (Some(review_id), Some(product_id), Some(reviewer_id), Some(stars), Some(category)) = (
            field(REVIEW_ID_COLUMN),
            field(PRODUCT_ID_COLUMN),
            field(REVIEWER_ID_COLUMN),
            field(STARS_COLUMN),
            record.get(CATEGORY_COLUMN),
        ) else {
            tracing::warn!(
                "Skipping row {}: expected at least {} columns, found {}",
                row + 1,
                CATEGORY_COLUMN + 1,
                record.len()
            );
            continue;
        };

        let stars = match stars.parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => {
                tracing::warn!(
                    "Skipping review {}: cannot parse stars '{}'",
                    review_id,
                    stars
                );
                continue;
            }
        };

        let review = Review {
            review_id: review_id.to_string(),
            product_id: product_id.to_string(),
            reviewer_id: reviewer_id.to_string(),
            stars,
            category: normalize_category(category),
        };

        categories.insert(&review.product_id, &review.category);
        reviews.push(review);
    }

    if reviews.is_empty() {
        return Err(RecommenderError::EmptyDataset(
            "no rows could be parsed".to_string(),
        ));
    }

    Ok(Dataset {
        reviews,
        categories,
    })
}
