//! Dashboard Model
//! Everything derived once at startup, plus the per-interaction filtered view.

use crate::data::{DataFilter, DataJoiner, JoinError, SourceTables};
use crate::stats::{
    Aggregator, CategoryCount, ColumnSummary, ProductAnalysis, StatsCalculator, StatsError,
};
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Join failed: {0}")]
    Join(#[from] JoinError),
    #[error("Aggregation failed: {0}")]
    Stats(#[from] StatsError),
}

/// Immutable analysis results over the joined table.
pub struct Dashboard {
    pub joined: DataFrame,
    pub category_counts: Vec<CategoryCount>,
    pub products: Vec<ProductAnalysis>,
    pub summaries: Vec<ColumnSummary>,
    pub categories: Vec<String>,
}

impl Dashboard {
    pub fn build(tables: &SourceTables) -> Result<Self, DashboardError> {
        let joined = DataJoiner::join(tables)?;
        let category_counts = Aggregator::category_counts(&joined)?;
        let products = Aggregator::product_analysis(&joined)?;
        let summaries = StatsCalculator::describe(&joined)?;
        let categories = DataFilter::unique_categories(&joined);

        log::info!(
            "Dashboard ready: {} rows, {} categories, {} products",
            joined.height(),
            categories.len(),
            products.len()
        );

        Ok(Self {
            joined,
            category_counts,
            products,
            summaries,
            categories,
        })
    }

    /// Initial widget values: first category, configured minimum rating.
    pub fn default_selection(&self, min_rating: u8) -> Selection {
        Selection {
            category: self.categories.first().cloned(),
            min_rating,
        }
    }
}

/// Current widget values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub category: Option<String>,
    pub min_rating: u8,
}

/// Filtered tables for one selection.
pub struct DashboardView {
    pub selection: Selection,
    pub by_category: DataFrame,
    pub by_rating: DataFrame,
}

impl DashboardView {
    /// Re-run the filter chain from the joined table.
    pub fn evaluate(dashboard: &Dashboard, selection: &Selection) -> PolarsResult<Self> {
        let by_category = match &selection.category {
            Some(category) => DataFilter::by_category(&dashboard.joined, category)?,
            None => dashboard.joined.clear(),
        };
        let by_rating = DataFilter::by_min_rating(&dashboard.joined, selection.min_rating)?;

        log::debug!(
            "View for {:?}: {} category rows, {} rating rows",
            selection,
            by_category.height(),
            by_rating.height()
        );

        Ok(Self {
            selection: selection.clone(),
            by_category,
            by_rating,
        })
    }
}
