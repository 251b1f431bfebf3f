//! Aggregator Module
//! Category purchase counts and per-product frequency / mean rating.

use super::StatsError;
use crate::data::columns::{CATEGORY, PRODUCT_ID, REVIEW_SCORE};
use polars::prelude::*;

const COUNT: &str = "count";
const FREQUENCY: &str = "frequency";
const AVERAGE_RATING: &str = "average_rating";

/// Label shown for rows whose product has no category.
pub const UNCATEGORIZED: &str = "(uncategorized)";

/// Number of joined rows in one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCount {
    pub category: Option<String>,
    pub count: usize,
}

impl CategoryCount {
    pub fn label(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED)
    }
}

/// Purchase frequency and mean review score of one product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductAnalysis {
    pub product_id: String,
    pub frequency: usize,
    pub average_rating: f64,
}

pub struct Aggregator;

impl Aggregator {
    /// Rows per category, most purchased first (ties by name).
    ///
    /// Rows with a null category form their own bucket, so the counts
    /// always add up to the joined row count.
    pub fn category_counts(df: &DataFrame) -> Result<Vec<CategoryCount>, StatsError> {
        let grouped = df
            .clone()
            .lazy()
            .group_by([col(CATEGORY)])
            .agg([len().alias(COUNT)])
            .collect()?;

        let category_col = grouped.column(CATEGORY)?.cast(&DataType::String)?;
        let count_col = grouped.column(COUNT)?.cast(&DataType::Int64)?;

        let mut counts: Vec<CategoryCount> = category_col
            .str()?
            .into_iter()
            .zip(count_col.i64()?.into_iter())
            .map(|(category, count)| CategoryCount {
                category: category.map(str::to_string),
                count: count.unwrap_or(0) as usize,
            })
            .collect();

        counts.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.category.cmp(&b.category))
        });

        Ok(counts)
    }

    /// Frequency and mean review score per product, ordered by product id.
    pub fn product_analysis(df: &DataFrame) -> Result<Vec<ProductAnalysis>, StatsError> {
        let grouped = df
            .clone()
            .lazy()
            .filter(col(PRODUCT_ID).is_not_null())
            .group_by([col(PRODUCT_ID)])
            .agg([
                len().alias(FREQUENCY),
                col(REVIEW_SCORE)
                    .cast(DataType::Float64)
                    .mean()
                    .alias(AVERAGE_RATING),
            ])
            .collect()?;

        let id_col = grouped.column(PRODUCT_ID)?.cast(&DataType::String)?;
        let freq_col = grouped.column(FREQUENCY)?.cast(&DataType::Int64)?;
        let rating_col = grouped.column(AVERAGE_RATING)?.cast(&DataType::Float64)?;

        let mut products: Vec<ProductAnalysis> = id_col
            .str()?
            .into_iter()
            .zip(freq_col.i64()?.into_iter())
            .zip(rating_col.f64()?.into_iter())
            .filter_map(|((id, freq), rating)| {
                Some(ProductAnalysis {
                    product_id: id?.to_string(),
                    frequency: freq.unwrap_or(0) as usize,
                    average_rating: rating.unwrap_or(f64::NAN),
                })
            })
            .collect();

        products.sort_by(|a, b| a.product_id.cmp(&b.product_id));
        Ok(products)
    }
}
