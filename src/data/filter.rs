//! Row selections over the joined table.
//! Every operation returns a new DataFrame; the input is never modified.

use super::columns::{CATEGORY, REVIEW_SCORE};
use polars::prelude::*;
use std::collections::HashSet;

pub struct DataFilter;

impl DataFilter {
    /// Rows whose category equals `category`. Null categories never match.
    pub fn by_category(df: &DataFrame, category: &str) -> PolarsResult<DataFrame> {
        df.clone()
            .lazy()
            .filter(col(CATEGORY).eq(lit(category)))
            .collect()
    }

    /// Rows with `review_score >= min_rating`.
    pub fn by_min_rating(df: &DataFrame, min_rating: u8) -> PolarsResult<DataFrame> {
        df.clone()
            .lazy()
            .filter(col(REVIEW_SCORE).gt_eq(lit(min_rating as i64)))
            .collect()
    }

    /// Distinct non-null categories in first-seen order.
    pub fn unique_categories(df: &DataFrame) -> Vec<String> {
        let Ok(column) = df.column(CATEGORY) else {
            return Vec::new();
        };
        let Ok(values) = column.str() else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        values
            .into_iter()
            .flatten()
            .filter(|v| seen.insert(*v))
            .map(str::to_string)
            .collect()
    }
}
