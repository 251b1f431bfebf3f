//! Stats module - aggregates and descriptive statistics over the joined table

mod aggregator;
mod calculator;

pub use aggregator::{Aggregator, CategoryCount, ProductAnalysis};
pub use calculator::{ColumnSummary, StatsCalculator};

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}
