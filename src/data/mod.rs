//! Data module - CSV loading, joining and filtering

mod filter;
mod joiner;
mod loader;

pub use filter::DataFilter;
pub use joiner::{DataJoiner, JoinError};
pub use loader::{DataLoader, SourceTables};

/// Column names shared by the input tables and the joined table.
pub mod columns {
    pub const ORDER_ID: &str = "order_id";
    pub const PRODUCT_ID: &str = "product_id";
    pub const CATEGORY: &str = "product_category_name";
    pub const REVIEW_SCORE: &str = "review_score";
}
