//! CSV Data Loader Module
//! Reads the order item, review and product tables using Polars.

use super::columns::{CATEGORY, ORDER_ID, PRODUCT_ID, REVIEW_SCORE};
use crate::config::DataSources;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("CSV file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to load CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        source: PolarsError,
    },
    #[error("Table '{table}' is missing required column '{column}'")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
}

/// The three raw input tables.
#[derive(Debug, Clone)]
pub struct SourceTables {
    pub order_items: DataFrame,
    pub order_reviews: DataFrame,
    pub products: DataFrame,
}

/// Loads CSV files with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a single CSV file with a header row.
    pub fn load_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        if !path.exists() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        let csv_err = |source: PolarsError| LoaderError::Csv {
            path: path.to_path_buf(),
            source,
        };

        LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()
            .map_err(csv_err)?
            .collect()
            .map_err(csv_err)
    }

    /// Load all three input tables and check their join columns.
    pub fn load_sources(sources: &DataSources) -> Result<SourceTables, LoaderError> {
        let order_items = Self::load_csv(&sources.order_items_path)?;
        Self::require_columns("order_items", &order_items, &[ORDER_ID, PRODUCT_ID])?;
        log::info!(
            "Loaded {} order items from {}",
            order_items.height(),
            sources.order_items_path.display()
        );

        let order_reviews = Self::load_csv(&sources.order_reviews_path)?;
        Self::require_columns("order_reviews", &order_reviews, &[ORDER_ID, REVIEW_SCORE])?;
        log::info!(
            "Loaded {} reviews from {}",
            order_reviews.height(),
            sources.order_reviews_path.display()
        );

        let products = Self::load_csv(&sources.products_path)?;
        Self::require_columns("products", &products, &[PRODUCT_ID, CATEGORY])?;
        log::info!(
            "Loaded {} products from {}",
            products.height(),
            sources.products_path.display()
        );

        Ok(SourceTables {
            order_items,
            order_reviews,
            products,
        })
    }

    fn require_columns(
        table: &'static str,
        df: &DataFrame,
        required: &[&'static str],
    ) -> Result<(), LoaderError> {
        match required
            .iter()
            .find(|column| df.get_column_index(column).is_none())
        {
            Some(&column) => Err(LoaderError::MissingColumn { table, column }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_sources(dir: &Path, products: &str) -> DataSources {
        let sources = DataSources {
            order_items_path: dir.join("order_items_dataset.csv"),
            order_reviews_path: dir.join("order_reviews_dataset.csv"),
            products_path: dir.join("products_dataset.csv"),
        };
        fs::write(
            &sources.order_items_path,
            "order_id,order_item_id,product_id,price\no1,1,p1,10.5\no2,1,p2,20.0\n",
        )
        .unwrap();
        fs::write(
            &sources.order_reviews_path,
            "review_id,order_id,review_score\nr1,o1,5\nr2,o2,3\n",
        )
        .unwrap();
        fs::write(&sources.products_path, products).unwrap();
        sources
    }

    #[test]
    fn loads_all_three_tables() {
        let dir = tempfile::tempdir().unwrap();
        let sources = write_sources(
            dir.path(),
            "product_id,product_category_name\np1,toys\np2,books\n",
        );

        let tables = DataLoader::load_sources(&sources).unwrap();
        assert_eq!(tables.order_items.height(), 2);
        assert_eq!(tables.order_reviews.height(), 2);
        assert_eq!(tables.products.height(), 2);
        assert_eq!(tables.order_items.width(), 4);
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.csv");

        match DataLoader::load_csv(&missing) {
            Err(LoaderError::NotFound(path)) => assert_eq!(path, missing),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn missing_join_column_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let sources = write_sources(dir.path(), "product_id,category\np1,toys\n");

        match DataLoader::load_sources(&sources) {
            Err(LoaderError::MissingColumn { table, column }) => {
                assert_eq!(table, "products");
                assert_eq!(column, CATEGORY);
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }
}
