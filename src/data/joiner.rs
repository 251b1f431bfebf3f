//! Data Joiner Module
//! Left-joins order items with product categories and review scores.

use super::columns::{CATEGORY, ORDER_ID, PRODUCT_ID, REVIEW_SCORE};
use super::SourceTables;
use polars::prelude::*;
use thiserror::Error;

/// Temporary column holding the order item position across the joins.
const ROW_INDEX: &str = "__order_item_row";

#[derive(Error, Debug)]
pub enum JoinError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Builds the joined order item table.
pub struct DataJoiner;

impl DataJoiner {
    /// Join order items to product categories and review scores.
    ///
    /// Lookup tables are reduced to their first row per key, so the result
    /// never has more rows than `order_items`. Reviews without a score are
    /// skipped before that reduction, so an order keeps its first scored
    /// review. Items with no scored review are dropped; the category stays
    /// null when the product is unknown.
    /// Output rows keep the order item order.
    pub fn join(tables: &SourceTables) -> Result<DataFrame, JoinError> {
        let products = tables
            .products
            .clone()
            .lazy()
            .select([col(PRODUCT_ID), col(CATEGORY)])
            .group_by_stable([col(PRODUCT_ID)])
            .agg([col(CATEGORY).first()]);

        let reviews = tables
            .order_reviews
            .clone()
            .lazy()
            .select([col(ORDER_ID), col(REVIEW_SCORE)])
            .filter(col(REVIEW_SCORE).is_not_null())
            .group_by_stable([col(ORDER_ID)])
            .agg([col(REVIEW_SCORE).first()]);

        let joined = tables
            .order_items
            .clone()
            .lazy()
            .with_row_index(ROW_INDEX, None)
            .left_join(products, col(PRODUCT_ID), col(PRODUCT_ID))
            .left_join(reviews, col(ORDER_ID), col(ORDER_ID))
            .filter(col(REVIEW_SCORE).is_not_null())
            .sort_by_exprs([col(ROW_INDEX)], SortMultipleOptions::default())
            .collect()?
            .drop(ROW_INDEX)?;

        log::info!(
            "Joined {} of {} order items with a review score",
            joined.height(),
            tables.order_items.height()
        );

        Ok(joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{example_tables, messy_tables};

    #[test]
    fn example_dataset_joins_every_item() {
        let joined = DataJoiner::join(&example_tables()).unwrap();

        assert_eq!(joined.height(), 3);
        let scores: Vec<Option<i64>> = joined
            .column(REVIEW_SCORE)
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(scores, vec![Some(5), Some(3), Some(4)]);

        let categories: Vec<Option<&str>> = joined
            .column(CATEGORY)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(categories, vec![Some("toys"), Some("books"), Some("toys")]);
    }

    #[test]
    fn keeps_order_item_columns() {
        let joined = DataJoiner::join(&example_tables()).unwrap();
        let names: Vec<String> = joined
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert_eq!(
            names,
            vec![ORDER_ID, PRODUCT_ID, "price", CATEGORY, REVIEW_SCORE]
        );
    }

    #[test]
    fn drops_unreviewed_and_keeps_unknown_products() {
        let tables = messy_tables();
        let joined = DataJoiner::join(&tables).unwrap();

        assert!(joined.height() <= tables.order_items.height());
        assert_eq!(joined.column(REVIEW_SCORE).unwrap().null_count(), 0);

        let orders: Vec<Option<&str>> = joined
            .column(ORDER_ID)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(
            orders,
            vec![Some("o1"), Some("o2"), Some("o4"), Some("o6")]
        );

        // p3 has no product row
        assert_eq!(joined.column(CATEGORY).unwrap().null_count(), 1);
    }

    #[test]
    fn duplicate_reviews_do_not_multiply_rows() {
        let joined = DataJoiner::join(&messy_tables()).unwrap();
        let first = joined.column(REVIEW_SCORE).unwrap().i64().unwrap().get(0);

        assert_eq!(joined.height(), 4);
        assert_eq!(first, Some(5));
    }

    #[test]
    fn unscored_duplicate_review_does_not_hide_a_scored_one() {
        let tables = SourceTables {
            order_items: df!(
                ORDER_ID => ["o1"],
                PRODUCT_ID => ["p1"]
            )
            .unwrap(),
            order_reviews: df!(
                ORDER_ID => ["o1", "o1"],
                REVIEW_SCORE => [None, Some(5i64)]
            )
            .unwrap(),
            products: df!(
                PRODUCT_ID => ["p1"],
                CATEGORY => ["toys"]
            )
            .unwrap(),
        };
        let joined = DataJoiner::join(&tables).unwrap();

        assert_eq!(joined.height(), 1);
        assert_eq!(
            joined.column(REVIEW_SCORE).unwrap().i64().unwrap().get(0),
            Some(5)
        );
    }

    #[test]
    fn messy_order_keeps_score_after_unscored_review() {
        let joined = DataJoiner::join(&messy_tables()).unwrap();
        let last = joined.height() - 1;

        assert_eq!(
            joined.column(ORDER_ID).unwrap().str().unwrap().get(last),
            Some("o6")
        );
        assert_eq!(
            joined.column(REVIEW_SCORE).unwrap().i64().unwrap().get(last),
            Some(3)
        );
    }
}
