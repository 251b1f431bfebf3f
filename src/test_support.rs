//! Shared fixtures for unit tests.

use crate::data::SourceTables;
use polars::prelude::*;

/// Three items, three reviews (5, 3, 4), two products in two categories.
pub fn example_tables() -> SourceTables {
    SourceTables {
        order_items: df!(
            "order_id" => ["o1", "o2", "o3"],
            "product_id" => ["p1", "p2", "p1"],
            "price" => [10.0, 20.0, 15.0]
        )
        .unwrap(),
        order_reviews: df!(
            "review_id" => ["r1", "r2", "r3"],
            "order_id" => ["o1", "o2", "o3"],
            "review_score" => [5i64, 3, 4]
        )
        .unwrap(),
        products: df!(
            "product_id" => ["p1", "p2"],
            "product_category_name" => ["toys", "books"],
            "product_weight_g" => [300i64, 500]
        )
        .unwrap(),
    }
}

/// Unknown product (p3), an unreviewed order (o3), a null score (o5),
/// a duplicate review for o1 and an unscored review ahead of a scored
/// one for o6.
pub fn messy_tables() -> SourceTables {
    SourceTables {
        order_items: df!(
            "order_id" => ["o1", "o2", "o3", "o4", "o5", "o6"],
            "product_id" => ["p1", "p3", "p2", "p1", "p2", "p2"],
            "price" => [10.0, 12.0, 20.0, 11.0, 19.0, 21.0]
        )
        .unwrap(),
        order_reviews: df!(
            "order_id" => ["o1", "o1", "o2", "o4", "o5", "o6", "o6"],
            "review_score" => [Some(5i64), Some(1), Some(4), Some(2), None, None, Some(3)]
        )
        .unwrap(),
        products: df!(
            "product_id" => ["p1", "p2"],
            "product_category_name" => ["toys", "books"]
        )
        .unwrap(),
    }
}
