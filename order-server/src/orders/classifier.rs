//! Product category classifier
//!
//! The product identifier space is partitioned into contiguous half-open
//! ranges, one per category. The partition is data, not branches, so it
//! can be audited and reconfigured as a table.

use shared::models::Category;

/// Ordered partition of the product id space: `[lower, upper) -> category`
const CATEGORY_RANGES: &[(i64, i64, Category)] = &[
    (10_000, 20_000, Category::Cleaning),
    (20_000, 30_000, Category::PlasticPe),
    (30_000, 40_000, Category::PlasticPet),
    (40_000, 50_000, Category::PlasticPp),
    (50_000, 60_000, Category::Sprayers),
    (60_000, 70_000, Category::Chemicals),
    (70_000, 80_000, Category::Fragrances),
];

/// Classify a product identifier
///
/// Identifiers outside every range yield `None` and must be excluded from
/// any grouping, never bucketed under a default category.
pub fn classify(product_id: i64) -> Option<Category> {
    CATEGORY_RANGES
        .iter()
        .find(|(lower, upper, _)| (*lower..*upper).contains(&product_id))
        .map(|(_, _, category)| *category)
}
