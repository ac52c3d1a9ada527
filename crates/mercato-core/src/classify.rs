//! # View Classifier
//!
//! Display bucketing and catalog search. Classification decides which
//! list a product shows up in; it never changes how the product prices
//! or gates stock (that is `category`'s job, see [`crate::types`]).
//!
//! ## Bucketing Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  classify(product)                                                  │
//! │                                                                     │
//! │     category == Pack ──────────────────────────► ViewBucket::Pack   │
//! │     name contains "pack" (case-insensitive) ───► ViewBucket::Pack   │
//! │     otherwise ─────────────────────────────────► ViewBucket::Simple │
//! │                                                                     │
//! │  The name heuristic exists for historical rows created before       │
//! │  categories were recorded. It is display-only and deliberately      │
//! │  not extended to plurals or translations.                           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::pack::PackDraft;
use crate::types::{Product, ProductCategory};

// =============================================================================
// View Bucket
// =============================================================================

/// The display list a product belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewBucket {
    Simple,
    Pack,
}

/// Buckets a product for display. Total: every product lands in exactly
/// one bucket.
pub fn classify(product: &Product) -> ViewBucket {
    if product.category == Some(ProductCategory::Pack) || name_suggests_pack(&product.name) {
        ViewBucket::Pack
    } else {
        ViewBucket::Simple
    }
}

fn name_suggests_pack(name: &str) -> bool {
    name.to_lowercase().contains("pack")
}

// =============================================================================
// Catalog Search
// =============================================================================

/// Filters the catalog to one bucket, intersected with a case-insensitive
/// substring match on the name. An empty query matches everything. Input
/// order is preserved.
pub fn filter<'a>(products: &'a [Product], query: &str, bucket: ViewBucket) -> Vec<&'a Product> {
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|p| classify(p) == bucket)
        .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
        .collect()
}

/// Candidate line items for a pack under construction: products whose
/// category is Simple or unset, matching the query, and not already a
/// line in the draft.
///
/// Note this is a category test, not [`classify`]: an untagged product
/// named "Value Pack" displays in the pack bucket but is still a valid
/// constituent.
pub fn available_for_pack<'a>(
    products: &'a [Product],
    query: &str,
    draft: &PackDraft,
) -> Vec<&'a Product> {
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|p| p.category != Some(ProductCategory::Pack))
        .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
        .filter(|p| !draft.items().iter().any(|i| i.product_id == p.id))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use chrono::Utc;

    fn product(id: &str, name: &str, category: Option<ProductCategory>) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            purchase_price: Money::from_cents(1000),
            sale_price: Money::from_cents(1500),
            stock: 5,
            category,
            pack_items: None,
            total_sold: 0,
            is_order_based: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn category_pack_wins_regardless_of_name() {
        let p = product("p1", "Winter Essentials", Some(ProductCategory::Pack));
        assert_eq!(classify(&p), ViewBucket::Pack);
    }

    #[test]
    fn name_heuristic_catches_untagged_rows() {
        // Historical row with no category but a telltale name.
        let p = product("p1", "SuperPack Deluxe", None);
        assert_eq!(classify(&p), ViewBucket::Pack);

        let p = product("p2", "Value PACK 3", None);
        assert_eq!(classify(&p), ViewBucket::Pack);
    }

    #[test]
    fn name_heuristic_applies_even_with_simple_category() {
        // Display-only: the product still prices and gates as simple.
        let p = product("p1", "Brake Pack", Some(ProductCategory::Simple));
        assert_eq!(classify(&p), ViewBucket::Pack);
        assert!(p.gates_stock());
    }

    #[test]
    fn everything_else_is_simple() {
        assert_eq!(
            classify(&product("p1", "Oil Filter", Some(ProductCategory::Simple))),
            ViewBucket::Simple
        );
        assert_eq!(
            classify(&product("p2", "Oil Filter", None)),
            ViewBucket::Simple
        );
    }

    #[test]
    fn filter_intersects_bucket_and_query() {
        let products = vec![
            product("p1", "Engine Oil", Some(ProductCategory::Simple)),
            product("p2", "Oil Change Pack", Some(ProductCategory::Pack)),
            product("p3", "Air Filter", Some(ProductCategory::Simple)),
        ];

        let simple = filter(&products, "oil", ViewBucket::Simple);
        assert_eq!(simple.len(), 1);
        assert_eq!(simple[0].id, "p1");

        let packs = filter(&products, "oil", ViewBucket::Pack);
        assert_eq!(packs.len(), 1);
        assert_eq!(packs[0].id, "p2");

        // Empty query matches everything in the bucket.
        let all_simple = filter(&products, "", ViewBucket::Simple);
        assert_eq!(all_simple.len(), 2);
    }

    #[test]
    fn filter_preserves_input_order() {
        let products = vec![
            product("p1", "Zinc Additive", Some(ProductCategory::Simple)),
            product("p2", "Axle Grease", Some(ProductCategory::Simple)),
        ];
        let found = filter(&products, "", ViewBucket::Simple);
        assert_eq!(found[0].id, "p1");
        assert_eq!(found[1].id, "p2");
    }

    #[test]
    fn available_for_pack_excludes_packs_and_drafted_items() {
        let products = vec![
            product("p1", "Engine Oil", Some(ProductCategory::Simple)),
            product("p2", "Filter", None),
            product("p3", "Service Pack", Some(ProductCategory::Pack)),
        ];

        let mut draft = PackDraft::new("New Pack");
        draft.add_item(&products[0]);

        let available = available_for_pack(&products, "", &draft);
        // p1 is already drafted, p3 is a pack; only p2 remains.
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, "p2");
    }

    #[test]
    fn available_for_pack_keeps_untagged_products_with_pack_names() {
        // Untagged "Value Pack" displays in the pack bucket but can still
        // be a constituent; only category = Pack excludes.
        let products = vec![product("p1", "Value Pack", None)];
        let draft = PackDraft::new("New Pack");
        let available = available_for_pack(&products, "value", &draft);
        assert_eq!(available.len(), 1);
    }
}
