//! # Ledger Engine
//!
//! Derived statistics over the sale history and the stock/profit
//! bookkeeping for a single sale.
//!
//! ## Sale Posting Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Posting a Sale                                 │
//! │                                                                     │
//! │  post_sale(product, quantity, now)                                  │
//! │       │                                                             │
//! │       ├── quantity < 1 ──────────────► ValidationError              │
//! │       │                                                             │
//! │       ├── simple, not order-based,                                  │
//! │       │   quantity > stock ──────────► InsufficientStock            │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SalePosting {                                                      │
//! │      sale:           price/profit snapshot                          │
//! │      new_stock:      stock − quantity                               │
//! │      new_total_sold: total_sold + quantity                          │
//! │  }                                                                  │
//! │                                                                     │
//! │  The caller applies the sale row and both counters together;        │
//! │  mercato-db does so in one transaction.                             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{NewSale, Product, ProductCategory, Sale, Stats};

// =============================================================================
// Statistics
// =============================================================================

/// Computes aggregate statistics over the full product and sale lists.
///
/// Pure and deterministic: revenue, profit and units sold are summed over
/// all sales; stock value is summed over non-pack products only, so the
/// value already represented by a pack's constituents is not counted twice.
pub fn compute_stats(products: &[Product], sales: &[Sale]) -> Stats {
    let revenue: Money = sales.iter().map(|s| s.total_price).sum();
    let profit: Money = sales.iter().map(|s| s.profit).sum();
    let total_sold: i64 = sales.iter().map(|s| s.quantity).sum();

    let stock_value: Money = products
        .iter()
        .filter(|p| p.category != Some(ProductCategory::Pack))
        .map(|p| p.purchase_price * p.stock)
        .sum();

    Stats {
        revenue,
        profit,
        total_sold,
        stock_value,
    }
}

// =============================================================================
// Sale Posting
// =============================================================================

/// The outcome of an accepted sale: the sale snapshot plus the product
/// counters as they must read after the sale.
///
/// The sale row and both counters belong together; recording one without
/// the other corrupts the ledger, which is why [`post_sale`] returns them
/// as a unit for the persistence layer to apply atomically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalePosting {
    /// The sale record to insert.
    pub sale: NewSale,
    /// Product stock after the sale (stock − quantity).
    pub new_stock: i64,
    /// Product total_sold after the sale (total_sold + quantity).
    pub new_total_sold: i64,
}

/// Validates and prices a sale of `quantity` units of `product` at `at`.
///
/// ## Policy
/// Only an explicit `simple`, non-order-based product is gated by stock;
/// packs and order-based items sell regardless of the current level (their
/// stock may go negative, which is advisory, not an error).
///
/// ## Snapshot
/// `total_price` and `profit` are fixed here from the product's prices at
/// call time; later price edits never retroactively change the sale.
pub fn post_sale(product: &Product, quantity: i64, at: DateTime<Utc>) -> CoreResult<SalePosting> {
    if quantity < 1 {
        return Err(ValidationError::must_be_positive("quantity").into());
    }

    if product.gates_stock() && quantity > product.stock {
        return Err(CoreError::InsufficientStock {
            name: product.name.clone(),
            available: product.stock,
            requested: quantity,
        });
    }

    let total_price = product.sale_price * quantity;
    let profit = (product.sale_price - product.purchase_price) * quantity;

    Ok(SalePosting {
        sale: NewSale {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity,
            total_price,
            profit,
            date: at,
        },
        new_stock: product.stock - quantity,
        new_total_sold: product.total_sold + quantity,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(
        name: &str,
        purchase: i64,
        sale: i64,
        stock: i64,
        category: Option<ProductCategory>,
        is_order_based: bool,
    ) -> Product {
        Product {
            id: format!("id-{name}"),
            name: name.to_string(),
            description: None,
            purchase_price: Money::from_cents(purchase),
            sale_price: Money::from_cents(sale),
            stock,
            category,
            pack_items: None,
            total_sold: 0,
            is_order_based,
            created_at: Utc::now(),
        }
    }

    fn sale(total: i64, profit: i64, quantity: i64) -> Sale {
        Sale {
            id: "s1".to_string(),
            product_id: "p1".to_string(),
            product_name: "Something".to_string(),
            quantity,
            total_price: Money::from_cents(total),
            profit: Money::from_cents(profit),
            date: Utc::now(),
        }
    }

    #[test]
    fn stats_on_empty_lists_are_zero() {
        let stats = compute_stats(&[], &[]);
        assert_eq!(stats, Stats::default());
    }

    #[test]
    fn stats_with_empty_sales_still_value_stock() {
        let products = vec![
            product("A", 1000, 1500, 5, Some(ProductCategory::Simple), false),
            product("B", 200, 400, 10, None, false),
        ];
        let stats = compute_stats(&products, &[]);
        assert_eq!(stats.revenue, Money::zero());
        assert_eq!(stats.profit, Money::zero());
        assert_eq!(stats.total_sold, 0);
        // 5 × 10.00 + 10 × 2.00
        assert_eq!(stats.stock_value.cents(), 7000);
    }

    #[test]
    fn stats_exclude_pack_stock_value() {
        let mut pack = product("Winter Pack", 2500, 3000, 4, Some(ProductCategory::Pack), false);
        pack.pack_items = Some(vec![]);
        let products = vec![
            product("A", 1000, 1500, 2, Some(ProductCategory::Simple), false),
            pack,
        ];
        let stats = compute_stats(&products, &[]);
        // Only A counts: 2 × 10.00
        assert_eq!(stats.stock_value.cents(), 2000);
    }

    #[test]
    fn stats_sum_sales() {
        let sales = vec![sale(4500, 1500, 3), sale(2000, 500, 2)];
        let stats = compute_stats(&[], &sales);
        assert_eq!(stats.revenue.cents(), 6500);
        assert_eq!(stats.profit.cents(), 2000);
        assert_eq!(stats.total_sold, 5);
    }

    #[test]
    fn posting_decrements_stock_and_snapshots_prices() {
        // purchase 10.00, sale 15.00, stock 5, simple, not order-based
        let p = product("Widget", 1000, 1500, 5, Some(ProductCategory::Simple), false);
        let posting = post_sale(&p, 3, Utc::now()).unwrap();

        assert_eq!(posting.new_stock, 2);
        assert_eq!(posting.new_total_sold, 3);
        assert_eq!(posting.sale.total_price.cents(), 4500);
        assert_eq!(posting.sale.profit.cents(), 1500);
        assert_eq!(posting.sale.product_id, p.id);
        assert_eq!(posting.sale.product_name, "Widget");
    }

    #[test]
    fn posting_rejects_overdraw_on_gated_product() {
        let p = product("Widget", 1000, 1500, 5, Some(ProductCategory::Simple), false);
        let err = post_sale(&p, 6, Utc::now()).unwrap_err();
        match err {
            CoreError::InsufficientStock {
                available,
                requested,
                ..
            } => {
                assert_eq!(available, 5);
                assert_eq!(requested, 6);
            }
            other => panic!("Expected InsufficientStock, got {other:?}"),
        }
    }

    #[test]
    fn posting_rejects_non_positive_quantity() {
        let p = product("Widget", 1000, 1500, 5, Some(ProductCategory::Simple), false);
        assert!(matches!(
            post_sale(&p, 0, Utc::now()).unwrap_err(),
            CoreError::Validation(_)
        ));
        assert!(matches!(
            post_sale(&p, -2, Utc::now()).unwrap_err(),
            CoreError::Validation(_)
        ));
    }

    #[test]
    fn order_based_products_sell_past_zero() {
        let p = product("Custom Seat Cover", 3000, 5000, 1, Some(ProductCategory::Simple), true);
        let posting = post_sale(&p, 4, Utc::now()).unwrap();
        // Stock is advisory here and may go negative.
        assert_eq!(posting.new_stock, -3);
        assert_eq!(posting.new_total_sold, 4);
    }

    #[test]
    fn packs_sell_regardless_of_stock() {
        let p = product("Starter Pack", 2500, 3000, 0, Some(ProductCategory::Pack), false);
        let posting = post_sale(&p, 2, Utc::now()).unwrap();
        assert_eq!(posting.new_stock, -2);
        assert_eq!(posting.sale.total_price.cents(), 6000);
        // 2 × (30.00 − 25.00)
        assert_eq!(posting.sale.profit.cents(), 1000);
    }

    #[test]
    fn sequential_postings_drain_stock_then_reject() {
        let mut p = product("Widget", 1000, 1500, 10, Some(ProductCategory::Simple), false);
        let quantities = [4, 3, 2];

        for qty in quantities {
            let posting = post_sale(&p, qty, Utc::now()).unwrap();
            p.stock = posting.new_stock;
            p.total_sold = posting.new_total_sold;
        }
        assert_eq!(p.stock, 1);
        assert_eq!(p.total_sold, 9);

        // First overdraw is rejected and leaves the counters untouched.
        let err = post_sale(&p, 2, Utc::now()).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { .. }));
        assert_eq!(p.stock, 1);
        assert_eq!(p.total_sold, 9);
    }

    #[test]
    fn posting_with_negative_margin_is_valid() {
        // Selling below cost is allowed; the profit is just negative.
        let p = product("Clearance Item", 2000, 1500, 5, Some(ProductCategory::Simple), false);
        let posting = post_sale(&p, 2, Utc::now()).unwrap();
        assert_eq!(posting.sale.profit.cents(), -1000);
    }
}
