//! # Pack Assembly
//!
//! A pack bundles other products into a single sellable SKU. This module
//! holds the pack under construction and its cost math; persistence only
//! sees the finished [`NewProduct`].
//!
//! ## Draft Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        PackDraft Lifecycle                          │
//! │                                                                     │
//! │  PackDraft::new("Winter Kit")                                       │
//! │       │                                                             │
//! │       ├── add_item(&oil)        snapshot name + purchase price,     │
//! │       │                         quantity 1, dedup by product id     │
//! │       ├── set_item_quantity(0, 2)                                   │
//! │       ├── remove_item(1)                                            │
//! │       │                                                             │
//! │       │   cost()   = Σ unit_cost × quantity                         │
//! │       │   margin() = sale_price − cost()                            │
//! │       ▼                                                             │
//! │  into_product() ──► NewProduct { category: Pack,                    │
//! │                                  purchase_price: cost(), ... }      │
//! │                     (EmptyPack if no items remain)                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Semantics
//! `add_item` copies the constituent's name and purchase price into the
//! line. Later edits to the underlying product do not flow into the draft
//! or into any pack already saved.

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{NewProduct, PackItem, Product, ProductCategory};

// =============================================================================
// Pack Draft
// =============================================================================

/// A pack under construction.
///
/// Line items keep insertion order. Indices handed to
/// [`set_item_quantity`](Self::set_item_quantity) and
/// [`remove_item`](Self::remove_item) address that order.
#[derive(Debug, Clone, Default)]
pub struct PackDraft {
    pub name: String,
    pub description: Option<String>,
    pub sale_price: Money,
    pub stock: i64,
    pub is_order_based: bool,
    items: Vec<PackItem>,
}

impl PackDraft {
    /// Creates an empty draft with the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        PackDraft {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Current line items, in insertion order.
    pub fn items(&self) -> &[PackItem] {
        &self.items
    }

    /// True when the draft has no line items yet.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds `product` as a line item with quantity 1, snapshotting its
    /// name and purchase price. Adding a product that is already in the
    /// draft is a no-op; use [`set_item_quantity`](Self::set_item_quantity)
    /// to raise its quantity.
    pub fn add_item(&mut self, product: &Product) {
        if self.items.iter().any(|i| i.product_id == product.id) {
            return;
        }
        self.items.push(PackItem {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity: 1,
            unit_cost: product.purchase_price,
        });
    }

    /// Replaces the quantity of the line at `index`.
    ///
    /// Rejects quantities below 1; dropping a line is
    /// [`remove_item`](Self::remove_item), not a zero quantity.
    pub fn set_item_quantity(&mut self, index: usize, quantity: i64) -> CoreResult<()> {
        if quantity < 1 {
            return Err(ValidationError::must_be_positive("quantity").into());
        }
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(ValidationError::IndexOutOfBounds {
                field: "packItems".to_string(),
                index,
                len,
            })?;
        item.quantity = quantity;
        Ok(())
    }

    /// Removes the line at `index`, shifting later lines down.
    pub fn remove_item(&mut self, index: usize) -> CoreResult<()> {
        if index >= self.items.len() {
            return Err(ValidationError::IndexOutOfBounds {
                field: "packItems".to_string(),
                index,
                len: self.items.len(),
            }
            .into());
        }
        self.items.remove(index);
        Ok(())
    }

    /// Total constituent cost: Σ unit_cost × quantity.
    pub fn cost(&self) -> Money {
        self.items.iter().map(PackItem::line_cost).sum()
    }

    /// Margin at the draft's own sale price. May be negative.
    pub fn margin(&self) -> Money {
        self.margin_at_price(self.sale_price)
    }

    /// Margin at an arbitrary candidate sale price. May be negative.
    pub fn margin_at_price(&self, sale_price: Money) -> Money {
        sale_price - self.cost()
    }

    /// Finalizes the draft into a product submission.
    ///
    /// The purchase price is the computed cost, never caller-supplied.
    /// Rejects a draft with no line items.
    pub fn into_product(self) -> CoreResult<NewProduct> {
        if self.items.is_empty() {
            return Err(CoreError::EmptyPack { name: self.name });
        }
        let purchase_price = self.cost();
        Ok(NewProduct {
            name: self.name,
            description: self.description,
            purchase_price,
            sale_price: self.sale_price,
            stock: self.stock,
            category: Some(ProductCategory::Pack),
            pack_items: Some(self.items),
            is_order_based: self.is_order_based,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(id: &str, name: &str, purchase_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            purchase_price: Money::from_cents(purchase_cents),
            sale_price: Money::from_cents(purchase_cents * 2),
            stock: 10,
            category: Some(ProductCategory::Simple),
            pack_items: None,
            total_sold: 0,
            is_order_based: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn add_item_snapshots_name_and_cost_at_quantity_one() {
        let mut draft = PackDraft::new("Winter Kit");
        draft.add_item(&product("p1", "Antifreeze", 800));

        assert_eq!(draft.items().len(), 1);
        let item = &draft.items()[0];
        assert_eq!(item.product_id, "p1");
        assert_eq!(item.product_name, "Antifreeze");
        assert_eq!(item.quantity, 1);
        assert_eq!(item.unit_cost.cents(), 800);
    }

    #[test]
    fn add_item_dedups_by_product_id() {
        let mut draft = PackDraft::new("Winter Kit");
        let p = product("p1", "Antifreeze", 800);
        draft.add_item(&p);
        draft.set_item_quantity(0, 3).unwrap();
        draft.add_item(&p);

        // Still one line, quantity untouched.
        assert_eq!(draft.items().len(), 1);
        assert_eq!(draft.items()[0].quantity, 3);
    }

    #[test]
    fn set_item_quantity_rejects_below_one() {
        let mut draft = PackDraft::new("Winter Kit");
        draft.add_item(&product("p1", "Antifreeze", 800));

        assert!(matches!(
            draft.set_item_quantity(0, 0).unwrap_err(),
            CoreError::Validation(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            draft.set_item_quantity(0, -4).unwrap_err(),
            CoreError::Validation(ValidationError::MustBePositive { .. })
        ));
        assert_eq!(draft.items()[0].quantity, 1);
    }

    #[test]
    fn set_item_quantity_rejects_bad_index() {
        let mut draft = PackDraft::new("Winter Kit");
        assert!(matches!(
            draft.set_item_quantity(0, 2).unwrap_err(),
            CoreError::Validation(ValidationError::IndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn cost_is_sum_of_line_costs() {
        // {10.00 × 2} + {5.00 × 1} = 25.00
        let mut draft = PackDraft::new("Starter Pack");
        draft.add_item(&product("p1", "Oil", 1000));
        draft.add_item(&product("p2", "Filter", 500));
        draft.set_item_quantity(0, 2).unwrap();

        assert_eq!(draft.cost().cents(), 2500);
        assert_eq!(draft.margin_at_price(Money::from_cents(3000)).cents(), 500);
    }

    #[test]
    fn margin_may_be_negative() {
        let mut draft = PackDraft::new("Loss Leader");
        draft.add_item(&product("p1", "Oil", 1000));
        draft.sale_price = Money::from_cents(700);
        assert_eq!(draft.margin().cents(), -300);
    }

    #[test]
    fn add_then_remove_restores_cost() {
        let mut draft = PackDraft::new("Starter Pack");
        draft.add_item(&product("p1", "Oil", 1000));
        let before = draft.cost();

        draft.add_item(&product("p2", "Filter", 500));
        assert_eq!(draft.cost().cents(), 1500);

        draft.remove_item(1).unwrap();
        assert_eq!(draft.cost(), before);
    }

    #[test]
    fn remove_item_shifts_later_lines_down() {
        let mut draft = PackDraft::new("Kit");
        draft.add_item(&product("p1", "Oil", 1000));
        draft.add_item(&product("p2", "Filter", 500));
        draft.add_item(&product("p3", "Plug", 300));

        draft.remove_item(0).unwrap();
        assert_eq!(draft.items()[0].product_id, "p2");
        assert_eq!(draft.items()[1].product_id, "p3");

        assert!(matches!(
            draft.remove_item(2).unwrap_err(),
            CoreError::Validation(ValidationError::IndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn into_product_rejects_empty_draft() {
        let draft = PackDraft::new("Empty Kit");
        match draft.into_product().unwrap_err() {
            CoreError::EmptyPack { name } => assert_eq!(name, "Empty Kit"),
            other => panic!("Expected EmptyPack, got {other:?}"),
        }
    }

    #[test]
    fn into_product_derives_purchase_price_from_cost() {
        let mut draft = PackDraft::new("Starter Pack");
        draft.description = Some("Two essentials".to_string());
        draft.sale_price = Money::from_cents(3000);
        draft.stock = 4;
        draft.add_item(&product("p1", "Oil", 1000));
        draft.add_item(&product("p2", "Filter", 500));
        draft.set_item_quantity(0, 2).unwrap();

        let new_product = draft.into_product().unwrap();
        assert_eq!(new_product.category, Some(ProductCategory::Pack));
        assert_eq!(new_product.purchase_price.cents(), 2500);
        assert_eq!(new_product.sale_price.cents(), 3000);
        assert_eq!(new_product.stock, 4);
        let items = new_product.pack_items.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].quantity, 2);
    }
}
