//! # Inventory Store
//!
//! The operation layer: validates with mercato-core, persists with the
//! repositories. Every call takes the authenticated operator's session
//! as explicit context; there is no ambient "current user".
//!
//! ## Sale Recording
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    record_sale(product_id, qty)                         │
//! │                                                                         │
//! │  load product ──► post_sale (validate + price) ──► BEGIN                │
//! │                                                      │                  │
//! │                                                      ├── INSERT sale    │
//! │                                                      ├── UPDATE stock,  │
//! │                                                      │   total_sold     │
//! │                                                      ▼                  │
//! │                                                    COMMIT               │
//! │                                                                         │
//! │  The sale row and the counters commit or roll back together; no        │
//! │  crash can observe a sale without its stock decrement.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info};

use crate::error::DbError;
use crate::pool::Database;
use crate::repository::product::ProductPatch;
use mercato_core::{
    compute_stats, post_sale, CoreError, NewProduct, PackDraft, Product, ProductCategory, Sale,
    Session, Stats, ValidationError,
};

// =============================================================================
// Errors
// =============================================================================

/// Errors surfaced by store operations: either a business rule caught
/// before any write, or a persistence failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(err.into())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Store
// =============================================================================

/// The inventory operation layer.
///
/// ## Usage
/// ```rust,ignore
/// let store = InventoryStore::new(db);
/// let products = store.list_products(&session).await?;
/// let sale = store.record_sale(&session, &product.id, 3).await?;
/// ```
#[derive(Debug, Clone)]
pub struct InventoryStore {
    db: Database,
}

impl InventoryStore {
    /// Creates a store over an open database.
    pub fn new(db: Database) -> Self {
        InventoryStore { db }
    }

    /// Lists all products, newest-created first.
    pub async fn list_products(&self, session: &Session) -> StoreResult<Vec<Product>> {
        debug!(operator = %session.operator_id, "Listing products");
        Ok(self.db.products().list().await?)
    }

    /// Lists all sales, most recent first.
    pub async fn list_sales(&self, session: &Session) -> StoreResult<Vec<Sale>> {
        debug!(operator = %session.operator_id, "Listing sales");
        Ok(self.db.sales().list().await?)
    }

    /// Computes aggregate statistics over the current products and the
    /// full sale history.
    pub async fn stats(&self, session: &Session) -> StoreResult<Stats> {
        debug!(operator = %session.operator_id, "Computing stats");
        let products = self.db.products().list().await?;
        let sales = self.db.sales().list().await?;
        Ok(compute_stats(&products, &sales))
    }

    /// Creates a simple product.
    pub async fn create_product(
        &self,
        session: &Session,
        new_product: NewProduct,
    ) -> StoreResult<Product> {
        if new_product.name.trim().is_empty() {
            return Err(ValidationError::required("name").into());
        }
        if new_product.purchase_price.is_negative() {
            return Err(ValidationError::MustNotBeNegative {
                field: "purchasePrice".to_string(),
            }
            .into());
        }
        if new_product.sale_price.is_negative() {
            return Err(ValidationError::MustNotBeNegative {
                field: "salePrice".to_string(),
            }
            .into());
        }

        info!(
            operator = %session.operator_id,
            name = %new_product.name,
            "Creating product"
        );
        Ok(self.db.products().insert(new_product).await?)
    }

    /// Finalizes a pack draft and creates it as a product.
    ///
    /// The draft derives the purchase price from its line items; an
    /// empty draft is rejected with `EmptyPack`.
    pub async fn create_pack(&self, session: &Session, draft: PackDraft) -> StoreResult<Product> {
        if draft.name.trim().is_empty() {
            return Err(ValidationError::required("name").into());
        }

        let new_product = draft.into_product()?;
        info!(
            operator = %session.operator_id,
            name = %new_product.name,
            items = new_product.pack_items.as_ref().map_or(0, Vec::len),
            "Creating pack"
        );
        Ok(self.db.products().insert(new_product).await?)
    }

    /// Applies a partial update to a product.
    ///
    /// A pack's purchase price is derived from its line items, so a
    /// purchase-price patch on a pack is rejected rather than silently
    /// desynchronizing the two.
    pub async fn update_product(
        &self,
        session: &Session,
        id: &str,
        patch: &ProductPatch,
    ) -> StoreResult<Product> {
        let existing = self
            .db
            .products()
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))?;

        if existing.category == Some(ProductCategory::Pack) && patch.purchase_price.is_some() {
            return Err(ValidationError::Derived {
                field: "purchasePrice".to_string(),
            }
            .into());
        }

        info!(operator = %session.operator_id, id = %id, "Updating product");
        Ok(self.db.products().update(id, patch).await?)
    }

    /// Hard-deletes a product. Sale history survives through its own
    /// snapshots.
    pub async fn delete_product(&self, session: &Session, id: &str) -> StoreResult<()> {
        info!(operator = %session.operator_id, id = %id, "Deleting product");
        Ok(self.db.products().delete(id).await?)
    }

    /// Records a sale of `quantity` units of the given product.
    ///
    /// Validation and pricing happen in mercato-core; the sale row and
    /// the product counters are then written in a single transaction.
    pub async fn record_sale(
        &self,
        session: &Session,
        product_id: &str,
        quantity: i64,
    ) -> StoreResult<Sale> {
        let product = self
            .db
            .products()
            .get_by_id(product_id)
            .await?
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        let posting = post_sale(&product, quantity, Utc::now())?;

        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .map_err(DbError::from)?;

        let sale = self
            .db
            .sales()
            .insert_in_tx(&mut tx, posting.sale)
            .await?;
        self.db
            .products()
            .write_counters_in_tx(&mut tx, product_id, posting.new_stock, posting.new_total_sold)
            .await?;

        tx.commit().await.map_err(DbError::from)?;

        info!(
            operator = %session.operator_id,
            product = %sale.product_name,
            quantity,
            total = %sale.total_price,
            "Recorded sale"
        );
        Ok(sale)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
