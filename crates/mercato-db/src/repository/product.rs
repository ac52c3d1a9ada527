//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Column Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products table              Product (mercato-core)                     │
//! │                                                                         │
//! │  purchase_price_cents  ───►  purchase_price: Money                      │
//! │  sale_price_cents      ───►  sale_price: Money                          │
//! │  category TEXT NULL    ───►  category: Option<ProductCategory>          │
//! │  pack_items TEXT NULL  ───►  pack_items: Option<Vec<PackItem>> (JSON)   │
//! │  is_order_based INT    ───►  is_order_based: bool                       │
//! │                                                                         │
//! │  Corrupt JSON or an unknown category label surfaces as                  │
//! │  DbError::Decode, never a panic.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use mercato_core::{Money, NewProduct, PackItem, Product, ProductCategory};

// =============================================================================
// Row Mapping
// =============================================================================

/// Mirror of the `products` table.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    name: String,
    description: Option<String>,
    purchase_price_cents: i64,
    sale_price_cents: i64,
    stock: i64,
    category: Option<String>,
    pack_items: Option<String>,
    total_sold: i64,
    is_order_based: bool,
    created_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> DbResult<Product> {
        let pack_items: Option<Vec<PackItem>> = match self.pack_items {
            Some(json) => Some(
                serde_json::from_str(&json)
                    .map_err(|e| DbError::decode("Product.packItems", e.to_string()))?,
            ),
            None => None,
        };

        Ok(Product {
            id: self.id,
            name: self.name,
            description: self.description,
            purchase_price: Money::from_cents(self.purchase_price_cents),
            sale_price: Money::from_cents(self.sale_price_cents),
            stock: self.stock,
            category: self.category.as_deref().and_then(ProductCategory::parse),
            pack_items,
            total_sold: self.total_sold,
            is_order_based: self.is_order_based,
            created_at: self.created_at,
        })
    }
}

fn encode_pack_items(items: &Option<Vec<PackItem>>) -> DbResult<Option<String>> {
    match items {
        Some(items) => serde_json::to_string(items)
            .map(Some)
            .map_err(|e| DbError::decode("Product.packItems", e.to_string())),
        None => Ok(None),
    }
}

// =============================================================================
// Partial Update
// =============================================================================

/// Option-per-field partial update for a product. `None` leaves the
/// column untouched.
///
/// `description` is doubly optional: the outer `None` leaves it alone,
/// `Some(None)` clears it, `Some(Some(_))` replaces it.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub purchase_price: Option<Money>,
    pub sale_price: Option<Money>,
    pub stock: Option<i64>,
    pub is_order_based: Option<bool>,
}

impl ProductPatch {
    fn apply(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(purchase_price) = self.purchase_price {
            product.purchase_price = purchase_price;
        }
        if let Some(sale_price) = self.sale_price {
            product.sale_price = sale_price;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(is_order_based) = self.is_order_based {
            product.is_order_based = is_order_based;
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
/// let products = repo.list().await?;
/// let product = repo.get_by_id("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

const SELECT_COLUMNS: &str = "id, name, description, purchase_price_cents, sale_price_cents, \
     stock, category, pack_items, total_sold, is_order_based, created_at";

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products, newest-created first.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM products ORDER BY created_at DESC, rowid DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Listed products");
        rows.into_iter().map(ProductRow::into_product).collect()
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProductRow::into_product).transpose()
    }

    /// Inserts a new product, assigning its ID and creation timestamp.
    pub async fn insert(&self, new_product: NewProduct) -> DbResult<Product> {
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now();
        let pack_items_json = encode_pack_items(&new_product.pack_items)?;

        debug!(id = %id, name = %new_product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, description, purchase_price_cents, sale_price_cents,
                stock, category, pack_items, total_sold, is_order_based, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 0, ?9, ?10)
            "#,
        )
        .bind(&id)
        .bind(&new_product.name)
        .bind(&new_product.description)
        .bind(new_product.purchase_price.cents())
        .bind(new_product.sale_price.cents())
        .bind(new_product.stock)
        .bind(new_product.category.map(|c| c.as_str()))
        .bind(&pack_items_json)
        .bind(new_product.is_order_based)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id,
            name: new_product.name,
            description: new_product.description,
            purchase_price: new_product.purchase_price,
            sale_price: new_product.sale_price,
            stock: new_product.stock,
            category: new_product.category,
            pack_items: new_product.pack_items,
            total_sold: 0,
            is_order_based: new_product.is_order_based,
            created_at,
        })
    }

    /// Applies a partial update to an existing product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The product after the update
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, id: &str, patch: &ProductPatch) -> DbResult<Product> {
        debug!(id = %id, "Updating product");

        let mut product = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))?;
        patch.apply(&mut product);

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                purchase_price_cents = ?4,
                sale_price_cents = ?5,
                stock = ?6,
                is_order_based = ?7
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.purchase_price.cents())
        .bind(product.sale_price.cents())
        .bind(product.stock)
        .bind(product.is_order_based)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(product)
    }

    /// Writes the post-sale counters for a product.
    ///
    /// Absolute values, not deltas: the ledger engine already computed
    /// the new counters from the product it validated against.
    pub async fn write_counters(
        &self,
        id: &str,
        new_stock: i64,
        new_total_sold: i64,
    ) -> DbResult<()> {
        debug!(id = %id, new_stock, new_total_sold, "Writing product counters");

        let result = sqlx::query(
            "UPDATE products SET stock = ?2, total_sold = ?3 WHERE id = ?1",
        )
        .bind(id)
        .bind(new_stock)
        .bind(new_total_sold)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Writes the post-sale counters inside an open transaction.
    ///
    /// Used by the store's sale recording so the counter write commits
    /// or rolls back together with the sale row.
    pub async fn write_counters_in_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        id: &str,
        new_stock: i64,
        new_total_sold: i64,
    ) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE products SET stock = ?2, total_sold = ?3 WHERE id = ?1",
        )
        .bind(id)
        .bind(new_stock)
        .bind(new_total_sold)
        .execute(&mut **tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Hard-deletes a product.
    ///
    /// Sales keep their own name/price snapshots, so history survives
    /// the delete.
    ///
    /// ## Returns
    /// * `Ok(())` - Deleted
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn new_product(name: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: None,
            purchase_price: Money::from_cents(1000),
            sale_price: Money::from_cents(1500),
            stock: 5,
            category: Some(ProductCategory::Simple),
            pack_items: None,
            is_order_based: false,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = test_db().await;
        let repo = db.products();

        let inserted = repo.insert(new_product("Engine Oil")).await.unwrap();
        assert!(!inserted.id.is_empty());
        assert_eq!(inserted.total_sold, 0);

        let fetched = repo.get_by_id(&inserted.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Engine Oil");
        assert_eq!(fetched.purchase_price.cents(), 1000);
        assert_eq!(fetched.category, Some(ProductCategory::Simple));
        assert_eq!(fetched.stock, 5);

        assert!(repo.get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let db = test_db().await;
        let repo = db.products();

        repo.insert(new_product("First")).await.unwrap();
        repo.insert(new_product("Second")).await.unwrap();
        repo.insert(new_product("Third")).await.unwrap();

        let listed = repo.list().await.unwrap();
        let names: Vec<&str> = listed.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Third", "Second", "First"]);
    }

    #[tokio::test]
    async fn test_pack_items_round_trip() {
        let db = test_db().await;
        let repo = db.products();

        let mut np = new_product("Service Pack");
        np.category = Some(ProductCategory::Pack);
        np.pack_items = Some(vec![PackItem {
            product_id: "p1".to_string(),
            product_name: "Oil".to_string(),
            quantity: 2,
            unit_cost: Money::from_cents(1000),
        }]);

        let inserted = repo.insert(np).await.unwrap();
        let fetched = repo.get_by_id(&inserted.id).await.unwrap().unwrap();
        let items = fetched.pack_items.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_name, "Oil");
        assert_eq!(items[0].line_cost().cents(), 2000);
    }

    #[tokio::test]
    async fn test_update_patch() {
        let db = test_db().await;
        let repo = db.products();

        let inserted = repo.insert(new_product("Old Name")).await.unwrap();

        let patch = ProductPatch {
            name: Some("New Name".to_string()),
            sale_price: Some(Money::from_cents(1800)),
            ..Default::default()
        };
        let updated = repo.update(&inserted.id, &patch).await.unwrap();
        assert_eq!(updated.name, "New Name");
        assert_eq!(updated.sale_price.cents(), 1800);
        // Untouched fields survive.
        assert_eq!(updated.purchase_price.cents(), 1000);
        assert_eq!(updated.stock, 5);

        let err = repo.update("missing", &patch).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_description_patch_can_set_and_clear() {
        let db = test_db().await;
        let repo = db.products();

        let inserted = repo.insert(new_product("Widget")).await.unwrap();
        assert!(inserted.description.is_none());

        // Outer Some sets, inner value is the new description.
        let patch = ProductPatch {
            description: Some(Some("Fits most models".to_string())),
            ..Default::default()
        };
        let updated = repo.update(&inserted.id, &patch).await.unwrap();
        assert_eq!(updated.description.as_deref(), Some("Fits most models"));

        // Outer None leaves it untouched.
        let patch = ProductPatch {
            stock: Some(9),
            ..Default::default()
        };
        let updated = repo.update(&inserted.id, &patch).await.unwrap();
        assert_eq!(updated.description.as_deref(), Some("Fits most models"));

        // Some(None) clears it back to NULL.
        let patch = ProductPatch {
            description: Some(None),
            ..Default::default()
        };
        let updated = repo.update(&inserted.id, &patch).await.unwrap();
        assert!(updated.description.is_none());

        let fetched = repo.get_by_id(&inserted.id).await.unwrap().unwrap();
        assert!(fetched.description.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let db = test_db().await;
        let repo = db.products();

        let inserted = repo.insert(new_product("Doomed")).await.unwrap();
        repo.delete(&inserted.id).await.unwrap();
        assert!(repo.get_by_id(&inserted.id).await.unwrap().is_none());

        let err = repo.delete(&inserted.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_write_counters() {
        let db = test_db().await;
        let repo = db.products();

        let inserted = repo.insert(new_product("Widget")).await.unwrap();
        repo.write_counters(&inserted.id, 2, 3).await.unwrap();

        let fetched = repo.get_by_id(&inserted.id).await.unwrap().unwrap();
        assert_eq!(fetched.stock, 2);
        assert_eq!(fetched.total_sold, 3);
    }
}
