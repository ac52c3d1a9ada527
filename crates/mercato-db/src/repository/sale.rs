//! # Sale Repository
//!
//! Append-only ledger of sale events.
//!
//! Sales are created once, at sale time, and never mutated or deleted.
//! Each row carries its own name/price snapshot, so the ledger stays
//! truthful even after the product is edited or deleted.

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use mercato_core::{Money, NewSale, Sale};

// =============================================================================
// Row Mapping
// =============================================================================

/// Mirror of the `sales` table.
#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    id: String,
    product_id: String,
    product_name: String,
    quantity: i64,
    total_cents: i64,
    profit_cents: i64,
    date: DateTime<Utc>,
}

impl From<SaleRow> for Sale {
    fn from(row: SaleRow) -> Self {
        Sale {
            id: row.id,
            product_id: row.product_id,
            product_name: row.product_name,
            quantity: row.quantity,
            total_price: Money::from_cents(row.total_cents),
            profit: Money::from_cents(row.profit_cents),
            date: row.date,
        }
    }
}

const INSERT_SALE: &str = r#"
    INSERT INTO sales (id, product_id, product_name, quantity, total_cents, profit_cents, date)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
"#;

// =============================================================================
// Repository
// =============================================================================

/// Repository for the sale ledger.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Lists all sales, most recent first.
    pub async fn list(&self) -> DbResult<Vec<Sale>> {
        let rows = sqlx::query_as::<_, SaleRow>(
            r#"
            SELECT id, product_id, product_name, quantity, total_cents, profit_cents, date
            FROM sales
            ORDER BY date DESC, rowid DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Listed sales");
        Ok(rows.into_iter().map(Sale::from).collect())
    }

    /// Inserts a sale, assigning its ID.
    pub async fn insert(&self, new_sale: NewSale) -> DbResult<Sale> {
        let id = Uuid::new_v4().to_string();

        debug!(id = %id, product = %new_sale.product_name, "Inserting sale");

        sqlx::query(INSERT_SALE)
            .bind(&id)
            .bind(&new_sale.product_id)
            .bind(&new_sale.product_name)
            .bind(new_sale.quantity)
            .bind(new_sale.total_price.cents())
            .bind(new_sale.profit.cents())
            .bind(new_sale.date)
            .execute(&self.pool)
            .await?;

        Ok(assembled(id, new_sale))
    }

    /// Inserts a sale inside an open transaction.
    ///
    /// Used by the store's sale recording so the sale row commits or
    /// rolls back together with the product counter write.
    pub async fn insert_in_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        new_sale: NewSale,
    ) -> DbResult<Sale> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(INSERT_SALE)
            .bind(&id)
            .bind(&new_sale.product_id)
            .bind(&new_sale.product_name)
            .bind(new_sale.quantity)
            .bind(new_sale.total_price.cents())
            .bind(new_sale.profit.cents())
            .bind(new_sale.date)
            .execute(&mut **tx)
            .await?;

        Ok(assembled(id, new_sale))
    }

    /// Counts total sales (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

fn assembled(id: String, new_sale: NewSale) -> Sale {
    Sale {
        id,
        product_id: new_sale.product_id,
        product_name: new_sale.product_name,
        quantity: new_sale.quantity,
        total_price: new_sale.total_price,
        profit: new_sale.profit,
        date: new_sale.date,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
