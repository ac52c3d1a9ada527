//! # mercato-db: Persistence Gateway for Mercato
//!
//! This crate provides database access for the Mercato inventory manager.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Mercato Data Flow                                │
//! │                                                                         │
//! │  Caller (with an authenticated Session)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     mercato-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │InventoryStore │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │  (store.rs)   │───►│ (product.rs,  │    │  (embedded)  │  │   │
//! │  │   │               │    │  sale.rs,     │    │              │  │   │
//! │  │   │ validates via │    │  operator.rs) │    │ 001_init.sql │  │   │
//! │  │   │ mercato-core  │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (WAL, foreign keys, NORMAL sync)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (product, sale, operator)
//! - [`store`] - The InventoryStore operation layer
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mercato_db::{Database, DbConfig, InventoryStore};
//!
//! let db = Database::new(DbConfig::new("path/to/mercato.db")).await?;
//! let store = InventoryStore::new(db);
//!
//! let products = store.list_products(&session).await?;
//! let sale = store.record_sale(&session, &product_id, 3).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use store::{InventoryStore, StoreError, StoreResult};

// Repository re-exports for convenience
pub use repository::operator::{NewOperator, Operator, OperatorRepository};
pub use repository::product::{ProductPatch, ProductRepository};
pub use repository::sale::SaleRepository;
