//! # Repository Module
//!
//! Database repository implementations for Mercato.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  InventoryStore / AuthGateway                                          │
//! │       │                                                                 │
//! │       │  db.products().list()                                           │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── list(&self)                                                       │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── insert(&self, new_product)                                        │
//! │  └── update(&self, id, patch)                                          │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Row structs (`ProductRow`, `SaleRow`, ...) mirror the table shape     │
//! │  and convert into the domain types from mercato-core; SQL never leaks  │
//! │  past this module.                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Product CRUD and counter writes
//! - [`sale::SaleRepository`] - Append-only sale ledger
//! - [`operator::OperatorRepository`] - Operator credentials for sign-in

pub mod operator;
pub mod product;
pub mod sale;
