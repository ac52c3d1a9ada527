//! # mercato-core: Pure Business Logic for Mercato
//!
//! This crate is the heart of Mercato, a single-tenant retail inventory
//! manager. It contains all business logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Mercato Architecture                           │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                Presentation Layer (out of scope)            │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │               ★ mercato-core (THIS CRATE) ★                 │   │
//! │  │                                                             │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐   │   │
//! │  │   │  types   │  │  ledger  │  │   pack   │  │ classify │   │   │
//! │  │   │ Product  │  │  Stats   │  │PackDraft │  │  buckets │   │   │
//! │  │   │  Sale    │  │ postings │  │   cost   │  │  search  │   │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────┘   │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │              mercato-db (Persistence Gateway)               │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, PackItem, Sale, Stats, Session)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`ledger`] - Derived statistics and sale postings
//! - [`pack`] - Pack assembly (bundles of products sold as one SKU)
//! - [`classify`] - View bucketing and catalog search
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic
//! 2. **No I/O**: database, network, file system access is forbidden here
//! 3. **Integer Money**: all monetary values are cents (i64)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

pub mod classify;
pub mod error;
pub mod ledger;
pub mod money;
pub mod pack;
pub mod types;

pub use classify::{available_for_pack, classify, ViewBucket};
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{compute_stats, post_sale, SalePosting};
pub use money::Money;
pub use pack::PackDraft;
pub use types::*;
