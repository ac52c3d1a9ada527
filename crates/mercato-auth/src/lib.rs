//! # mercato-auth: Operator Sign-In for Mercato
//!
//! Single-operator authentication: credentials verified against the
//! argon2 hash stored by mercato-db, with session changes broadcast
//! over a `tokio::sync::watch` channel.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Caller                                                                 │
//! │    │  sign_in / sign_out / subscribe                                    │
//! │    ▼                                                                    │
//! │  mercato-auth (THIS CRATE) ──► OperatorRepository (mercato-db)          │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  Session (mercato-core) ──► passed explicitly to InventoryStore calls   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mercato_auth::AuthGateway;
//!
//! let gateway = AuthGateway::new(&db);
//! let session = gateway.sign_in("owner@shop.example", "password").await?;
//! let products = store.list_products(&session).await?;
//! ```

pub mod error;
pub mod gateway;

pub use error::{AuthError, AuthResult};
pub use gateway::{hash_password, AuthGateway};
