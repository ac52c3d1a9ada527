//! # Domain Types
//!
//! Core domain types used throughout Mercato.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │    Product      │   │      Sale       │   │    PackItem     │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │   │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  product_id     │   │
//! │  │  name           │   │  product_name   │   │  product_name   │   │
//! │  │  prices (cents) │   │  total_price    │   │  quantity       │   │
//! │  │  stock          │   │  profit         │   │  unit_cost      │   │
//! │  │  category       │   │  date           │   │  (snapshots)    │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `Sale` freezes the product name and the price math at sale time; a
//! `PackItem` freezes the constituent's name and purchase price at
//! pack-creation time. Later edits to the product never rewrite history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product Category
// =============================================================================

/// The authoritative category of a product.
///
/// A product is a `Pack` iff it bundles other products' costs; a `Simple`
/// product sells on its own. The category governs pricing, stock semantics
/// and the `pack_items` requirement. Display bucketing additionally applies
/// a name heuristic (see [`crate::classify`]), but that heuristic never
/// feeds back into this field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Simple,
    Pack,
}

impl ProductCategory {
    /// Canonical lowercase label, matching the stored representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Simple => "simple",
            ProductCategory::Pack => "pack",
        }
    }

    /// Parses the stored label; unknown labels map to `None` (historical
    /// rows may carry no category at all).
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "simple" => Some(ProductCategory::Simple),
            "pack" => Some(ProductCategory::Pack),
            _ => None,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// An inventory item available for sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4), assigned by the persistence gateway on
    /// creation; immutable thereafter.
    pub id: String,

    /// Display name shown in the catalog. Non-empty.
    pub name: String,

    /// Optional free-text description.
    pub description: Option<String>,

    /// Unit purchase cost. For packs this is derived from the line items
    /// and never edited directly.
    pub purchase_price: Money,

    /// Unit sale price.
    pub sale_price: Money,

    /// Quantity on hand. Only gates sales for non-order-based simple
    /// products; order-based items may be driven negative by a sale.
    pub stock: i64,

    /// Authoritative category. `None` on historical rows created before
    /// categories were recorded; new writes always set it.
    pub category: Option<ProductCategory>,

    /// Line items, present iff `category` is `Pack`. Insertion order is
    /// preserved but carries no meaning.
    pub pack_items: Option<Vec<PackItem>>,

    /// Cumulative units ever sold. Monotonically non-decreasing.
    pub total_sold: i64,

    /// When true, stock is advisory and does not gate sale quantity
    /// (back-ordered / made-to-order items).
    pub is_order_based: bool,

    /// Creation timestamp; used only for default list ordering
    /// (newest first).
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// True when the product is an explicit simple item whose stock gates
    /// sales.
    pub fn gates_stock(&self) -> bool {
        self.category == Some(ProductCategory::Simple) && !self.is_order_based
    }
}

/// A product as submitted for creation, before the gateway assigns an id
/// and creation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub purchase_price: Money,
    pub sale_price: Money,
    pub stock: i64,
    pub category: Option<ProductCategory>,
    pub pack_items: Option<Vec<PackItem>>,
    pub is_order_based: bool,
}

// =============================================================================
// Pack Item
// =============================================================================

/// A line item inside a pack.
///
/// `product_id` is a weak reference (lookup-only, not ownership);
/// `product_name` and `unit_cost` are snapshots taken at pack-creation
/// time and are not kept in sync with later edits to the product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackItem {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub unit_cost: Money,
}

impl PackItem {
    /// Cost contribution of this line (unit cost × quantity).
    pub fn line_cost(&self) -> Money {
        self.unit_cost * self.quantity
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale event. Created once, at sale time; never mutated or
/// deleted by this system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Unique identifier, assigned by the persistence gateway;
    /// independent of product ids and never reused.
    pub id: String,

    /// Product sold (weak reference).
    pub product_id: String,

    /// Product name at time of sale (frozen).
    pub product_name: String,

    /// Units sold. Positive.
    pub quantity: i64,

    /// quantity × sale price at time of sale (frozen).
    pub total_price: Money,

    /// quantity × (sale price − purchase price) at time of sale (frozen).
    pub profit: Money,

    /// When the sale happened.
    pub date: DateTime<Utc>,
}

/// A sale as computed by the ledger engine, before the gateway assigns an
/// id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub total_price: Money,
    pub profit: Money,
    pub date: DateTime<Utc>,
}

// =============================================================================
// Stats
// =============================================================================

/// Derived statistics over the full product and sale lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Sum of sale totals.
    pub revenue: Money,

    /// Sum of sale profits.
    pub profit: Money,

    /// Sum of sold quantities.
    pub total_sold: i64,

    /// Sum of purchase price × stock over non-pack products. Packs are
    /// excluded: their value is already represented by their constituent
    /// simple products.
    pub stock_value: Money,
}

// =============================================================================
// Session
// =============================================================================

/// An authenticated operator session.
///
/// Passed as explicit context to store operations rather than held in an
/// ambient singleton, so the engine stays testable without a live sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub operator_id: String,
    pub email: String,
    pub signed_in_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
