//! # Seed Data Generator
//!
//! Populates the database with demo catalog data for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default dev database
//! cargo run -p mercato-db --bin seed
//!
//! # Specify database path
//! cargo run -p mercato-db --bin seed -- --db ./data/mercato.db
//! ```
//!
//! Seeds a small auto-parts catalog: simple products with realistic
//! purchase/sale prices and stock levels, a couple of order-based items,
//! and one pack assembled from the seeded products.

use std::env;

use mercato_core::{Money, NewProduct, PackDraft, ProductCategory};
use mercato_db::{Database, DbConfig};
use tracing_subscriber::EnvFilter;

/// (name, purchase cents, sale cents, stock)
const SIMPLE_PRODUCTS: &[(&str, i64, i64, i64)] = &[
    ("Engine Oil 5W30 4L", 2200, 3500, 24),
    ("Engine Oil 10W40 4L", 1900, 3100, 18),
    ("Oil Filter", 450, 900, 40),
    ("Air Filter", 600, 1200, 35),
    ("Cabin Filter", 700, 1400, 20),
    ("Brake Pads Front", 1800, 3200, 16),
    ("Brake Pads Rear", 1600, 2900, 14),
    ("Brake Fluid DOT4 1L", 500, 950, 30),
    ("Coolant Concentrate 1L", 650, 1200, 28),
    ("Antifreeze 4L", 1100, 1900, 22),
    ("Wiper Blade 16in", 350, 750, 50),
    ("Wiper Blade 24in", 420, 850, 45),
    ("Spark Plug", 280, 600, 80),
    ("Car Battery 60Ah", 5500, 8900, 8),
    ("Headlight Bulb H4", 300, 700, 60),
    ("Fuse Kit", 250, 550, 40),
    ("Tyre Shine 500ml", 400, 850, 25),
    ("Glass Cleaner 500ml", 300, 650, 30),
    ("Microfiber Cloth 3x", 350, 800, 36),
    ("Chain Lube 400ml", 550, 1100, 20),
];

/// (name, purchase cents, sale cents) - stock is advisory for these.
const ORDER_BASED_PRODUCTS: &[(&str, i64, i64)] = &[
    ("Custom Seat Covers", 4500, 8500),
    ("Alloy Rim 15in", 9000, 14500),
    ("Tow Hitch Install", 6000, 11000),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./mercato_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Mercato Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./mercato_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Mercato Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding catalog...");

    let mut oil = None;
    let mut oil_filter = None;

    for (name, purchase, sale, stock) in SIMPLE_PRODUCTS {
        let product = db
            .products()
            .insert(NewProduct {
                name: name.to_string(),
                description: None,
                purchase_price: Money::from_cents(*purchase),
                sale_price: Money::from_cents(*sale),
                stock: *stock,
                category: Some(ProductCategory::Simple),
                pack_items: None,
                is_order_based: false,
            })
            .await?;

        // Remember the pack constituents.
        match *name {
            "Engine Oil 5W30 4L" => oil = Some(product),
            "Oil Filter" => oil_filter = Some(product),
            _ => {}
        }
    }

    for (name, purchase, sale) in ORDER_BASED_PRODUCTS {
        db.products()
            .insert(NewProduct {
                name: name.to_string(),
                description: Some("Made to order".to_string()),
                purchase_price: Money::from_cents(*purchase),
                sale_price: Money::from_cents(*sale),
                stock: 0,
                category: Some(ProductCategory::Simple),
                pack_items: None,
                is_order_based: true,
            })
            .await?;
    }

    // One demo pack assembled from the seeded constituents.
    if let (Some(oil), Some(oil_filter)) = (oil, oil_filter) {
        let mut draft = PackDraft::new("Oil Change Pack");
        draft.description = Some("Oil plus filter, serviced together".to_string());
        draft.sale_price = Money::from_cents(3900);
        draft.stock = 10;
        draft.add_item(&oil);
        draft.add_item(&oil_filter);
        db.products().insert(draft.into_product()?).await?;
    }

    let total = db.products().count().await?;
    println!("✓ Seeded {} products", total);
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
