//! # Seed Data Generator
//!
//! Populates the database with a starter catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database file
//! cargo run -p sweetshop-db --bin seed
//!
//! # Specify database path
//! cargo run -p sweetshop-db --bin seed -- --db ./data/sweetshop.db
//! ```
//!
//! Each sweet has a name, a short description, a price in cents and an
//! opening stock level. The seeder refuses to run against a non-empty
//! catalog so it never duplicates names.

use std::env;

use sweetshop_core::NewSweet;
use sweetshop_db::{Database, DbConfig};

/// Starter catalog: (name, description, price_cents, stock).
const CATALOG: &[(&str, &str, i64, i64)] = &[
    ("Chocolate Bar", "Milk chocolate bar", 299, 50),
    ("Dark Chocolate", "Rich dark chocolate", 399, 30),
    ("Gummy Bears", "Fruity gummy candies", 199, 100),
    ("Caramel Candy", "Soft caramel sweets", 250, 25),
    ("Mint Chocolate", "Chocolate with mint flavor", 350, 40),
    ("Strawberry Bonbon", "Hard candy with a soft centre", 180, 60),
    ("Liquorice Wheels", "Traditional soft liquorice", 220, 45),
    ("Sour Worms", "Tangy citrus gummy worms", 210, 80),
    ("Toffee Crunch", "Butter toffee with almond bits", 320, 35),
    ("Marzipan Loaf", "Almond marzipan block", 499, 12),
    ("Peanut Brittle", "Crunchy caramelized peanuts", 275, 20),
    ("Rock Candy", "Crystal sugar on a stick", 150, 70),
    ("Fudge Square", "Vanilla butter fudge", 260, 8),
    ("Jelly Beans", "Assorted fruit flavors", 190, 90),
    ("Candy Cane", "Peppermint stripes", 120, 0),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./sweetshop_dev.db");

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
                println!("Sweet Shop Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./sweetshop_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🍬 Sweet Shop Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!("Sweets:   {}", CATALOG.len());
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing catalog
    let existing = db.sweets().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} sweets", existing);
        println!("  Skipping seed to avoid duplicate names.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding catalog...");

    let start = std::time::Instant::now();
    let mut seeded = 0;

    for (name, description, price_cents, stock) in CATALOG {
        let new = NewSweet::new(*name, *price_cents)
            .description(*description)
            .stock(*stock);

        if let Err(e) = db.sweets().insert(&new).await {
            eprintln!("Failed to insert {}: {}", name, e);
            continue;
        }

        seeded += 1;
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Seeded {} sweets in {:?}", seeded, elapsed);

    // Sanity-check the report queries
    let low = db.inventory().list_low_stock(10).await?;
    println!("  Low stock (<= 10): {} sweets", low.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
