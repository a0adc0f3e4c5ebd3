//! # Inventory Repository
//!
//! Stock mutation primitives and the low-stock report.
//!
//! ## Stock Update Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Purchase Linearization                               │
//! │                                                                         │
//! │  ❌ WRONG: read, check in Rust, then write (lost-update race)          │
//! │     let s = SELECT stock ...;                                          │
//! │     if s >= qty { UPDATE stock = s - qty }   ← two purchases can both  │
//! │                                                pass the check           │
//! │                                                                         │
//! │  ✅ CORRECT: one conditional statement (compare-and-swap by id)        │
//! │     UPDATE sweets SET stock = stock - qty                              │
//! │     WHERE id = ? AND stock >= qty                                      │
//! │     RETURNING stock                                                    │
//! │                                                                         │
//! │  The guard and the decrement commit together or not at all, so        │
//! │  stock never goes negative under any interleaving, and sweets         │
//! │  other than the targeted row are never locked by application code.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use sweetshop_core::Sweet;

/// Repository for stock mutation and reporting.
///
/// ## Usage
/// ```rust,ignore
/// let repo = InventoryRepository::new(pool);
///
/// match repo.decrement_stock(id, 3).await? {
///     Some(remaining) => println!("now at {remaining}"),
///     None => println!("missing sweet or not enough stock"),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    /// Atomically decrements stock if (and only if) enough is available.
    ///
    /// This is the linearization point for purchases: the availability
    /// check and the decrement are one statement.
    ///
    /// ## Arguments
    /// * `id` - Sweet ID
    /// * `quantity` - Units to remove; the caller validates positivity
    ///
    /// ## Returns
    /// * `Ok(Some(stock))` - Decrement applied; `stock` is the new level
    /// * `Ok(None)` - Guard failed: either the id is unknown or
    ///   `stock < quantity`. The caller classifies the two cases.
    pub async fn decrement_stock(&self, id: i64, quantity: i64) -> DbResult<Option<i64>> {
        debug!(id = id, quantity = quantity, "Conditional stock decrement");

        let now = Utc::now();

        let stock: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE sweets
            SET stock = stock - ?2,
                updated_at = ?3
            WHERE id = ?1 AND stock >= ?2
            RETURNING stock
            "#,
        )
        .bind(id)
        .bind(quantity)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(stock)
    }

    /// Atomically increments stock. No upper bound.
    ///
    /// ## Returns
    /// * `Ok(Some(stock))` - Increment applied; `stock` is the new level
    /// * `Ok(None)` - Unknown id
    pub async fn increment_stock(&self, id: i64, quantity: i64) -> DbResult<Option<i64>> {
        debug!(id = id, quantity = quantity, "Stock increment");

        let now = Utc::now();

        let stock: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE sweets
            SET stock = stock + ?2,
                updated_at = ?3
            WHERE id = ?1
            RETURNING stock
            "#,
        )
        .bind(id)
        .bind(quantity)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(stock)
    }

    /// Lists sweets with stock at or below the threshold, most urgent
    /// (lowest stock) first.
    ///
    /// Pure read; bounded by catalog size, so no pagination.
    pub async fn list_low_stock(&self, threshold: i64) -> DbResult<Vec<Sweet>> {
        debug!(threshold = threshold, "Low-stock report");

        let sweets = sqlx::query_as::<_, Sweet>(
            r#"
            SELECT id, name, description, price_cents, stock, created_at, updated_at
            FROM sweets
            WHERE stock <= ?1
            ORDER BY stock ASC, id ASC
            "#,
        )
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        Ok(sweets)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
