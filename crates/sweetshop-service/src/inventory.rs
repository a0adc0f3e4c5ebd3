//! # Inventory Service
//!
//! Purchase and restock transactions, plus the low-stock report.
//!
//! ## Purchase Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     purchase(sweet_id, quantity)                        │
//! │                                                                         │
//! │  validate quantity > 0 ──────────────► InvalidInput                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  load sweet (for name) ──────────────► NotFound                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  conditional decrement                                                 │
//! │  (stock >= qty guard, one statement)                                   │
//! │       │                                                                 │
//! │       ├── applied ───────────────────► PurchaseReceipt                 │
//! │       │                                                                 │
//! │       └── refused ── re-read stock ──► InsufficientStock               │
//! │                      (or NotFound if deleted meanwhile)                │
//! │                                                                         │
//! │  Retrying a successful purchase decrements AGAIN: the operation is    │
//! │  deliberately not idempotent.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No purchase-history record is written; the receipt returned to the
//! caller is the only artifact of the transaction.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ServiceError, ServiceResult};
use sweetshop_core::validation::validate_quantity;
use sweetshop_core::{Sweet, ValidationError, LOW_STOCK_THRESHOLD};
use sweetshop_db::Database;

// =============================================================================
// Receipts
// =============================================================================

/// Confirmation returned to the buyer after a successful purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReceipt {
    pub message: String,
    pub purchased_quantity: i64,
    pub remaining_stock: i64,
    pub sweet_name: String,
}

/// Confirmation returned to the administrator after a restock.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockReceipt {
    pub message: String,
    pub added_quantity: i64,
    pub new_stock: i64,
    pub sweet_name: String,
}

// =============================================================================
// Inventory Service
// =============================================================================

/// Stock transactions and reporting.
///
/// Purchase requires an authenticated identity, restock and the low-stock
/// report an administrator capability; both checks belong to the caller.
#[derive(Debug, Clone)]
pub struct InventoryService {
    db: Database,
}

impl InventoryService {
    /// Creates a new InventoryService over the given database handle.
    pub fn new(db: Database) -> Self {
        InventoryService { db }
    }

    /// Purchases `quantity` units of a sweet.
    ///
    /// The stock check and the decrement commit atomically; concurrent
    /// purchases of the same sweet serialize, and the loser of a race for
    /// the last units gets `InsufficientStock`, never negative stock.
    ///
    /// ## Failure Modes
    /// * `InvalidInput` - non-positive quantity
    /// * `NotFound` - unknown sweet id
    /// * `InsufficientStock` - fewer than `quantity` units available;
    ///   stock is left untouched
    pub async fn purchase(&self, sweet_id: i64, quantity: i64) -> ServiceResult<PurchaseReceipt> {
        debug!(sweet_id = sweet_id, quantity = quantity, "purchase");

        validate_quantity(quantity)?;

        let sweet = self
            .db
            .sweets()
            .get_by_id(sweet_id)
            .await?
            .ok_or(ServiceError::NotFound(sweet_id))?;

        match self.db.inventory().decrement_stock(sweet_id, quantity).await? {
            Some(remaining) => {
                info!(
                    sweet_id = sweet_id,
                    quantity = quantity,
                    remaining = remaining,
                    "Purchase complete"
                );
                Ok(PurchaseReceipt {
                    message: "Purchase successful".to_string(),
                    purchased_quantity: quantity,
                    remaining_stock: remaining,
                    sweet_name: sweet.name,
                })
            }
            None => {
                // Guard refused: re-read to report the freshest stock,
                // and to distinguish a concurrent delete
                match self.db.sweets().get_by_id(sweet_id).await? {
                    Some(current) => Err(ServiceError::InsufficientStock {
                        name: current.name,
                        available: current.stock,
                        requested: quantity,
                    }),
                    None => Err(ServiceError::NotFound(sweet_id)),
                }
            }
        }
    }

    /// Restocks a sweet by `quantity` units. No upper bound.
    ///
    /// ## Failure Modes
    /// * `InvalidInput` - non-positive quantity
    /// * `NotFound` - unknown sweet id
    pub async fn restock(&self, sweet_id: i64, quantity: i64) -> ServiceResult<RestockReceipt> {
        debug!(sweet_id = sweet_id, quantity = quantity, "restock");

        validate_quantity(quantity)?;

        let sweet = self
            .db
            .sweets()
            .get_by_id(sweet_id)
            .await?
            .ok_or(ServiceError::NotFound(sweet_id))?;

        let new_stock = self
            .db
            .inventory()
            .increment_stock(sweet_id, quantity)
            .await?
            .ok_or(ServiceError::NotFound(sweet_id))?;

        info!(
            sweet_id = sweet_id,
            quantity = quantity,
            new_stock = new_stock,
            "Restock complete"
        );
        Ok(RestockReceipt {
            message: "Restock successful".to_string(),
            added_quantity: quantity,
            new_stock,
            sweet_name: sweet.name,
        })
    }

    /// Lists sweets at or below a stock threshold, most urgent first.
    ///
    /// `None` uses the default threshold of 10 units.
    ///
    /// ## Failure Modes
    /// * `InvalidInput` - negative explicit threshold
    pub async fn low_stock(&self, threshold: Option<i64>) -> ServiceResult<Vec<Sweet>> {
        let threshold = threshold.unwrap_or(LOW_STOCK_THRESHOLD);
        if threshold < 0 {
            return Err(ValidationError::OutOfRange {
                field: "threshold".to_string(),
                min: 0,
                max: i64::MAX,
            }
            .into());
        }

        debug!(threshold = threshold, "low-stock report");
        Ok(self.db.inventory().list_low_stock(threshold).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
