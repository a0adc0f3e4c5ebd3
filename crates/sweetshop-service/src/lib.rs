//! # sweetshop-service: Operation Surface for the Sweet Shop
//!
//! The services in this crate are what callers program against.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Sweet Shop Architecture                            │
//! │                                                                         │
//! │  Caller (HTTP handler, CLI, ...)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │             ★ sweetshop-service (THIS CRATE) ★                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐  ┌──────────────────┐  ┌───────────────┐  │   │
//! │  │   │CatalogService │  │ InventoryService │  │ SearchService │  │   │
//! │  │   │ create, get   │  │ purchase         │  │ search        │  │   │
//! │  │   │ list, update  │  │ restock          │  │ (filters +    │  │   │
//! │  │   │ delete        │  │ low_stock        │  │  pagination)  │  │   │
//! │  │   └───────────────┘  └──────────────────┘  └───────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sweetshop-db (repositories) → SQLite                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Authorization Boundary
//!
//! The services do NOT authenticate anyone. Catalog mutation, restock and
//! the low-stock report expect the caller to hold an administrator
//! capability, purchase an authenticated identity; search and reads are
//! open. Whatever enforces that must key on the capability alone, never on
//! a particular identity value.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sweetshop_db::DbConfig;
//! use sweetshop_service::SweetShop;
//!
//! let shop = SweetShop::connect(DbConfig::new("./sweetshop.db")).await?;
//!
//! let sweet = shop.catalog().create(NewSweet::new("Fudge", 250).stock(20)).await?;
//! let receipt = shop.inventory().purchase(sweet.id, 3).await?;
//! let page = shop.search().search(SearchFilter::new().query("fudge"), None, None).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod inventory;
pub mod search;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::CatalogService;
pub use error::{ServiceError, ServiceResult};
pub use inventory::{InventoryService, PurchaseReceipt, RestockReceipt};
pub use search::{Pagination, SearchResponse, SearchService};

use sweetshop_db::{Database, DbConfig};

// =============================================================================
// Facade
// =============================================================================

/// One handle bundling the three services over a shared database.
///
/// Cheap to clone; every clone shares the same pool.
#[derive(Debug, Clone)]
pub struct SweetShop {
    db: Database,
}

impl SweetShop {
    /// Connects to the database (running migrations per the config) and
    /// returns a ready-to-use handle.
    pub async fn connect(config: DbConfig) -> ServiceResult<Self> {
        let db = Database::new(config).await?;
        Ok(SweetShop { db })
    }

    /// Wraps an already-connected database handle.
    pub fn from_database(db: Database) -> Self {
        SweetShop { db }
    }

    /// Catalog CRUD operations.
    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(self.db.clone())
    }

    /// Stock transactions and the low-stock report.
    pub fn inventory(&self) -> InventoryService {
        InventoryService::new(self.db.clone())
    }

    /// Multi-criteria catalog search.
    pub fn search(&self) -> SearchService {
        SearchService::new(self.db.clone())
    }

    /// The underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sweetshop_core::{NewSweet, SearchFilter, SweetUpdate};

    async fn shop() -> SweetShop {
        SweetShop::connect(DbConfig::in_memory()).await.unwrap()
    }

    /// End-to-end pass over the whole surface through the facade.
    #[tokio::test]
    async fn test_full_lifecycle() {
        let shop = shop().await;

        // Create
        let sweet = shop
            .catalog()
            .create(
                NewSweet::new("Chocolate Bar", 299)
                    .description("Milk chocolate bar")
                    .stock(50),
            )
            .await
            .unwrap();

        // Buy some, restock more
        let receipt = shop.inventory().purchase(sweet.id, 3).await.unwrap();
        assert_eq!(receipt.remaining_stock, 47);
        let receipt = shop.inventory().restock(sweet.id, 25).await.unwrap();
        assert_eq!(receipt.new_stock, 72);

        // Reprice
        let updated = shop
            .catalog()
            .update(
                sweet.id,
                SweetUpdate {
                    price_cents: Some(325),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.price_cents, 325);
        assert_eq!(updated.stock, 72);

        // Find it
        let found = shop
            .search()
            .search(SearchFilter::new().query("chocolate"), None, None)
            .await
            .unwrap();
        assert_eq!(found.pagination.total, 1);
        assert_eq!(found.data[0].id, sweet.id);

        // Remove it
        shop.catalog().delete(sweet.id).await.unwrap();
        assert!(shop.catalog().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_one_catalog() {
        let shop = shop().await;
        let clone = shop.clone();

        shop.catalog()
            .create(NewSweet::new("Shared", 100))
            .await
            .unwrap();

        assert_eq!(clone.catalog().list().await.unwrap().len(), 1);
    }
}
