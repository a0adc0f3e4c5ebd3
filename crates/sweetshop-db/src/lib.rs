//! # sweetshop-db: Database Layer for the Sweet Shop
//!
//! This crate provides database access for the sweet shop catalog.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sweet Shop Data Flow                              │
//! │                                                                         │
//! │  Service operation (purchase, search_sweets, ...)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   sweetshop-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (sweet.rs,   │    │  (embedded)  │  │   │
//! │  │   │               │    │   inventory,  │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│   search)     │    │ 001_init.sql │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (or :memory: in tests)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (sweet, inventory, search)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sweetshop_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/sweetshop.db")).await?;
//! let sweets = db.sweets().list_all().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::inventory::InventoryRepository;
pub use repository::search::SearchRepository;
pub use repository::sweet::SweetRepository;
