//! # sweetshop-core: Pure Business Logic for the Sweet Shop
//!
//! This crate is the **heart** of the sweet shop. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Sweet Shop Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Caller (HTTP handler, CLI, ...)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    sweetshop-service                            │   │
//! │  │    create_sweet, purchase, restock, search, low_stock, ...     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sweetshop-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   money   │  │ validation│                  │   │
//! │  │   │   Sweet   │  │   Money   │  │   rules   │                  │   │
//! │  │   │  filters  │  │   cents   │  │  checks   │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  sweetshop-db (Database Layer)                  │   │
//! │  │             SQLite queries, migrations, repositories            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Sweet, NewSweet, SweetUpdate, SearchFilter)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Validation error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use sweetshop_core::Money` instead of
// `use sweetshop_core::money::Money`

pub use error::ValidationError;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stock level at or below which a sweet counts as "low stock".
///
/// ## Business Reason
/// The inventory report flags anything at or under this many units so the
/// shop can reorder before selling out. Callers may pass an explicit
/// threshold; this is the default.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Default page size for catalog search when the caller omits a limit.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size for catalog search.
///
/// ## Business Reason
/// Keeps a single search response bounded regardless of what the caller
/// asks for. Larger requested limits are clamped, not rejected.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Maximum length of a sweet name in characters.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum length of a sweet description in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// Maximum length of a search query in characters.
pub const MAX_QUERY_LENGTH: usize = 100;
