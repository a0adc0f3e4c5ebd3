//! # Domain Types
//!
//! Core domain types for the sweet shop catalog.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Sweet       │   │    NewSweet     │   │  SweetUpdate    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  name           │   │  name?          │       │
//! │  │  name (unique)  │   │  description?   │   │  description?   │       │
//! │  │  price_cents    │   │  price_cents    │   │  price_cents?   │       │
//! │  │  stock (>= 0)   │   │  stock?         │   │  stock?         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │  SearchFilter   │   query?, min_price?, max_price?, in_stock?       │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `Sweet.id` is assigned by the store on creation (AUTOINCREMENT) and is
//! immutable thereafter. `name` is the human identifier and is unique
//! across the whole catalog (case-sensitive exact match).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Sweet
// =============================================================================

/// A sweet available for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sweet {
    /// Store-assigned identifier. Immutable after creation.
    pub id: i64,

    /// Display name. Unique across the catalog.
    pub name: String,

    /// Free-text description; empty string when not provided.
    pub description: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Purchasable units on hand. Never negative.
    pub stock: i64,

    /// When the sweet was created. Default catalog sort key (descending).
    pub created_at: DateTime<Utc>,

    /// When the sweet was last mutated.
    pub updated_at: DateTime<Utc>,
}

impl Sweet {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Total price for a quantity of this sweet.
    #[inline]
    pub fn total_price(&self, quantity: i64) -> Money {
        self.price().multiply_quantity(quantity)
    }

    /// Checks if at least one unit can be purchased.
    #[inline]
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Checks if stock is at or below the given threshold.
    ///
    /// ## Example
    /// ```rust
    /// use sweetshop_core::LOW_STOCK_THRESHOLD;
    /// # use chrono::Utc;
    /// # use sweetshop_core::Sweet;
    /// # let now = Utc::now();
    /// # let sweet = Sweet {
    /// #     id: 1, name: "Fudge".into(), description: String::new(),
    /// #     price_cents: 250, stock: 3, created_at: now, updated_at: now,
    /// # };
    /// assert!(sweet.is_low_stock(LOW_STOCK_THRESHOLD));
    /// ```
    #[inline]
    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.stock <= threshold
    }
}

// =============================================================================
// NewSweet
// =============================================================================

/// Input for creating a sweet.
///
/// `description` defaults to empty and `stock` to zero when omitted; the
/// store assigns `id` and both timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSweet {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub stock: Option<i64>,
}

impl NewSweet {
    /// Creates the minimal input: a name and a price, no description,
    /// starting out of stock.
    pub fn new(name: impl Into<String>, price_cents: i64) -> Self {
        NewSweet {
            name: name.into(),
            description: None,
            price_cents,
            stock: None,
        }
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial stock.
    pub fn stock(mut self, stock: i64) -> Self {
        self.stock = Some(stock);
        self
    }
}

// =============================================================================
// SweetUpdate
// =============================================================================

/// Partial update for a sweet: one named optional slot per mutable
/// attribute, merged field-by-field against the current record.
///
/// An unset field retains its prior value. `id`, `created_at` and
/// `updated_at` are not caller-writable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweetUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub stock: Option<i64>,
}

impl SweetUpdate {
    /// Checks whether the update carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price_cents.is_none()
            && self.stock.is_none()
    }

    /// Returns a copy of `current` with the provided fields overwritten.
    pub fn apply_to(&self, current: &Sweet) -> Sweet {
        Sweet {
            id: current.id,
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| current.description.clone()),
            price_cents: self.price_cents.unwrap_or(current.price_cents),
            stock: self.stock.unwrap_or(current.stock),
            created_at: current.created_at,
            updated_at: current.updated_at,
        }
    }
}

// =============================================================================
// SearchFilter
// =============================================================================

/// Filter criteria for catalog search. All criteria are optional and
/// combine with AND; an empty filter matches the whole catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilter {
    /// Case-insensitive substring matched against name OR description.
    pub query: Option<String>,

    /// Inclusive lower bound on price.
    pub min_price: Option<Money>,

    /// Inclusive upper bound on price.
    pub max_price: Option<Money>,

    /// When `Some(true)`, restrict to sweets with stock > 0.
    pub in_stock: Option<bool>,
}

impl SearchFilter {
    /// An empty filter (matches everything).
    pub fn new() -> Self {
        SearchFilter::default()
    }

    /// Sets the text query.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Sets the inclusive minimum price.
    pub fn min_price(mut self, min: Money) -> Self {
        self.min_price = Some(min);
        self
    }

    /// Sets the inclusive maximum price.
    pub fn max_price(mut self, max: Money) -> Self {
        self.max_price = Some(max);
        self
    }

    /// Restricts results to sweets currently in stock.
    pub fn in_stock_only(mut self) -> Self {
        self.in_stock = Some(true);
        self
    }

    /// Checks whether any criterion is set.
    pub fn is_empty(&self) -> bool {
        let text_filter = self
            .query
            .as_deref()
            .map(|q| !q.trim().is_empty())
            .unwrap_or(false);
        !text_filter
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.in_stock != Some(true)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
