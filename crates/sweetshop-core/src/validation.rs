//! # Validation Module
//!
//! Input validation for catalog and inventory operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Service operation (Rust)                                     │
//! │  └── THIS MODULE: field-level rules, checked before any query          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraint on name                                         │
//! │  └── CHECK (stock >= 0, price_cents >= 0)                              │
//! │                                                                         │
//! │  Multiple layers catch different errors                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::{MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH, MAX_QUERY_LENGTH};

// =============================================================================
// String Validators
// =============================================================================

/// Validates a sweet name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use sweetshop_core::validation::validate_sweet_name;
///
/// assert!(validate_sweet_name("Chocolate Bar").is_ok());
/// assert!(validate_sweet_name("").is_err());
/// assert!(validate_sweet_name(&"A".repeat(300)).is_err());
/// ```
pub fn validate_sweet_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a sweet description.
///
/// ## Rules
/// - Can be empty
/// - Must be at most 1000 characters
pub fn validate_description(description: &str) -> ValidationResult<()> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LENGTH,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LENGTH {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LENGTH,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a purchase or restock quantity.
///
/// ## Rules
/// - Must be strictly positive
/// - No upper bound: restocking is unbounded by contract
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free samples)
///
/// ## Example
/// ```rust
/// use sweetshop_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(299).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a stock level (absolute value, as supplied to create/update).
///
/// ## Rules
/// - Must be non-negative; the invariant is stock >= 0 at all times, so an
///   overwrite may not introduce a negative count
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a 1-based page number.
pub fn validate_page(page: i64) -> ValidationResult<()> {
    if page <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "page".to_string(),
        });
    }

    Ok(())
}

/// Validates a page size limit.
///
/// Values above [`crate::MAX_PAGE_SIZE`] are accepted here and clamped by
/// the caller; only non-positive limits are rejected.
pub fn validate_limit(limit: i64) -> ValidationResult<()> {
    if limit <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "limit".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sweet_name() {
        assert!(validate_sweet_name("Chocolate Bar").is_ok());
        assert!(validate_sweet_name("Gummy Bears").is_ok());

        assert!(validate_sweet_name("").is_err());
        assert!(validate_sweet_name("   ").is_err());
        assert!(validate_sweet_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description("").is_ok());
        assert!(validate_description("Rich dark chocolate").is_ok());
        assert!(validate_description(&"A".repeat(1001)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(1_000_000).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(299).is_ok());
        assert!(validate_price_cents(-1).is_err());
    }

    #[test]
    fn test_validate_stock() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(100).is_ok());
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  chocolate  ").unwrap(), "chocolate");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"q".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_page_and_limit() {
        assert!(validate_page(1).is_ok());
        assert!(validate_page(0).is_err());
        assert!(validate_page(-3).is_err());

        assert!(validate_limit(1).is_ok());
        assert!(validate_limit(100).is_ok());
        assert!(validate_limit(0).is_err());
    }
}
