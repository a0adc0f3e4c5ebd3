//! # Service Error Type
//!
//! The caller-facing error taxonomy.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow                                           │
//! │                                                                         │
//! │  Caller                       Service                                   │
//! │  ──────                       ───────                                   │
//! │                                                                         │
//! │  purchase(id, qty)                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Validation failed? ── ValidationError ──► InvalidInput          │  │
//! │  │         │                                                        │  │
//! │  │  Unknown id? ─────────────────────────► NotFound                 │  │
//! │  │         │                                                        │  │
//! │  │  Guard refused? ──────────────────────► InsufficientStock        │  │
//! │  │         │                                                        │  │
//! │  │  Storage fault? ── DbError ── logged ─► Internal (generic)       │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All four domain errors are terminal for the request and carry enough
//! detail to act on (which field, which name collided, available vs
//! requested stock). `Internal` is the only class worth retrying; its
//! underlying detail goes to the log, never to the caller.

use thiserror::Error;
use tracing::error;

use sweetshop_core::ValidationError;
use sweetshop_db::DbError;

/// Errors reported by the catalog, inventory and search services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Caller input failed validation (missing/malformed field,
    /// non-positive quantity, negative price).
    #[error("{0}")]
    InvalidInput(#[from] ValidationError),

    /// No sweet with the given id.
    #[error("Sweet not found: {0}")]
    NotFound(i64),

    /// A sweet with the given name already exists.
    #[error("Sweet '{0}' already exists")]
    Conflict(String),

    /// Purchase exceeds available stock. Stock is left untouched.
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Persistence collaborator failure, surfaced generically.
    #[error("Storage failure: {0}")]
    Internal(String),
}

/// Converts database errors to service errors.
///
/// Domain conditions (`NotFound`, `UniqueViolation`) are classified at the
/// call sites, where the id and name are known; this conversion is the
/// backstop for everything that escapes, and it deliberately genericizes:
/// the caller learns that storage failed, the log learns why.
impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation { field, value } => {
                // Raced past a pre-check; the name in the message comes
                // from the constraint text when the call site didn't know it
                error!(field = %field, value = %value, "Unique constraint race");
                ServiceError::Conflict(value)
            }
            DbError::NotFound { entity, id } => {
                error!(entity = %entity, id = %id, "Row missing during operation");
                ServiceError::Internal("storage operation failed".to_string())
            }
            DbError::ConnectionFailed(e) => {
                error!("Database connection failed: {e}");
                ServiceError::Internal("database connection failed".to_string())
            }
            DbError::MigrationFailed(e) => {
                error!("Database migration failed: {e}");
                ServiceError::Internal("database migration failed".to_string())
            }
            DbError::QueryFailed(e) => {
                error!("Database query failed: {e}");
                ServiceError::Internal("database operation failed".to_string())
            }
            DbError::PoolExhausted => {
                error!("Database pool exhausted");
                ServiceError::Internal("database pool exhausted".to_string())
            }
            DbError::Internal(e) => {
                error!("Internal database error: {e}");
                ServiceError::Internal("database operation failed".to_string())
            }
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = ServiceError::InsufficientStock {
            name: "Chocolate Bar".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Chocolate Bar: available 3, requested 5"
        );

        assert_eq!(
            ServiceError::NotFound(42).to_string(),
            "Sweet not found: 42"
        );
        assert_eq!(
            ServiceError::Conflict("Fudge".to_string()).to_string(),
            "Sweet 'Fudge' already exists"
        );
    }

    #[test]
    fn test_validation_converts_to_invalid_input() {
        let validation = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let err: ServiceError = validation.into();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_db_errors_surface_generically() {
        let err: ServiceError = DbError::QueryFailed("secret table details".to_string()).into();
        match err {
            ServiceError::Internal(msg) => assert!(!msg.contains("secret")),
            other => panic!("expected Internal, got {other:?}"),
        }
    }

    #[test]
    fn test_unique_violation_converts_to_conflict() {
        let err: ServiceError = DbError::duplicate("sweets.name", "Fudge").into();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }
}
