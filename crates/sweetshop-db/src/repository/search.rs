//! # Search Repository
//!
//! Filtered catalog queries backing the search engine.
//!
//! ## How Filtering Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Filter Composition (AND)                             │
//! │                                                                         │
//! │  query      → instr(lower(name), q) OR instr(lower(description), q)    │
//! │  min_price  → price_cents >= min                                       │
//! │  max_price  → price_cents <= max                                       │
//! │  in_stock   → stock > 0                                                │
//! │                                                                         │
//! │  Every criterion is optional; an absent bind collapses its clause      │
//! │  to TRUE (via `?n IS NULL OR ...`), so one static statement covers     │
//! │  all combinations.                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `instr` keeps substring semantics literal: a `%` or `_` in the query is
//! matched as text, not as a LIKE wildcard. The query is lowercased on the
//! Rust side, the columns in SQL, which makes the match case-insensitive.
//!
//! `search` and `count` share one WHERE clause so the page slice and the
//! total can never disagree about the filtered set.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use sweetshop_core::{SearchFilter, Sweet};

/// Shared WHERE clause for `search` and `count`.
///
/// Binds: ?1 lowercased query (or NULL), ?2 min cents (or NULL),
/// ?3 max cents (or NULL), ?4 in-stock flag as 0/1.
const FILTER_WHERE: &str = "(?1 IS NULL OR instr(lower(name), ?1) > 0 OR instr(lower(description), ?1) > 0) \
     AND (?2 IS NULL OR price_cents >= ?2) \
     AND (?3 IS NULL OR price_cents <= ?3) \
     AND (?4 = 0 OR stock > 0)";

/// Repository for filtered catalog queries.
#[derive(Debug, Clone)]
pub struct SearchRepository {
    pool: SqlitePool,
}

impl SearchRepository {
    /// Creates a new SearchRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SearchRepository { pool }
    }

    /// Returns one page of the filtered catalog, newest first.
    ///
    /// ## Arguments
    /// * `filter` - Criteria to AND together (all optional)
    /// * `limit` - Page size; the caller has already validated and clamped
    /// * `offset` - Rows to skip: `(page - 1) * limit`
    ///
    /// An offset past the end of the filtered set yields an empty page,
    /// not an error.
    pub async fn search(
        &self,
        filter: &SearchFilter,
        limit: i64,
        offset: i64,
    ) -> DbResult<Vec<Sweet>> {
        debug!(?filter, limit = limit, offset = offset, "Searching catalog");

        let sql = format!(
            "SELECT id, name, description, price_cents, stock, created_at, updated_at \
             FROM sweets \
             WHERE {FILTER_WHERE} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ?5 OFFSET ?6"
        );

        // Binds ?1..?4 of FILTER_WHERE, then the slice
        let sweets = sqlx::query_as::<_, Sweet>(&sql)
            .bind(text_bind(filter))
            .bind(filter.min_price.map(|m| m.cents()))
            .bind(filter.max_price.map(|m| m.cents()))
            .bind(i64::from(filter.in_stock == Some(true)))
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = sweets.len(), "Search returned sweets");
        Ok(sweets)
    }

    /// Counts ALL rows matching the filter, ignoring pagination.
    ///
    /// This is the `total` of the search response, from which the page
    /// count is derived.
    pub async fn count(&self, filter: &SearchFilter) -> DbResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM sweets WHERE {FILTER_WHERE}");

        let total: i64 = sqlx::query_scalar(&sql)
            .bind(text_bind(filter))
            .bind(filter.min_price.map(|m| m.cents()))
            .bind(filter.max_price.map(|m| m.cents()))
            .bind(i64::from(filter.in_stock == Some(true)))
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }
}

// =============================================================================
// Bind Helpers
// =============================================================================

/// The normalized text bind: trimmed, lowercased, absent when blank.
fn text_bind(filter: &SearchFilter) -> Option<String> {
    filter
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase)
}

// =============================================================================
// Unit Tests
// =============================================================================
