//! # Sweet Repository
//!
//! Database operations for the sweet catalog.
//!
//! ## Key Operations
//! - CRUD with store-assigned integer ids
//! - Name lookups for uniqueness checks
//! - Newest-first listing
//!
//! ## Identity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  id    - INTEGER PRIMARY KEY AUTOINCREMENT, assigned on insert,         │
//! │          immutable afterwards                                           │
//! │  name  - human identifier, UNIQUE across the catalog (case-sensitive)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use sweetshop_core::{NewSweet, Sweet};

/// Column list shared by every query that materializes a [`Sweet`].
const SWEET_COLUMNS: &str = "id, name, description, price_cents, stock, created_at, updated_at";

/// Repository for sweet catalog operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = SweetRepository::new(pool);
///
/// let sweet = repo.insert(&NewSweet::new("Fudge", 250).stock(20)).await?;
/// let found = repo.get_by_id(sweet.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SweetRepository {
    pool: SqlitePool,
}

impl SweetRepository {
    /// Creates a new SweetRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SweetRepository { pool }
    }

    /// Inserts a new sweet and returns the stored row.
    ///
    /// The store assigns `id`, `created_at` and `updated_at`; omitted
    /// description defaults to empty, omitted stock to zero.
    ///
    /// ## Returns
    /// * `Ok(Sweet)` - Inserted row, including the assigned id
    /// * `Err(DbError::UniqueViolation)` - Name already exists
    pub async fn insert(&self, new: &NewSweet) -> DbResult<Sweet> {
        debug!(name = %new.name, "Inserting sweet");

        let now = Utc::now();
        let description = new.description.clone().unwrap_or_default();
        let stock = new.stock.unwrap_or(0);

        let sql = format!(
            "INSERT INTO sweets (name, description, price_cents, stock, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
             RETURNING {SWEET_COLUMNS}"
        );

        let sweet = sqlx::query_as::<_, Sweet>(&sql)
            .bind(&new.name)
            .bind(&description)
            .bind(new.price_cents)
            .bind(stock)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(sweet)
    }

    /// Gets a sweet by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Sweet))` - Sweet found
    /// * `Ok(None)` - Sweet not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sweet>> {
        let sql = format!("SELECT {SWEET_COLUMNS} FROM sweets WHERE id = ?1");

        let sweet = sqlx::query_as::<_, Sweet>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sweet)
    }

    /// Gets a sweet by its exact name (case-sensitive).
    ///
    /// ## Usage
    /// Uniqueness pre-checks on create and rename.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Sweet>> {
        let sql = format!("SELECT {SWEET_COLUMNS} FROM sweets WHERE name = ?1");

        let sweet = sqlx::query_as::<_, Sweet>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sweet)
    }

    /// Lists the whole catalog, newest first.
    ///
    /// The id tiebreak keeps the ordering total when two rows share a
    /// creation timestamp.
    pub async fn list_all(&self) -> DbResult<Vec<Sweet>> {
        let sql =
            format!("SELECT {SWEET_COLUMNS} FROM sweets ORDER BY created_at DESC, id DESC");

        let sweets = sqlx::query_as::<_, Sweet>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(sweets)
    }

    /// Overwrites an existing sweet with the merged record.
    ///
    /// The caller merges a partial update against the current row first;
    /// this persists the result. `id` and `created_at` never change.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Sweet doesn't exist
    /// * `Err(DbError::UniqueViolation)` - Renamed onto an existing name
    pub async fn update(&self, sweet: &Sweet) -> DbResult<()> {
        debug!(id = sweet.id, "Updating sweet");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE sweets SET
                name = ?2,
                description = ?3,
                price_cents = ?4,
                stock = ?5,
                updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(sweet.id)
        .bind(&sweet.name)
        .bind(&sweet.description)
        .bind(sweet.price_cents)
        .bind(sweet.stock)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Sweet", sweet.id));
        }

        Ok(())
    }

    /// Deletes a sweet permanently.
    ///
    /// No soft delete: nothing else references catalog rows, so removal
    /// is final.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = id, "Deleting sweet");

        let result = sqlx::query("DELETE FROM sweets WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Sweet", id));
        }

        Ok(())
    }

    /// Counts catalog rows (for diagnostics and the seed guard).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sweets")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_defaults() {
        let db = test_db().await;
        let repo = db.sweets();

        let sweet = repo
            .insert(&NewSweet::new("Chocolate Bar", 299))
            .await
            .unwrap();

        assert!(sweet.id >= 1);
        assert_eq!(sweet.name, "Chocolate Bar");
        assert_eq!(sweet.description, "");
        assert_eq!(sweet.price_cents, 299);
        assert_eq!(sweet.stock, 0);
        assert_eq!(sweet.created_at, sweet.updated_at);
    }

    #[tokio::test]
    async fn test_insert_duplicate_name_is_unique_violation() {
        let db = test_db().await;
        let repo = db.sweets();

        repo.insert(&NewSweet::new("Fudge", 250)).await.unwrap();
        let err = repo
            .insert(&NewSweet::new("Fudge", 999).stock(5))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_get_by_id_and_name() {
        let db = test_db().await;
        let repo = db.sweets();

        let created = repo
            .insert(&NewSweet::new("Gummy Bears", 199).description("Fruity").stock(100))
            .await
            .unwrap();

        let by_id = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id, created);

        let by_name = repo.get_by_name("Gummy Bears").await.unwrap().unwrap();
        assert_eq!(by_name.id, created.id);

        // Case-sensitive exact match
        assert!(repo.get_by_name("gummy bears").await.unwrap().is_none());
        assert!(repo.get_by_id(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_all_is_newest_first() {
        let db = test_db().await;
        let repo = db.sweets();

        let first = repo.insert(&NewSweet::new("First", 100)).await.unwrap();
        let second = repo.insert(&NewSweet::new("Second", 200)).await.unwrap();
        let third = repo.insert(&NewSweet::new("Third", 300)).await.unwrap();

        let all = repo.list_all().await.unwrap();
        let ids: Vec<i64> = all.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
    }

    #[tokio::test]
    async fn test_update_overwrites_and_bumps_updated_at() {
        let db = test_db().await;
        let repo = db.sweets();

        let mut sweet = repo
            .insert(&NewSweet::new("Caramel Candy", 250).stock(25))
            .await
            .unwrap();

        sweet.price_cents = 275;
        sweet.description = "Soft caramel sweets".to_string();
        repo.update(&sweet).await.unwrap();

        let stored = repo.get_by_id(sweet.id).await.unwrap().unwrap();
        assert_eq!(stored.price_cents, 275);
        assert_eq!(stored.description, "Soft caramel sweets");
        assert_eq!(stored.created_at, sweet.created_at);
        assert!(stored.updated_at >= sweet.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let db = test_db().await;
        let repo = db.sweets();

        let mut ghost = repo.insert(&NewSweet::new("Ghost", 100)).await.unwrap();
        repo.delete(ghost.id).await.unwrap();

        ghost.price_cents = 150;
        let err = repo.update(&ghost).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_is_permanent() {
        let db = test_db().await;
        let repo = db.sweets();

        let sweet = repo.insert(&NewSweet::new("Mint Drop", 150)).await.unwrap();
        repo.delete(sweet.id).await.unwrap();

        assert!(repo.get_by_id(sweet.id).await.unwrap().is_none());

        // Deleting again reports NotFound
        let err = repo.delete(sweet.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_count() {
        let db = test_db().await;
        let repo = db.sweets();

        assert_eq!(repo.count().await.unwrap(), 0);
        repo.insert(&NewSweet::new("One", 100)).await.unwrap();
        repo.insert(&NewSweet::new("Two", 200)).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
