//! # Catalog Service
//!
//! Create, read, update and delete operations over the sweet catalog.
//!
//! ## Operation Contracts
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create   name must be unique and non-empty, price >= 0, stock >= 0    │
//! │  get      NotFound when the id is unknown                              │
//! │  list     whole catalog, newest first                                  │
//! │  update   partial: unspecified fields keep their prior values;         │
//! │           a differing name re-checks uniqueness                        │
//! │  delete   permanent removal, NotFound when the id is unknown           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Requires an administrator capability for mutations; the capability
//! check itself belongs to the caller.

use tracing::{debug, info};

use crate::error::{ServiceError, ServiceResult};
use sweetshop_core::validation::{
    validate_description, validate_price_cents, validate_stock, validate_sweet_name,
};
use sweetshop_core::{NewSweet, Sweet, SweetUpdate};
use sweetshop_db::{Database, DbError};

/// Catalog CRUD operations.
#[derive(Debug, Clone)]
pub struct CatalogService {
    db: Database,
}

impl CatalogService {
    /// Creates a new CatalogService over the given database handle.
    pub fn new(db: Database) -> Self {
        CatalogService { db }
    }

    /// Creates a sweet.
    ///
    /// ## Failure Modes
    /// * `InvalidInput` - empty name, negative price, negative stock
    /// * `Conflict` - a sweet with the same name already exists
    pub async fn create(&self, new: NewSweet) -> ServiceResult<Sweet> {
        debug!(name = %new.name, "create sweet");

        validate_sweet_name(&new.name)?;
        if let Some(description) = &new.description {
            validate_description(description)?;
        }
        validate_price_cents(new.price_cents)?;
        if let Some(stock) = new.stock {
            validate_stock(stock)?;
        }

        // Names are stored trimmed so " Fudge " and "Fudge" cannot coexist
        let name = new.name.trim().to_string();

        if self.db.sweets().get_by_name(&name).await?.is_some() {
            return Err(ServiceError::Conflict(name));
        }

        let normalized = NewSweet { name: name.clone(), ..new };

        let sweet = match self.db.sweets().insert(&normalized).await {
            Ok(sweet) => sweet,
            // The UNIQUE constraint backstops the pre-check under races
            Err(DbError::UniqueViolation { .. }) => return Err(ServiceError::Conflict(name)),
            Err(e) => return Err(e.into()),
        };

        info!(id = sweet.id, name = %sweet.name, "Sweet created");
        Ok(sweet)
    }

    /// Gets a sweet by id.
    pub async fn get(&self, id: i64) -> ServiceResult<Sweet> {
        self.db
            .sweets()
            .get_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(id))
    }

    /// Lists the whole catalog, newest first.
    pub async fn list(&self) -> ServiceResult<Vec<Sweet>> {
        Ok(self.db.sweets().list_all().await?)
    }

    /// Applies a partial update to a sweet.
    ///
    /// Unspecified fields retain their prior values. Supplying a name that
    /// differs from the current one re-checks uniqueness.
    ///
    /// ## Failure Modes
    /// * `NotFound` - unknown id
    /// * `Conflict` - new name collides with another sweet
    /// * `InvalidInput` - empty name, negative price, negative stock
    pub async fn update(&self, id: i64, update: SweetUpdate) -> ServiceResult<Sweet> {
        debug!(id = id, "update sweet");

        if let Some(name) = &update.name {
            validate_sweet_name(name)?;
        }
        if let Some(description) = &update.description {
            validate_description(description)?;
        }
        if let Some(price_cents) = update.price_cents {
            validate_price_cents(price_cents)?;
        }
        if let Some(stock) = update.stock {
            validate_stock(stock)?;
        }

        let current = self.get(id).await?;

        // Normalize a supplied name the same way create does
        let mut update = update;
        if let Some(name) = update.name.as_mut() {
            *name = name.trim().to_string();
        }

        // A differing name must not collide with another sweet
        if let Some(name) = &update.name {
            if *name != current.name && self.db.sweets().get_by_name(name).await?.is_some() {
                return Err(ServiceError::Conflict(name.clone()));
            }
        }

        let merged = update.apply_to(&current);

        match self.db.sweets().update(&merged).await {
            Ok(()) => {}
            Err(DbError::NotFound { .. }) => return Err(ServiceError::NotFound(id)),
            Err(DbError::UniqueViolation { .. }) => {
                return Err(ServiceError::Conflict(merged.name))
            }
            Err(e) => return Err(e.into()),
        }

        info!(id = id, "Sweet updated");

        // Re-read for the stored updated_at
        self.get(id).await
    }

    /// Deletes a sweet permanently.
    ///
    /// ## Failure Modes
    /// * `NotFound` - unknown id
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        debug!(id = id, "delete sweet");

        match self.db.sweets().delete(id).await {
            Ok(()) => {
                info!(id = id, "Sweet deleted");
                Ok(())
            }
            Err(DbError::NotFound { .. }) => Err(ServiceError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sweetshop_db::DbConfig;

    async fn service() -> CatalogService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        CatalogService::new(db)
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let catalog = service().await;

        let sweet = catalog
            .create(NewSweet::new("Chocolate Bar", 299))
            .await
            .unwrap();

        assert_eq!(sweet.name, "Chocolate Bar");
        assert_eq!(sweet.description, "");
        assert_eq!(sweet.stock, 0);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let catalog = service().await;

        let empty_name = catalog.create(NewSweet::new("", 299)).await.unwrap_err();
        assert!(matches!(empty_name, ServiceError::InvalidInput(_)));

        let negative_price = catalog
            .create(NewSweet::new("Fudge", -1))
            .await
            .unwrap_err();
        assert!(matches!(negative_price, ServiceError::InvalidInput(_)));

        let negative_stock = catalog
            .create(NewSweet::new("Fudge", 100).stock(-5))
            .await
            .unwrap_err();
        assert!(matches!(negative_stock, ServiceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_create_duplicate_name_conflicts_regardless_of_other_fields() {
        let catalog = service().await;

        catalog
            .create(NewSweet::new("Gummy Bears", 199).stock(100))
            .await
            .unwrap();

        let err = catalog
            .create(NewSweet::new("Gummy Bears", 999).description("different").stock(1))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        // Trimmed names collide too
        let err = catalog
            .create(NewSweet::new("  Gummy Bears  ", 150))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_get_and_list() {
        let catalog = service().await;

        let a = catalog.create(NewSweet::new("First", 100)).await.unwrap();
        let b = catalog.create(NewSweet::new("Second", 200)).await.unwrap();

        assert_eq!(catalog.get(a.id).await.unwrap().name, "First");
        assert!(matches!(
            catalog.get(9999).await.unwrap_err(),
            ServiceError::NotFound(9999)
        ));

        let all = catalog.list().await.unwrap();
        let ids: Vec<i64> = all.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[tokio::test]
    async fn test_update_is_partial() {
        let catalog = service().await;

        let sweet = catalog
            .create(
                NewSweet::new("Caramel Candy", 250)
                    .description("Soft caramel sweets")
                    .stock(25),
            )
            .await
            .unwrap();

        let updated = catalog
            .update(
                sweet.id,
                SweetUpdate {
                    price_cents: Some(275),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price_cents, 275);
        assert_eq!(updated.name, "Caramel Candy");
        assert_eq!(updated.description, "Soft caramel sweets");
        assert_eq!(updated.stock, 25);
        assert_eq!(updated.created_at, sweet.created_at);
    }

    #[tokio::test]
    async fn test_update_rename_checks_uniqueness() {
        let catalog = service().await;

        catalog.create(NewSweet::new("Taken", 100)).await.unwrap();
        let sweet = catalog.create(NewSweet::new("Mine", 100)).await.unwrap();

        // Renaming onto another sweet's name conflicts
        let err = catalog
            .update(
                sweet.id,
                SweetUpdate {
                    name: Some("Taken".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        // Re-supplying the current name is a no-op, not a conflict
        let same = catalog
            .update(
                sweet.id,
                SweetUpdate {
                    name: Some("Mine".to_string()),
                    price_cents: Some(150),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(same.name, "Mine");
        assert_eq!(same.price_cents, 150);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let catalog = service().await;

        let err = catalog
            .update(
                9999,
                SweetUpdate {
                    price_cents: Some(100),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(9999)));
    }

    #[tokio::test]
    async fn test_update_rejects_negative_stock_overwrite() {
        let catalog = service().await;
        let sweet = catalog
            .create(NewSweet::new("Fudge", 250).stock(10))
            .await
            .unwrap();

        let err = catalog
            .update(
                sweet.id,
                SweetUpdate {
                    stock: Some(-1),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));

        // Stock untouched
        assert_eq!(catalog.get(sweet.id).await.unwrap().stock, 10);
    }

    #[tokio::test]
    async fn test_delete() {
        let catalog = service().await;
        let sweet = catalog.create(NewSweet::new("Ephemeral", 100)).await.unwrap();

        catalog.delete(sweet.id).await.unwrap();
        assert!(matches!(
            catalog.get(sweet.id).await.unwrap_err(),
            ServiceError::NotFound(_)
        ));
        assert!(matches!(
            catalog.delete(sweet.id).await.unwrap_err(),
            ServiceError::NotFound(_)
        ));
    }
}
