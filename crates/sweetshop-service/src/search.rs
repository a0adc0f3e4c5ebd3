//! # Search Service
//!
//! Multi-criteria catalog search with pagination.
//!
//! ## Pagination Math
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  page   1-based; defaults to 1                                          │
//! │  limit  page size; defaults to 10, clamped to 100                       │
//! │                                                                         │
//! │  slice        rows [(page-1)*limit, page*limit)                         │
//! │  total        count of ALL filtered matches, not just the page          │
//! │  total_pages  ceil(total / limit)                                       │
//! │                                                                         │
//! │  A page beyond total_pages returns an empty data slice with            │
//! │  total/total_pages still reflecting the whole filtered set.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ServiceResult;
use sweetshop_core::validation::{validate_limit, validate_page, validate_price_cents, validate_search_query};
use sweetshop_core::{SearchFilter, Sweet, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use sweetshop_db::Database;

// =============================================================================
// Response Envelope
// =============================================================================

/// One page of search results plus pagination bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub data: Vec<Sweet>,
    pub pagination: Pagination,
}

/// Pagination bookkeeping for a search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Count of all filtered matches, not just this page.
    pub total: i64,
    /// The 1-based page this response carries.
    pub page: i64,
    /// ceil(total / limit).
    pub total_pages: i64,
}

/// Number of pages needed for `total` rows at `limit` rows per page.
fn total_pages(total: i64, limit: i64) -> i64 {
    (total + limit - 1) / limit
}

// =============================================================================
// Search Service
// =============================================================================

/// Catalog search. Unauthenticated by contract: anyone may browse.
#[derive(Debug, Clone)]
pub struct SearchService {
    db: Database,
}

impl SearchService {
    /// Creates a new SearchService over the given database handle.
    pub fn new(db: Database) -> Self {
        SearchService { db }
    }

    /// Searches the catalog.
    ///
    /// All filter criteria are optional and combine with AND; with none
    /// set, the whole catalog is returned (paginated). Text matches
    /// case-insensitively against name OR description; price bounds are
    /// inclusive; the in-stock flag restricts to `stock > 0`.
    ///
    /// ## Failure Modes
    /// * `InvalidInput` - over-long query, negative price bound,
    ///   non-positive page or limit
    pub async fn search(
        &self,
        filter: SearchFilter,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> ServiceResult<SearchResponse> {
        let page = match page {
            Some(p) => {
                validate_page(p)?;
                p
            }
            None => 1,
        };
        let limit = match limit {
            Some(l) => {
                validate_limit(l)?;
                l.min(MAX_PAGE_SIZE)
            }
            None => DEFAULT_PAGE_SIZE,
        };

        if let Some(query) = &filter.query {
            validate_search_query(query)?;
        }
        if let Some(min) = filter.min_price {
            validate_price_cents(min.cents())?;
        }
        if let Some(max) = filter.max_price {
            validate_price_cents(max.cents())?;
        }

        debug!(?filter, page = page, limit = limit, "search sweets");

        let repo = self.db.search();
        let total = repo.count(&filter).await?;
        let data = repo.search(&filter, limit, (page - 1) * limit).await?;

        Ok(SearchResponse {
            data,
            pagination: Pagination {
                total,
                page,
                total_pages: total_pages(total, limit),
            },
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use sweetshop_core::{Money, NewSweet};
    use sweetshop_db::DbConfig;

    /// The canonical five-sweet test catalog.
    async fn seeded() -> SearchService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let rows = [
            ("Chocolate Bar", "Milk chocolate bar", 299, 50),
            ("Dark Chocolate", "Rich dark chocolate", 399, 30),
            ("Gummy Bears", "Fruity gummy candies", 199, 100),
            ("Caramel Candy", "Soft caramel sweets", 250, 25),
            ("Mint Chocolate", "Chocolate with mint flavor", 350, 40),
        ];
        for (name, description, price_cents, stock) in rows {
            db.sweets()
                .insert(
                    &NewSweet::new(name, price_cents)
                        .description(description)
                        .stock(stock),
                )
                .await
                .unwrap();
        }
        SearchService::new(db)
    }

    fn names(sweets: &[Sweet]) -> Vec<&str> {
        let mut names: Vec<&str> = sweets.iter().map(|s| s.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    #[tokio::test]
    async fn test_query_matches_name_and_description() {
        let search = seeded().await;

        let response = search
            .search(SearchFilter::new().query("chocolate"), None, None)
            .await
            .unwrap();

        assert_eq!(
            names(&response.data),
            vec!["Chocolate Bar", "Dark Chocolate", "Mint Chocolate"]
        );
        assert_eq!(response.pagination.total, 3);
    }

    #[tokio::test]
    async fn test_price_band() {
        let search = seeded().await;

        let response = search
            .search(
                SearchFilter::new()
                    .min_price(Money::from_cents(300))
                    .max_price(Money::from_cents(400)),
                None,
                None,
            )
            .await
            .unwrap();

        assert_eq!(names(&response.data), vec!["Dark Chocolate", "Mint Chocolate"]);
    }

    #[tokio::test]
    async fn test_no_filters_returns_whole_catalog() {
        let search = seeded().await;

        let response = search.search(SearchFilter::new(), None, None).await.unwrap();
        assert_eq!(response.data.len(), 5);
        assert_eq!(
            response.pagination,
            Pagination {
                total: 5,
                page: 1,
                total_pages: 1
            }
        );
    }

    #[tokio::test]
    async fn test_pagination_envelope() {
        let search = seeded().await;

        let response = search
            .search(SearchFilter::new().query("chocolate"), Some(1), Some(2))
            .await
            .unwrap();

        assert_eq!(response.data.len(), 2);
        assert_eq!(
            response.pagination,
            Pagination {
                total: 3,
                page: 1,
                total_pages: 2
            }
        );

        // The last page carries the remainder
        let last = search
            .search(SearchFilter::new().query("chocolate"), Some(2), Some(2))
            .await
            .unwrap();
        assert_eq!(last.data.len(), 1);
        assert_eq!(last.pagination.total, 3);
    }

    #[tokio::test]
    async fn test_page_beyond_total_pages_is_empty_not_error() {
        let search = seeded().await;

        let response = search
            .search(SearchFilter::new().query("chocolate"), Some(7), Some(2))
            .await
            .unwrap();

        assert!(response.data.is_empty());
        assert_eq!(
            response.pagination,
            Pagination {
                total: 3,
                page: 7,
                total_pages: 2
            }
        );
    }

    #[tokio::test]
    async fn test_no_matches_has_zero_pages() {
        let search = seeded().await;

        let response = search
            .search(SearchFilter::new().query("nonexistent"), None, None)
            .await
            .unwrap();

        assert!(response.data.is_empty());
        assert_eq!(
            response.pagination,
            Pagination {
                total: 0,
                page: 1,
                total_pages: 0
            }
        );
    }

    #[tokio::test]
    async fn test_invalid_inputs() {
        let search = seeded().await;

        for (page, limit) in [(Some(0), None), (Some(-1), None), (None, Some(0)), (None, Some(-5))] {
            let err = search
                .search(SearchFilter::new(), page, limit)
                .await
                .unwrap_err();
            assert!(matches!(err, ServiceError::InvalidInput(_)));
        }

        let err = search
            .search(SearchFilter::new().min_price(Money::from_cents(-1)), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));

        let err = search
            .search(SearchFilter::new().query("q".repeat(101)), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_oversize_limit_is_clamped_not_rejected() {
        let search = seeded().await;

        let response = search
            .search(SearchFilter::new(), None, Some(10_000))
            .await
            .unwrap();

        // All five rows fit either way; the envelope reflects the clamp
        assert_eq!(response.data.len(), 5);
        assert_eq!(response.pagination.total_pages, 1);
    }

    #[tokio::test]
    async fn test_response_wire_format_is_camel_case() {
        let search = seeded().await;

        let response = search
            .search(SearchFilter::new().query("chocolate"), Some(1), Some(2))
            .await
            .unwrap();
        let json = serde_json::to_value(&response).unwrap();

        assert!(json["data"].is_array());
        assert_eq!(json["pagination"]["total"], 3);
        assert_eq!(json["pagination"]["page"], 1);
        assert_eq!(json["pagination"]["totalPages"], 2);
    }

    mod pagination_math {
        use super::super::total_pages;
        use proptest::prelude::*;

        proptest! {
            /// Property: total_pages is exactly ceil(total / limit).
            #[test]
            fn total_pages_is_ceiling_division(total in 0i64..100_000, limit in 1i64..1_000) {
                let pages = total_pages(total, limit);

                // Enough pages to hold every row
                prop_assert!(pages * limit >= total);
                // And not one page more than needed
                if total > 0 {
                    prop_assert!((pages - 1) * limit < total);
                } else {
                    prop_assert_eq!(pages, 0);
                }
            }
        }
    }
}
