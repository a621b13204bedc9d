//! Restaurant repository trait definition.
//!
//! The port is split into a query side and a command side; anything that
//! implements both is a [`RestaurantRepository`].

use eatery_types::error::RepositoryError;
use eatery_types::pagination::Page;
use eatery_types::restaurant::{Restaurant, RestaurantId, RestaurantPatch, SortField};

use super::SortOrder;

/// Page size used when a search does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size a search may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Schema-sanitized filter, ordering, and window for restaurant listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantQuery {
    /// Case-insensitive substring match on name.
    pub name: Option<String>,
    /// Case-insensitive exact match on cuisine.
    pub cuisine: Option<String>,
    /// Include soft-deleted rows in the result.
    pub include_deleted: bool,
    /// 1-based page index. Ignored by unpaginated `list`.
    pub page: u32,
    /// Page size. Ignored by unpaginated `list`.
    pub size: u32,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl Default for RestaurantQuery {
    fn default() -> Self {
        Self {
            name: None,
            cuisine: None,
            include_deleted: false,
            page: 1,
            size: DEFAULT_PAGE_SIZE,
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
        }
    }
}

impl RestaurantQuery {
    /// Row offset of the requested page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.size)
    }
}

/// Read side of restaurant persistence.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait RestaurantQueryRepository: Send + Sync {
    /// Get a restaurant by ID, regardless of its soft-delete flag.
    /// Visibility is decided by the caller.
    fn get(
        &self,
        id: &RestaurantId,
    ) -> impl std::future::Future<Output = Result<Option<Restaurant>, RepositoryError>> + Send;

    /// List restaurants matching an optional filter, without pagination.
    fn list(
        &self,
        query: Option<RestaurantQuery>,
    ) -> impl std::future::Future<Output = Result<Vec<Restaurant>, RepositoryError>> + Send;

    /// Same filtering as `list`, windowed by `page`/`size`.
    fn paginated_list(
        &self,
        query: Option<RestaurantQuery>,
    ) -> impl std::future::Future<Output = Result<Page<Restaurant>, RepositoryError>> + Send;
}

/// Write side of restaurant persistence.
pub trait RestaurantCommandRepository: Send + Sync {
    /// Persist a fully formed restaurant.
    ///
    /// Fails with `RepositoryError::Conflict` when the store rejects the row
    /// (duplicate id, constraint violation).
    fn create(
        &self,
        restaurant: &Restaurant,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Apply a partial field set. Returns `false` when the id is absent.
    ///
    /// Must accept a patch carrying only `is_deleted`.
    fn update(
        &self,
        id: &RestaurantId,
        patch: &RestaurantPatch,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Permanently remove a restaurant. Returns `false` when the id is absent.
    fn delete(
        &self,
        id: &RestaurantId,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}

/// Full restaurant persistence port.
///
/// Implementations live in eatery-infra (e.g., SqliteRestaurantRepository).
pub trait RestaurantRepository: RestaurantQueryRepository + RestaurantCommandRepository {}

impl<T> RestaurantRepository for T where T: RestaurantQueryRepository + RestaurantCommandRepository {}
