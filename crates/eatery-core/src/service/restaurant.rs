//! Restaurant catalog service.
//!
//! Every operation validates its payload against the matching schema before
//! touching the repository. Lookups by id go through a shared guard that
//! treats soft-deleted restaurants exactly like missing ones, so `get`,
//! `update`, and both delete flavours answer `NotFound` for a tombstoned
//! restaurant.

use eatery_types::error::RestaurantError;
use eatery_types::pagination::Page;
use eatery_types::restaurant::{
    CreateRestaurantRequest, Restaurant, RestaurantId, RestaurantPatch, RestaurantSearch,
    UpdateRestaurantRequest, epoch_millis_now,
};
use tracing::{debug, info, warn};

use crate::repository::restaurant::RestaurantRepository;
use crate::schema;

/// Service orchestrating the restaurant lifecycle.
///
/// Generic over the repository trait to maintain clean architecture --
/// eatery-core never depends on eatery-infra.
pub struct RestaurantService<R: RestaurantRepository> {
    repo: R,
}

impl<R: RestaurantRepository> RestaurantService<R> {
    /// Create a new RestaurantService backed by `repo`.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Access the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Get an active restaurant by ID.
    pub async fn get(&self, id: &RestaurantId) -> Result<Restaurant, RestaurantError> {
        self.valid_restaurant(id).await
    }

    /// List restaurants matching an optional search, without pagination.
    pub async fn list(
        &self,
        query: Option<RestaurantSearch>,
    ) -> Result<Vec<Restaurant>, RestaurantError> {
        let query = match schema::validate_search(query) {
            Ok(query) => query,
            Err(errors) => {
                debug!(%errors, "Rejected restaurant search");
                return Err(RestaurantError::BadRequest(errors));
            }
        };

        Ok(self.repo.list(query).await?)
    }

    /// List one page of restaurants matching an optional search.
    pub async fn paginated_list(
        &self,
        query: Option<RestaurantSearch>,
    ) -> Result<Page<Restaurant>, RestaurantError> {
        let query = match schema::validate_search(query) {
            Ok(query) => query,
            Err(errors) => {
                debug!(%errors, "Rejected restaurant search");
                return Err(RestaurantError::BadRequest(errors));
            }
        };

        Ok(self.repo.paginated_list(query).await?)
    }

    /// Create a restaurant and return its newly assigned ID.
    ///
    /// The ID is a fresh UUID v7 and both timestamps carry the same instant.
    /// Uniqueness is left to the store's own constraint.
    pub async fn create(
        &self,
        payload: CreateRestaurantRequest,
    ) -> Result<RestaurantId, RestaurantError> {
        let data = match schema::validate_create(payload) {
            Ok(data) => data,
            Err(errors) => {
                debug!(%errors, "Rejected restaurant create payload");
                return Err(RestaurantError::BadRequest(errors));
            }
        };

        let id = RestaurantId::new();
        let now = epoch_millis_now();
        let restaurant = Restaurant {
            id,
            name: data.name,
            description: data.description,
            cuisine: data.cuisine,
            address: data.address,
            phone: data.phone,
            price_level: data.price_level,
            created_at: now,
            updated_at: now,
            is_deleted: false,
        };

        if !self.repo.create(&restaurant).await? {
            warn!(restaurant_id = %id, "Store reported no row written for new restaurant");
        }

        info!(restaurant_id = %id, name = %restaurant.name, "Restaurant created");
        Ok(id)
    }

    /// Apply a partial update to an active restaurant.
    ///
    /// The payload is validated before any lookup, so an invalid payload
    /// never reaches the repository. `updated_at` is left to the store.
    pub async fn update(
        &self,
        id: &RestaurantId,
        payload: UpdateRestaurantRequest,
    ) -> Result<bool, RestaurantError> {
        let patch = match schema::validate_update(payload) {
            Ok(patch) => patch,
            Err(errors) => {
                debug!(restaurant_id = %id, %errors, "Rejected restaurant update payload");
                return Err(RestaurantError::BadRequest(errors));
            }
        };

        self.valid_restaurant(id).await?;

        let updated = self.repo.update(id, &patch).await?;
        info!(restaurant_id = %id, updated, "Restaurant updated");
        Ok(updated)
    }

    /// Delete an active restaurant.
    ///
    /// Soft by default: the repository receives an `update` that only sets
    /// `is_deleted`. With `hard_delete` the row is removed permanently. A
    /// restaurant that is already soft-deleted cannot be hard-deleted here;
    /// the guard reports it as not found.
    pub async fn delete(
        &self,
        id: &RestaurantId,
        hard_delete: bool,
    ) -> Result<bool, RestaurantError> {
        self.valid_restaurant(id).await?;

        if hard_delete {
            let deleted = self.repo.delete(id).await?;
            info!(restaurant_id = %id, deleted, "Restaurant hard-deleted");
            return Ok(deleted);
        }

        let deleted = self.repo.update(id, &RestaurantPatch::soft_delete()).await?;
        info!(restaurant_id = %id, deleted, "Restaurant soft-deleted");
        Ok(deleted)
    }

    /// Shorthand for `delete(id, false)`.
    pub async fn soft_delete(&self, id: &RestaurantId) -> Result<bool, RestaurantError> {
        self.delete(id, false).await
    }

    /// Fetch a restaurant that exists and is not soft-deleted.
    async fn valid_restaurant(&self, id: &RestaurantId) -> Result<Restaurant, RestaurantError> {
        match self.repo.get(id).await? {
            Some(restaurant) if restaurant.is_active() => Ok(restaurant),
            Some(_) => {
                debug!(restaurant_id = %id, "Restaurant is soft-deleted");
                Err(RestaurantError::NotFound(*id))
            }
            None => {
                debug!(restaurant_id = %id, "Restaurant does not exist");
                Err(RestaurantError::NotFound(*id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::restaurant::{
        RestaurantCommandRepository, RestaurantQuery, RestaurantQueryRepository,
    };
    use eatery_types::error::RepositoryError;
    use std::collections::{BTreeMap, HashSet};
    use std::sync::Mutex;

    // --- Recording in-memory repository ---

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Get(RestaurantId),
        List(Option<RestaurantQuery>),
        PaginatedList(Option<RestaurantQuery>),
        Create(RestaurantId),
        Update(RestaurantId, RestaurantPatch),
        Delete(RestaurantId),
    }

    #[derive(Default)]
    struct MockRepository {
        rows: Mutex<BTreeMap<RestaurantId, Restaurant>>,
        calls: Mutex<Vec<Call>>,
        fail_writes: bool,
    }

    impl MockRepository {
        fn failing() -> Self {
            Self {
                fail_writes: true,
                ..Default::default()
            }
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn clear_calls(&self) {
            self.calls.lock().unwrap().clear();
        }

        fn stored(&self, id: &RestaurantId) -> Option<Restaurant> {
            self.rows.lock().unwrap().get(id).cloned()
        }

        fn matching(&self, query: &Option<RestaurantQuery>) -> Vec<Restaurant> {
            let include_deleted = query.as_ref().is_some_and(|q| q.include_deleted);
            self.rows
                .lock()
                .unwrap()
                .values()
                .filter(|r| include_deleted || r.is_active())
                .cloned()
                .collect()
        }
    }

    impl RestaurantQueryRepository for MockRepository {
        async fn get(&self, id: &RestaurantId) -> Result<Option<Restaurant>, RepositoryError> {
            self.record(Call::Get(*id));
            Ok(self.stored(id))
        }

        async fn list(
            &self,
            query: Option<RestaurantQuery>,
        ) -> Result<Vec<Restaurant>, RepositoryError> {
            let rows = self.matching(&query);
            self.record(Call::List(query));
            Ok(rows)
        }

        async fn paginated_list(
            &self,
            query: Option<RestaurantQuery>,
        ) -> Result<Page<Restaurant>, RepositoryError> {
            let q = query.clone().unwrap_or_default();
            let rows = self.matching(&query);
            let total = rows.len() as u64;
            let items = rows
                .into_iter()
                .skip(q.offset() as usize)
                .take(q.size as usize)
                .collect();
            self.record(Call::PaginatedList(query));
            Ok(Page::new(items, total, q.page, q.size))
        }
    }

    impl RestaurantCommandRepository for MockRepository {
        async fn create(&self, restaurant: &Restaurant) -> Result<bool, RepositoryError> {
            self.record(Call::Create(restaurant.id));
            if self.fail_writes {
                return Err(RepositoryError::Connection);
            }
            let mut rows = self.rows.lock().unwrap();
            if rows.contains_key(&restaurant.id) {
                return Err(RepositoryError::Conflict(format!(
                    "restaurant '{}' already exists",
                    restaurant.id
                )));
            }
            rows.insert(restaurant.id, restaurant.clone());
            Ok(true)
        }

        async fn update(
            &self,
            id: &RestaurantId,
            patch: &RestaurantPatch,
        ) -> Result<bool, RepositoryError> {
            self.record(Call::Update(*id, patch.clone()));
            if self.fail_writes {
                return Err(RepositoryError::Connection);
            }
            match self.rows.lock().unwrap().get_mut(id) {
                Some(restaurant) => {
                    patch.apply_to(restaurant);
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn delete(&self, id: &RestaurantId) -> Result<bool, RepositoryError> {
            self.record(Call::Delete(*id));
            if self.fail_writes {
                return Err(RepositoryError::Connection);
            }
            Ok(self.rows.lock().unwrap().remove(id).is_some())
        }
    }

    fn service() -> RestaurantService<MockRepository> {
        RestaurantService::new(MockRepository::default())
    }

    fn named(name: &str) -> CreateRestaurantRequest {
        CreateRestaurantRequest {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    /// Seed a row directly in the store, bypassing the service.
    fn seed(service: &RestaurantService<MockRepository>, name: &str, is_deleted: bool) -> RestaurantId {
        let id = RestaurantId::new();
        let restaurant = Restaurant {
            id,
            name: name.to_string(),
            description: None,
            cuisine: None,
            address: None,
            phone: None,
            price_level: None,
            created_at: 1_700_000_000_000,
            updated_at: 1_700_000_000_000,
            is_deleted,
        };
        service.repository().rows.lock().unwrap().insert(id, restaurant);
        id
    }

    // --- get ---

    #[tokio::test]
    async fn test_get_absent_is_not_found() {
        let service = service();
        let id = RestaurantId::new();

        let err = service.get(&id).await.unwrap_err();
        assert!(matches!(err, RestaurantError::NotFound(missing) if missing == id));
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[tokio::test]
    async fn test_get_soft_deleted_is_not_found() {
        let service = service();
        let id = seed(&service, "Gone Grill", true);

        let err = service.get(&id).await.unwrap_err();
        assert!(matches!(err, RestaurantError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_active_returns_entity() {
        let service = service();
        let id = seed(&service, "Open Oven", false);

        let restaurant = service.get(&id).await.unwrap();
        assert_eq!(restaurant.name, "Open Oven");
    }

    // --- create ---

    #[tokio::test]
    async fn test_create_stamps_id_and_timestamps() {
        let service = service();

        let id = service.create(named("Pasta House")).await.unwrap();

        let stored = service.repository().stored(&id).unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.name, "Pasta House");
        assert_eq!(stored.created_at, stored.updated_at);
        assert!(stored.created_at > 0);
        assert!(!stored.is_deleted);
        assert_eq!(service.repository().calls(), vec![Call::Create(id)]);
    }

    #[tokio::test]
    async fn test_create_issues_fresh_ids() {
        let service = service();
        let mut seen = HashSet::new();

        for i in 0..50 {
            let id = service.create(named(&format!("Diner {i}"))).await.unwrap();
            assert!(seen.insert(id), "duplicate id {id}");
        }
    }

    #[tokio::test]
    async fn test_create_invalid_payload_writes_nothing() {
        let service = service();

        let err = service
            .create(CreateRestaurantRequest {
                name: None,
                price_level: Some(7),
                phone: Some("nope".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        match err {
            RestaurantError::BadRequest(errors) => {
                assert_eq!(errors.len(), 3);
                assert!(errors.has_field("name"));
                assert!(errors.has_field("priceLevel"));
                assert!(errors.has_field("phone"));
            }
            other => panic!("expected BadRequest, got {other:?}"),
        }
        assert!(service.repository().calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_propagates_store_error_unmodified() {
        let service = RestaurantService::new(MockRepository::failing());

        let err = service.create(named("Pasta House")).await.unwrap_err();
        assert!(matches!(
            err,
            RestaurantError::Repository(RepositoryError::Connection)
        ));
    }

    // --- list / paginated_list ---

    #[tokio::test]
    async fn test_list_passes_validated_query_through() {
        let service = service();
        seed(&service, "A", false);
        seed(&service, "B", true);

        let rows = service
            .list(Some(RestaurantSearch {
                sort_order: Some("asc".to_string()),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);

        let calls = service.repository().calls();
        let [Call::List(Some(query))] = calls.as_slice() else {
            panic!("unexpected calls: {calls:?}");
        };
        assert_eq!(query.sort_order, crate::repository::SortOrder::Asc);
    }

    #[tokio::test]
    async fn test_list_without_query_passes_none() {
        let service = service();

        service.list(None).await.unwrap();
        assert_eq!(service.repository().calls(), vec![Call::List(None)]);
    }

    #[tokio::test]
    async fn test_list_invalid_search_is_bad_request() {
        let service = service();

        let err = service
            .list(Some(RestaurantSearch {
                page: Some(0),
                ..Default::default()
            }))
            .await
            .unwrap_err();
        assert!(matches!(err, RestaurantError::BadRequest(_)));
        assert!(service.repository().calls().is_empty());
    }

    #[tokio::test]
    async fn test_paginated_list_windows_results() {
        let service = service();
        for i in 0..5 {
            seed(&service, &format!("Spot {i}"), false);
        }

        let page = service
            .paginated_list(Some(RestaurantSearch {
                page: Some(2),
                size: Some(2),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.page, 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_pages(), 3);
    }

    #[tokio::test]
    async fn test_paginated_list_invalid_search_is_bad_request() {
        let service = service();

        let err = service
            .paginated_list(Some(RestaurantSearch {
                size: Some(0),
                ..Default::default()
            }))
            .await
            .unwrap_err();
        assert!(matches!(err, RestaurantError::BadRequest(e) if e.has_field("size")));
        assert!(service.repository().calls().is_empty());
    }

    // --- update ---

    #[tokio::test]
    async fn test_update_active_delegates_patch() {
        let service = service();
        let id = seed(&service, "Pasta House", false);

        let updated = service
            .update(
                &id,
                UpdateRestaurantRequest {
                    cuisine: Some("italian".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated);

        let expected = RestaurantPatch {
            cuisine: Some("italian".to_string()),
            ..Default::default()
        };
        assert_eq!(
            service.repository().calls(),
            vec![Call::Get(id), Call::Update(id, expected)]
        );
        assert_eq!(
            service.repository().stored(&id).unwrap().cuisine.as_deref(),
            Some("italian")
        );
    }

    #[tokio::test]
    async fn test_update_does_not_touch_updated_at() {
        let service = service();
        let id = seed(&service, "Pasta House", false);

        service
            .update(
                &id,
                UpdateRestaurantRequest {
                    name: Some("Pasta Palace".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let stored = service.repository().stored(&id).unwrap();
        assert_eq!(stored.updated_at, 1_700_000_000_000);
    }

    #[tokio::test]
    async fn test_update_invalid_payload_skips_repository() {
        let service = service();
        let id = seed(&service, "Pasta House", false);

        let err = service
            .update(
                &id,
                UpdateRestaurantRequest {
                    name: Some("   ".to_string()),
                    price_level: Some(5),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, RestaurantError::BadRequest(ref e) if e.len() == 2));
        assert!(service.repository().calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_invalid_payload_wins_over_missing_id() {
        let service = service();

        let err = service
            .update(
                &RestaurantId::new(),
                UpdateRestaurantRequest {
                    price_level: Some(0),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RestaurantError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_update_absent_is_not_found() {
        let service = service();

        let err = service
            .update(&RestaurantId::new(), UpdateRestaurantRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RestaurantError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_soft_deleted_is_not_found() {
        let service = service();
        let id = seed(&service, "Gone Grill", true);

        let err = service
            .update(
                &id,
                UpdateRestaurantRequest {
                    name: Some("Back Again".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RestaurantError::NotFound(_)));
        assert_eq!(service.repository().calls(), vec![Call::Get(id)]);
    }

    // --- delete ---

    #[tokio::test]
    async fn test_soft_delete_issues_single_flag_update() {
        let service = service();
        let id = seed(&service, "Pasta House", false);

        assert!(service.delete(&id, false).await.unwrap());

        assert_eq!(
            service.repository().calls(),
            vec![Call::Get(id), Call::Update(id, RestaurantPatch::soft_delete())]
        );
        let stored = service.repository().stored(&id).unwrap();
        assert!(stored.is_deleted);
        assert_eq!(stored.name, "Pasta House");
    }

    #[tokio::test]
    async fn test_hard_delete_issues_single_delete() {
        let service = service();
        let id = seed(&service, "Pasta House", false);

        assert!(service.delete(&id, true).await.unwrap());

        assert_eq!(
            service.repository().calls(),
            vec![Call::Get(id), Call::Delete(id)]
        );
        assert!(service.repository().stored(&id).is_none());
    }

    #[tokio::test]
    async fn test_delete_absent_is_not_found() {
        let service = service();

        for hard in [false, true] {
            let err = service.delete(&RestaurantId::new(), hard).await.unwrap_err();
            assert!(matches!(err, RestaurantError::NotFound(_)));
        }
    }

    #[tokio::test]
    async fn test_delete_soft_deleted_is_not_found_either_way() {
        let service = service();
        let id = seed(&service, "Gone Grill", true);

        for hard in [false, true] {
            let err = service.delete(&id, hard).await.unwrap_err();
            assert!(matches!(err, RestaurantError::NotFound(_)));
        }
        assert!(
            service
                .repository()
                .calls()
                .iter()
                .all(|call| matches!(call, Call::Get(_)))
        );
        assert!(service.repository().stored(&id).is_some());
    }

    #[tokio::test]
    async fn test_delete_propagates_store_error() {
        let service = RestaurantService::new(MockRepository::failing());
        let id = seed(&service, "Pasta House", false);

        let err = service.soft_delete(&id).await.unwrap_err();
        assert!(matches!(
            err,
            RestaurantError::Repository(RepositoryError::Connection)
        ));
    }

    // --- end-to-end lifecycle ---

    #[tokio::test]
    async fn test_lifecycle_create_get_soft_delete_then_hard_delete_blocked() {
        let service = service();

        let id = service.create(named("Pasta House")).await.unwrap();

        let fetched = service.get(&id).await.unwrap();
        assert_eq!(fetched.name, "Pasta House");
        assert!(!fetched.is_deleted);

        assert!(service.delete(&id, false).await.unwrap());

        let err = service.get(&id).await.unwrap_err();
        assert!(matches!(err, RestaurantError::NotFound(_)));

        service.repository().clear_calls();
        let err = service.delete(&id, true).await.unwrap_err();
        assert!(matches!(err, RestaurantError::NotFound(_)));
        assert_eq!(service.repository().calls(), vec![Call::Get(id)]);
        assert!(service.repository().stored(&id).unwrap().is_deleted);
    }
}
