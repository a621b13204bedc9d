//! SQLite restaurant repository implementation.
//!
//! Implements the restaurant query and command ports from `eatery-core`
//! using sqlx with split read/write pools. Soft-delete visibility is not
//! enforced here: `get` returns tombstoned rows and listings only hide them
//! when the query asks to.

use eatery_core::repository::restaurant::{
    RestaurantCommandRepository, RestaurantQuery, RestaurantQueryRepository,
};
use eatery_types::error::RepositoryError;
use eatery_types::pagination::Page;
use eatery_types::restaurant::{Restaurant, RestaurantId, RestaurantPatch, epoch_millis_now};
use sqlx::sqlite::Sqlite;
use sqlx::{QueryBuilder, Row};

use super::pool::DatabasePool;

/// SQLite-backed implementation of the restaurant repository port.
pub struct SqliteRestaurantRepository {
    pool: DatabasePool,
}

impl SqliteRestaurantRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Restaurant.
struct RestaurantRow {
    id: String,
    name: String,
    description: Option<String>,
    cuisine: Option<String>,
    address: Option<String>,
    phone: Option<String>,
    price_level: Option<i64>,
    created_at: i64,
    updated_at: i64,
    is_deleted: bool,
}

impl RestaurantRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            cuisine: row.try_get("cuisine")?,
            address: row.try_get("address")?,
            phone: row.try_get("phone")?,
            price_level: row.try_get("price_level")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            is_deleted: row.try_get("is_deleted")?,
        })
    }

    fn into_restaurant(self) -> Result<Restaurant, RepositoryError> {
        let id = self
            .id
            .parse::<RestaurantId>()
            .map_err(|e| RepositoryError::Query(format!("invalid restaurant id: {e}")))?;

        let price_level = self
            .price_level
            .map(u8::try_from)
            .transpose()
            .map_err(|e| RepositoryError::Query(format!("invalid price level: {e}")))?;

        Ok(Restaurant {
            id,
            name: self.name,
            description: self.description,
            cuisine: self.cuisine,
            address: self.address,
            phone: self.phone,
            price_level,
            created_at: self.created_at,
            updated_at: self.updated_at,
            is_deleted: self.is_deleted,
        })
    }
}

fn map_rows(rows: &[sqlx::sqlite::SqliteRow]) -> Result<Vec<Restaurant>, RepositoryError> {
    let mut restaurants = Vec::with_capacity(rows.len());
    for row in rows {
        let restaurant_row =
            RestaurantRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
        restaurants.push(restaurant_row.into_restaurant()?);
    }
    Ok(restaurants)
}

/// Append the WHERE clause shared by `list`, `paginated_list`, and the count query.
fn push_filters(builder: &mut QueryBuilder<'_, Sqlite>, query: &RestaurantQuery) {
    builder.push(" WHERE 1 = 1");

    if !query.include_deleted {
        builder.push(" AND is_deleted = 0");
    }
    if let Some(name) = &query.name {
        builder
            .push(" AND instr(lower(name), lower(")
            .push_bind(name.clone())
            .push(")) > 0");
    }
    if let Some(cuisine) = &query.cuisine {
        builder
            .push(" AND lower(cuisine) = lower(")
            .push_bind(cuisine.clone())
            .push(")");
    }
}

/// Append ORDER BY. Column names come from a closed enum, never from input.
/// `id` breaks ties; UUID v7 keeps that in creation order.
fn push_order(builder: &mut QueryBuilder<'_, Sqlite>, query: &RestaurantQuery) {
    builder.push(format!(
        " ORDER BY {} {}, id ASC",
        query.sort_by.column(),
        query.sort_order.keyword()
    ));
}

impl RestaurantQueryRepository for SqliteRestaurantRepository {
    async fn get(&self, id: &RestaurantId) -> Result<Option<Restaurant>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM restaurants WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let restaurant_row = RestaurantRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(restaurant_row.into_restaurant()?))
            }
            None => Ok(None),
        }
    }

    async fn list(&self, query: Option<RestaurantQuery>) -> Result<Vec<Restaurant>, RepositoryError> {
        let query = query.unwrap_or_default();

        let mut builder = QueryBuilder::<Sqlite>::new("SELECT * FROM restaurants");
        push_filters(&mut builder, &query);
        push_order(&mut builder, &query);

        let rows = builder
            .build()
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        map_rows(&rows)
    }

    async fn paginated_list(
        &self,
        query: Option<RestaurantQuery>,
    ) -> Result<Page<Restaurant>, RepositoryError> {
        let query = query.unwrap_or_default();

        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM restaurants");
        push_filters(&mut count, &query);
        let (total,): (i64,) = count
            .build_query_as::<(i64,)>()
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut builder = QueryBuilder::<Sqlite>::new("SELECT * FROM restaurants");
        push_filters(&mut builder, &query);
        push_order(&mut builder, &query);
        builder
            .push(" LIMIT ")
            .push_bind(i64::from(query.size))
            .push(" OFFSET ")
            .push_bind(query.offset() as i64);

        let rows = builder
            .build()
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(Page::new(
            map_rows(&rows)?,
            total.max(0) as u64,
            query.page,
            query.size,
        ))
    }
}

impl RestaurantCommandRepository for SqliteRestaurantRepository {
    async fn create(&self, restaurant: &Restaurant) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO restaurants (id, name, description, cuisine, address, phone, price_level, created_at, updated_at, is_deleted)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(restaurant.id.to_string())
        .bind(&restaurant.name)
        .bind(&restaurant.description)
        .bind(&restaurant.cuisine)
        .bind(&restaurant.address)
        .bind(&restaurant.phone)
        .bind(restaurant.price_level.map(i64::from))
        .bind(restaurant.created_at)
        .bind(restaurant.updated_at)
        .bind(restaurant.is_deleted)
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(done) => Ok(done.rows_affected() > 0),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => Err(
                RepositoryError::Conflict(format!("restaurant '{}' already exists", restaurant.id)),
            ),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("CHECK") => Err(
                RepositoryError::Conflict(format!("constraint violation: {}", db_err.message())),
            ),
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn update(
        &self,
        id: &RestaurantId,
        patch: &RestaurantPatch,
    ) -> Result<bool, RepositoryError> {
        // The store owns `updated_at`; every successful row update refreshes it.
        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE restaurants SET updated_at = ");
        builder.push_bind(epoch_millis_now());

        if let Some(name) = &patch.name {
            builder.push(", name = ").push_bind(name.clone());
        }
        if let Some(description) = &patch.description {
            builder.push(", description = ").push_bind(description.clone());
        }
        if let Some(cuisine) = &patch.cuisine {
            builder.push(", cuisine = ").push_bind(cuisine.clone());
        }
        if let Some(address) = &patch.address {
            builder.push(", address = ").push_bind(address.clone());
        }
        if let Some(phone) = &patch.phone {
            builder.push(", phone = ").push_bind(phone.clone());
        }
        if let Some(price_level) = patch.price_level {
            builder.push(", price_level = ").push_bind(i64::from(price_level));
        }
        if let Some(is_deleted) = patch.is_deleted {
            builder.push(", is_deleted = ").push_bind(is_deleted);
        }

        builder.push(" WHERE id = ").push_bind(id.to_string());

        let result = builder
            .build()
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &RestaurantId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM restaurants WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
