use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Unique identifier for a restaurant, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RestaurantId(pub Uuid);

impl RestaurantId {
    /// Create a new RestaurantId using UUID v7 (time-sortable, guaranteed ordering).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create a RestaurantId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for RestaurantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RestaurantId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A restaurant in the catalog.
///
/// Timestamps are Unix epoch milliseconds. `is_deleted` is the soft-delete
/// tombstone: a flagged restaurant stays in storage but is treated as absent
/// by every service lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub description: Option<String>,
    /// Free-form cuisine label ("italian", "ramen", ...).
    pub cuisine: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    /// 1 (cheap) to 4 (expensive).
    pub price_level: Option<u8>,
    pub created_at: i64,
    pub updated_at: i64,
    pub is_deleted: bool,
}

impl Restaurant {
    /// Returns whether this restaurant should be visible to lookups.
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}

/// Raw create payload as supplied by a caller.
///
/// Every field is optional at this stage so the create schema can report
/// all missing and malformed fields at once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurantRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cuisine: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub price_level: Option<i64>,
}

/// Raw partial update payload as supplied by a caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRestaurantRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cuisine: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub price_level: Option<i64>,
}

/// Schema-sanitized create payload. `name` is guaranteed non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRestaurant {
    pub name: String,
    pub description: Option<String>,
    pub cuisine: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub price_level: Option<u8>,
}

/// Partial field set handed to the repository on update.
///
/// `None` leaves the stored value untouched. `is_deleted` is never filled
/// from caller input; only the soft-delete path sets it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
}

impl RestaurantPatch {
    /// Patch that only flips the soft-delete flag on.
    pub fn soft_delete() -> Self {
        Self {
            is_deleted: Some(true),
            ..Default::default()
        }
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Apply this patch onto a restaurant in place.
    ///
    /// Used by in-memory stores; SQL adapters translate the patch to a
    /// column list instead.
    pub fn apply_to(&self, restaurant: &mut Restaurant) {
        if let Some(name) = &self.name {
            restaurant.name = name.clone();
        }
        if let Some(description) = &self.description {
            restaurant.description = Some(description.clone());
        }
        if let Some(cuisine) = &self.cuisine {
            restaurant.cuisine = Some(cuisine.clone());
        }
        if let Some(address) = &self.address {
            restaurant.address = Some(address.clone());
        }
        if let Some(phone) = &self.phone {
            restaurant.phone = Some(phone.clone());
        }
        if let Some(price_level) = self.price_level {
            restaurant.price_level = Some(price_level);
        }
        if let Some(is_deleted) = self.is_deleted {
            restaurant.is_deleted = is_deleted;
        }
    }
}

/// Raw search/listing parameters as supplied by a caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSearch {
    /// Case-insensitive substring match on name.
    pub name: Option<String>,
    /// Case-insensitive exact match on cuisine.
    pub cuisine: Option<String>,
    pub include_deleted: Option<bool>,
    /// 1-based page index.
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Fields a restaurant listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    Cuisine,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// Column name in the `restaurants` table.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Cuisine => "cuisine",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(SortField::Name),
            "cuisine" => Ok(SortField::Cuisine),
            "created_at" | "createdat" => Ok(SortField::CreatedAt),
            "updated_at" | "updatedat" => Ok(SortField::UpdatedAt),
            other => Err(format!("invalid sort field: '{other}'")),
        }
    }
}

impl Default for SortField {
    fn default() -> Self {
        SortField::CreatedAt
    }
}

/// Current wall-clock time as Unix epoch milliseconds.
pub fn epoch_millis_now() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
