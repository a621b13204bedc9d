//! Validation schemas for restaurant payloads.
//!
//! One function per caller DTO. Each returns the sanitized payload the
//! repository receives, or every violated field constraint at once. Nothing
//! here panics; callers match on the returned `Result`.

use eatery_types::error::ValidationErrors;
use eatery_types::restaurant::{
    CreateRestaurantRequest, NewRestaurant, RestaurantPatch, RestaurantSearch, SortField,
    UpdateRestaurantRequest,
};

use crate::repository::SortOrder;
use crate::repository::restaurant::{MAX_PAGE_SIZE, RestaurantQuery};

const NAME_MAX: usize = 120;
const DESCRIPTION_MAX: usize = 1000;
const CUISINE_MAX: usize = 60;
const ADDRESS_MAX: usize = 255;
const PHONE_MAX: usize = 20;
const PHONE_MIN_DIGITS: usize = 7;
const PRICE_LEVEL_RANGE: std::ops::RangeInclusive<i64> = 1..=4;
const FILTER_MAX: usize = 120;

/// Validate a create payload.
///
/// `name` is required; every other field is optional but checked when set.
pub fn validate_create(payload: CreateRestaurantRequest) -> Result<NewRestaurant, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = match payload.name {
        Some(name) => text(&mut errors, "name", name, NAME_MAX),
        None => {
            errors.push("name", "is required");
            None
        }
    };
    let description = optional_text(&mut errors, "description", payload.description, DESCRIPTION_MAX);
    let cuisine = optional_text(&mut errors, "cuisine", payload.cuisine, CUISINE_MAX);
    let address = optional_text(&mut errors, "address", payload.address, ADDRESS_MAX);
    let phone = payload.phone.and_then(|p| phone(&mut errors, p));
    let price_level = payload.price_level.and_then(|p| price_level(&mut errors, p));

    match name {
        Some(name) if errors.is_empty() => Ok(NewRestaurant {
            name,
            description,
            cuisine,
            address,
            phone,
            price_level,
        }),
        _ => Err(errors),
    }
}

/// Validate a partial update payload. All fields are optional; an empty
/// payload is a valid (no-op) patch.
pub fn validate_update(payload: UpdateRestaurantRequest) -> Result<RestaurantPatch, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let patch = RestaurantPatch {
        name: optional_text(&mut errors, "name", payload.name, NAME_MAX),
        description: optional_text(&mut errors, "description", payload.description, DESCRIPTION_MAX),
        cuisine: optional_text(&mut errors, "cuisine", payload.cuisine, CUISINE_MAX),
        address: optional_text(&mut errors, "address", payload.address, ADDRESS_MAX),
        phone: payload.phone.and_then(|p| phone(&mut errors, p)),
        price_level: payload.price_level.and_then(|p| price_level(&mut errors, p)),
        is_deleted: None,
    };

    errors.into_result(patch)
}

/// Validate search parameters. An absent search stays absent so the store
/// applies its own defaults.
pub fn validate_search(
    payload: Option<RestaurantSearch>,
) -> Result<Option<RestaurantQuery>, ValidationErrors> {
    let Some(payload) = payload else {
        return Ok(None);
    };

    let mut errors = ValidationErrors::new();
    let defaults = RestaurantQuery::default();

    let name = optional_text(&mut errors, "name", payload.name, FILTER_MAX);
    let cuisine = optional_text(&mut errors, "cuisine", payload.cuisine, CUISINE_MAX);

    let page = match payload.page {
        None => defaults.page,
        Some(page) if page < 1 => {
            errors.push("page", "must be at least 1");
            defaults.page
        }
        Some(page) => u32::try_from(page).unwrap_or_else(|_| {
            errors.push("page", format!("must be at most {}", u32::MAX));
            defaults.page
        }),
    };

    let size = match payload.size {
        None => defaults.size,
        Some(size) if (1..=i64::from(MAX_PAGE_SIZE)).contains(&size) => size as u32,
        Some(_) => {
            errors.push("size", format!("must be between 1 and {MAX_PAGE_SIZE}"));
            defaults.size
        }
    };

    let sort_by = match payload.sort_by {
        None => defaults.sort_by,
        Some(raw) => raw.trim().parse::<SortField>().unwrap_or_else(|_| {
            errors.push("sortBy", "must be one of name, cuisine, created_at, updated_at");
            defaults.sort_by
        }),
    };

    let sort_order = match payload.sort_order {
        None => defaults.sort_order,
        Some(raw) => raw.trim().parse::<SortOrder>().unwrap_or_else(|_| {
            errors.push("sortOrder", "must be one of asc, desc");
            defaults.sort_order
        }),
    };

    errors
        .into_result(RestaurantQuery {
            name,
            cuisine,
            include_deleted: payload.include_deleted.unwrap_or(false),
            page,
            size,
            sort_by,
            sort_order,
        })
        .map(Some)
}

fn optional_text(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> Option<String> {
    value.and_then(|v| text(errors, field, v, max))
}

/// Trim and bound a text field. Blank strings are rejected.
fn text(errors: &mut ValidationErrors, field: &'static str, value: String, max: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(field, "must not be blank");
        return None;
    }
    if trimmed.chars().count() > max {
        errors.push(field, format!("must be at most {max} characters"));
        return None;
    }
    Some(trimmed.to_string())
}

fn phone(errors: &mut ValidationErrors, value: String) -> Option<String> {
    let trimmed = value.trim();
    let allowed = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'));
    let digits = trimmed.chars().filter(char::is_ascii_digit).count();

    if !allowed || digits < PHONE_MIN_DIGITS || trimmed.len() > PHONE_MAX {
        errors.push(
            "phone",
            format!(
                "must be at most {PHONE_MAX} characters of digits, spaces, '+', '-', '(' or ')' with at least {PHONE_MIN_DIGITS} digits"
            ),
        );
        return None;
    }
    Some(trimmed.to_string())
}

fn price_level(errors: &mut ValidationErrors, value: i64) -> Option<u8> {
    if !PRICE_LEVEL_RANGE.contains(&value) {
        errors.push(
            "priceLevel",
            format!(
                "must be between {} and {}",
                PRICE_LEVEL_RANGE.start(),
                PRICE_LEVEL_RANGE.end()
            ),
        );
        return None;
    }
    Some(value as u8)
}
