use std::fmt;

use thiserror::Error;

use crate::restaurant::RestaurantId;

/// A single failed field constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Field name as the caller spelled it (camelCase).
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every field constraint a payload violated, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldViolation::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    /// Whether `field` has at least one violation.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    /// `Ok(value)` when nothing was collected, otherwise `Err(self)`.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Errors surfaced by restaurant service operations.
#[derive(Debug, Error)]
pub enum RestaurantError {
    #[error("bad request: {0}")]
    BadRequest(ValidationErrors),

    #[error("restaurant with id {0} not found")]
    NotFound(RestaurantId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors from repository operations (used by trait definitions in eatery-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_display_lists_every_field() {
        let mut errors = ValidationErrors::new();
        errors.push("name", "is required");
        errors.push("priceLevel", "must be between 1 and 4");

        assert_eq!(
            errors.to_string(),
            "name: is required; priceLevel: must be between 1 and 4"
        );
        assert_eq!(errors.len(), 2);
        assert!(errors.has_field("priceLevel"));
        assert!(!errors.has_field("phone"));
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ValidationErrors::new().into_result(7), Ok(7));

        let mut errors = ValidationErrors::new();
        errors.push("size", "must be at least 1");
        assert!(errors.into_result(7).is_err());
    }

    #[test]
    fn test_restaurant_error_display() {
        let id = RestaurantId::new();
        let err = RestaurantError::NotFound(id);
        assert_eq!(err.to_string(), format!("restaurant with id {id} not found"));

        let mut errors = ValidationErrors::new();
        errors.push("name", "is required");
        let err = RestaurantError::BadRequest(errors);
        assert_eq!(err.to_string(), "bad request: name: is required");
    }

    #[test]
    fn test_repository_error_passes_through_unchanged() {
        let err: RestaurantError = RepositoryError::Query("disk I/O error".to_string()).into();
        assert_eq!(err.to_string(), "query error: disk I/O error");
        assert!(matches!(err, RestaurantError::Repository(RepositoryError::Query(_))));
    }
}
