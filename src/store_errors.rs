//! # Store Error Types
//!
//! Errors returned by [`crate::store::MemStorage`] operations.

use thiserror::Error;
use validator::ValidationErrors;

/// Errors raised by store operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// No record of `kind` with this id
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u64 },

    /// The request body failed validation
    #[error("validation error: {0}")]
    Validation(String),
}

impl StoreError {
    pub fn not_found(kind: &'static str, id: u64) -> Self {
        StoreError::NotFound { kind, id }
    }
}

impl From<ValidationErrors> for StoreError {
    fn from(errors: ValidationErrors) -> Self {
        StoreError::Validation(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = StoreError::not_found("recipe", 7);
        assert_eq!(err.to_string(), "recipe 7 not found");
    }

    #[test]
    fn test_validation_message() {
        let err = StoreError::Validation("title: blank".to_string());
        assert_eq!(err.to_string(), "validation error: title: blank");
    }
}
