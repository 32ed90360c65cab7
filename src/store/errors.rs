//! # Store Errors
//!
//! Error taxonomy for the employee store.
//!
//! Display strings are user-facing: the route layer surfaces them verbatim
//! in `{"error": ...}` bodies, except for `Unavailable`, whose detail is
//! logged and replaced with an opaque message at the HTTP boundary.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Employee store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    // ==================
    // User-correctable
    // ==================
    /// One or more field constraints violated; one message per field
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    /// Another record already holds this email
    #[error("Email already exists")]
    DuplicateEmail,

    /// No record at this id
    #[error("Employee not found")]
    NotFound,

    /// Id is not structurally valid for the store
    #[error("Invalid employee ID")]
    InvalidId(String),

    // ==================
    // Infrastructure
    // ==================
    /// Backing store cannot be reached or misbehaved
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// True for failures the caller can correct by changing the request
    pub fn is_user_error(&self) -> bool {
        !matches!(self, StoreError::Unavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_joined() {
        let err = StoreError::Validation(vec![
            "Name is required".to_string(),
            "Email is required".to_string(),
        ]);
        assert_eq!(err.to_string(), "Name is required, Email is required");
    }

    #[test]
    fn test_user_error_classification() {
        assert!(StoreError::NotFound.is_user_error());
        assert!(StoreError::DuplicateEmail.is_user_error());
        assert!(StoreError::InvalidId("abc".to_string()).is_user_error());
        assert!(!StoreError::Unavailable("lock poisoned".to_string()).is_user_error());
    }
}
