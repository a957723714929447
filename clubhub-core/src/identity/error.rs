//! Error types for account and session operations.

use thiserror::Error;

use crate::store::StoreError;

/// Error type for identity operations.
#[derive(Error, Debug)]
pub enum IdentityError {
    /// Registration or profile update with a username already in use.
    #[error("Username already taken: {0}")]
    DuplicateUsername(String),

    /// Login failed. Unknown usernames and wrong secrets look the same.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// No account with the given id.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Underlying store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type alias for identity operations.
pub type Result<T> = std::result::Result<T, IdentityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_username_display() {
        let err = IdentityError::DuplicateUsername("alice".to_string());
        assert_eq!(err.to_string(), "Username already taken: alice");
    }

    #[test]
    fn invalid_credentials_does_not_name_user() {
        let err = IdentityError::InvalidCredentials;
        assert_eq!(err.to_string(), "Invalid username or password");
    }

    #[test]
    fn account_not_found_display() {
        let err = IdentityError::AccountNotFound("student_1".to_string());
        assert_eq!(err.to_string(), "Account not found: student_1");
    }

    #[test]
    fn store_error_is_transparent() {
        let err = IdentityError::from(StoreError::Lock("poisoned".to_string()));
        assert_eq!(err.to_string(), "Lock error: poisoned");
    }
}
