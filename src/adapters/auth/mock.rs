//! Mock session validator for tests.
//!
//! # Example
//!
//! ```ignore
//! let validator = MockSessionValidator::new()
//!     .with_test_user("vendor-token", "vendor-1")
//!     .with_admin("admin-token", "admin-1");
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Maps fixed tokens to users. Unknown tokens are `InvalidToken`.
///
/// # Security Note
///
/// Test adapter: panics if its locks are poisoned.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Returned for every validation when set
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens
            .write()
            .expect("MockSessionValidator: lock poisoned")
            .insert(token.into(), user);
        self
    }

    /// Registers a regular user whose id is `user_id`.
    ///
    /// # Panics
    ///
    /// Panics if `user_id` is blank.
    pub fn with_test_user(self, token: impl Into<String>, user_id: &str) -> Self {
        let user = AuthenticatedUser::new(
            UserId::new(user_id).expect("test user id must not be blank"),
            Some(format!("{}@test.tastelocal.sg", user_id)),
        );
        self.with_user(token, user)
    }

    /// Registers an administrator whose id is `user_id`.
    ///
    /// # Panics
    ///
    /// Panics if `user_id` is blank.
    pub fn with_admin(self, token: impl Into<String>, user_id: &str) -> Self {
        let user = AuthenticatedUser::new(
            UserId::new(user_id).expect("test user id must not be blank"),
            None,
        )
        .as_admin();
        self.with_user(token, user)
    }

    /// Forces every validation to fail with `error`.
    pub fn with_error(self, error: AuthError) -> Self {
        *self
            .force_error
            .write()
            .expect("MockSessionValidator: lock poisoned") = Some(error);
        self
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self
            .force_error
            .read()
            .expect("MockSessionValidator: lock poisoned")
            .clone()
        {
            return Err(error);
        }

        self.tokens
            .read()
            .expect("MockSessionValidator: lock poisoned")
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_tokens_resolve_to_users() {
        let validator = MockSessionValidator::new()
            .with_test_user("t1", "vendor-1")
            .with_admin("t2", "admin-1");

        let vendor = validator.validate("t1").await.unwrap();
        assert_eq!(vendor.id.as_str(), "vendor-1");
        assert!(!vendor.is_admin);
        assert!(validator.validate("t2").await.unwrap().is_admin);
        assert_eq!(validator.validate("t3").await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn forced_error_wins() {
        let validator = MockSessionValidator::new()
            .with_test_user("t1", "vendor-1")
            .with_error(AuthError::TokenExpired);

        assert_eq!(validator.validate("t1").await, Err(AuthError::TokenExpired));
    }
}
