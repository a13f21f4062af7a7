//! Authentication types for the domain layer.
//!
//! These types represent a caller identified from a bearer token. They have
//! no provider dependencies; any `SessionValidator` adapter can populate them.

use super::UserId;
use thiserror::Error;

/// Authenticated caller extracted from a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The unique user identifier (token subject).
    pub id: UserId,

    /// Email address from the token claims, if present.
    pub email: Option<String>,

    /// Whether this caller may run the agreement verification actions.
    pub is_admin: bool,
}

impl AuthenticatedUser {
    /// Creates a regular (non-admin) authenticated user.
    pub fn new(id: UserId, email: Option<String>) -> Self {
        Self {
            id,
            email,
            is_admin: false,
        }
    }

    /// Marks the user as an administrator.
    pub fn as_admin(mut self) -> Self {
        self.is_admin = true;
        self
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// Token is valid but the caller lacks the required role.
    #[error("Insufficient permissions")]
    InsufficientPermissions,
}

impl AuthError {
    /// Returns true if this error indicates the caller should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_is_not_admin() {
        let user = AuthenticatedUser::new(UserId::new("vendor-1").unwrap(), None);
        assert!(!user.is_admin);
        assert!(user.as_admin().is_admin);
    }

    #[test]
    fn auth_error_displays_correctly() {
        assert_eq!(AuthError::InvalidToken.to_string(), "Invalid or expired token");
        assert_eq!(AuthError::TokenExpired.to_string(), "Token expired");
    }

    #[test]
    fn requires_reauthentication_for_token_errors_only() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(!AuthError::InsufficientPermissions.requires_reauthentication());
    }
}
