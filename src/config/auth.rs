//! Authentication configuration (HS256 bearer tokens)

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;
use crate::domain::foundation::UserId;

const MIN_PRODUCTION_SECRET_LEN: usize = 32;

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC secret used to verify access tokens
    pub jwt_secret: Secret<String>,

    /// Expected `iss` claim
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Expected `aud` claim
    #[serde(default = "default_audience")]
    pub audience: String,

    /// Clock skew tolerated on `exp`, in seconds
    #[serde(default = "default_leeway")]
    pub leeway_secs: u64,

    /// Comma-separated user ids allowed to verify agreements
    pub admin_user_ids: Option<String>,
}

impl AuthConfig {
    /// Parsed admin ids; blank entries are ignored.
    pub fn admin_ids(&self) -> Vec<UserId> {
        self.admin_user_ids
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter_map(|id| UserId::new(id).ok())
            .collect()
    }

    /// The secret must be present; production additionally requires a
    /// minimum length.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if *environment == Environment::Production && secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_LEN));
        }
        if self.issuer.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__ISSUER"));
        }
        if self.audience.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__AUDIENCE"));
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Secret::new(String::new()),
            issuer: default_issuer(),
            audience: default_audience(),
            leeway_secs: default_leeway(),
            admin_user_ids: None,
        }
    }
}

fn default_issuer() -> String {
    "tastelocal".to_string()
}

fn default_audience() -> String {
    "tastelocal-proposals".to_string()
}

fn default_leeway() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_secret(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: Secret::new(secret.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn empty_secret_is_missing() {
        assert_eq!(
            AuthConfig::default().validate(&Environment::Development),
            Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"))
        );
    }

    #[test]
    fn short_secret_only_fails_in_production() {
        let config = with_secret("dev-secret");
        assert!(config.validate(&Environment::Development).is_ok());
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::JwtSecretTooShort(32))
        );
    }

    #[test]
    fn admin_ids_are_trimmed_and_blank_entries_dropped() {
        let config = AuthConfig {
            admin_user_ids: Some(" admin-1 ,, admin-2".to_string()),
            ..with_secret("s")
        };
        let ids: Vec<_> = config.admin_ids().iter().map(|id| id.to_string()).collect();
        assert_eq!(ids, vec!["admin-1", "admin-2"]);
    }

    #[test]
    fn no_admins_configured() {
        assert!(with_secret("s").admin_ids().is_empty());
    }

    #[test]
    fn debug_output_hides_secret() {
        let rendered = format!("{:?}", with_secret("super-secret-value"));
        assert!(!rendered.contains("super-secret-value"));
    }
}
