//! Party directory port.
//!
//! Lookup of marketplace accounts by user id. The proposal workflow only
//! needs names for notices and an existence check for receivers.

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::party::PartyProfile;
use async_trait::async_trait;

#[async_trait]
pub trait PartyDirectory: Send + Sync {
    /// Find a party's profile.
    ///
    /// Returns `None` if the account does not exist.
    async fn find(&self, user_id: &UserId) -> Result<Option<PartyProfile>, DomainError>;

    /// Insert or replace a profile.
    async fn upsert(&self, profile: &PartyProfile) -> Result<(), DomainError>;
}
