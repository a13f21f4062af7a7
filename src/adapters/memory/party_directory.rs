//! In-memory party directory for tests and local runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::party::PartyProfile;
use crate::ports::PartyDirectory;

#[derive(Debug, Default)]
pub struct InMemoryPartyDirectory {
    profiles: RwLock<HashMap<UserId, PartyProfile>>,
}

impl InMemoryPartyDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: register a profile up front.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn with_profile(self, profile: PartyProfile) -> Self {
        self.profiles
            .write()
            .expect("InMemoryPartyDirectory: lock poisoned")
            .insert(profile.user_id.clone(), profile);
        self
    }
}

#[async_trait]
impl PartyDirectory for InMemoryPartyDirectory {
    async fn find(&self, user_id: &UserId) -> Result<Option<PartyProfile>, DomainError> {
        Ok(self
            .profiles
            .read()
            .expect("InMemoryPartyDirectory: lock poisoned")
            .get(user_id)
            .cloned())
    }

    async fn upsert(&self, profile: &PartyProfile) -> Result<(), DomainError> {
        self.profiles
            .write()
            .expect("InMemoryPartyDirectory: lock poisoned")
            .insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }
}
