//! In-memory proposal repository.
//!
//! # Security Note
//!
//! This adapter is for **testing and local demos only**. It uses `.expect()`
//! on lock operations which will panic if locks are poisoned. Production
//! wiring uses `PostgresProposalRepository`.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ProposalId, UserId};
use crate::domain::proposal::{Proposal, ProposalHistory, ProposalStatus};
use crate::ports::ProposalRepository;

/// Proposal store backed by vectors, preserving insertion order.
#[derive(Debug, Default)]
pub struct InMemoryProposalRepository {
    proposals: RwLock<Vec<Proposal>>,
    history: RwLock<Vec<ProposalHistory>>,
}

impl InMemoryProposalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with an existing proposal.
    pub fn with_proposal(self, proposal: Proposal) -> Self {
        self.proposals
            .write()
            .expect("InMemoryProposalRepository: proposals lock poisoned")
            .push(proposal);
        self
    }

    // === Test Helpers ===

    /// Number of stored proposals.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn proposal_count(&self) -> usize {
        self.proposals
            .read()
            .expect("InMemoryProposalRepository: proposals lock poisoned")
            .len()
    }

    /// Number of history rows across all proposals.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn history_count(&self) -> usize {
        self.history
            .read()
            .expect("InMemoryProposalRepository: history lock poisoned")
            .len()
    }

    fn not_found(id: &ProposalId) -> DomainError {
        DomainError::new(
            ErrorCode::ProposalNotFound,
            format!("Proposal not found: {}", id),
        )
    }
}

#[async_trait]
impl ProposalRepository for InMemoryProposalRepository {
    async fn save(&self, proposal: &Proposal) -> Result<(), DomainError> {
        let mut proposals = self
            .proposals
            .write()
            .expect("InMemoryProposalRepository: proposals lock poisoned");
        if proposals.iter().any(|p| p.id() == proposal.id()) {
            return Err(DomainError::database(format!(
                "Proposal already exists: {}",
                proposal.id()
            )));
        }
        proposals.push(proposal.clone());
        Ok(())
    }

    async fn update(&self, proposal: &Proposal) -> Result<(), DomainError> {
        let mut proposals = self
            .proposals
            .write()
            .expect("InMemoryProposalRepository: proposals lock poisoned");
        match proposals.iter_mut().find(|p| p.id() == proposal.id()) {
            Some(slot) => {
                *slot = proposal.clone();
                Ok(())
            }
            None => Err(Self::not_found(proposal.id())),
        }
    }

    async fn find_by_id(&self, id: &ProposalId) -> Result<Option<Proposal>, DomainError> {
        Ok(self
            .proposals
            .read()
            .expect("InMemoryProposalRepository: proposals lock poisoned")
            .iter()
            .find(|p| p.id() == id)
            .cloned())
    }

    async fn find_for_party(&self, user_id: &UserId) -> Result<Vec<Proposal>, DomainError> {
        // Reverse first so that equal timestamps keep newest-inserted first.
        let mut found: Vec<Proposal> = self
            .proposals
            .read()
            .expect("InMemoryProposalRepository: proposals lock poisoned")
            .iter()
            .rev()
            .filter(|p| p.is_party(user_id))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        Ok(found)
    }

    async fn find_awaiting_verification(&self) -> Result<Vec<Proposal>, DomainError> {
        let mut found: Vec<Proposal> = self
            .proposals
            .read()
            .expect("InMemoryProposalRepository: proposals lock poisoned")
            .iter()
            .filter(|p| p.status() == ProposalStatus::Accepted && !p.is_verified())
            .cloned()
            .collect();
        found.sort_by(|a, b| a.updated_at().cmp(b.updated_at()));
        Ok(found)
    }

    async fn update_with_history(
        &self,
        proposal: &Proposal,
        entry: &ProposalHistory,
    ) -> Result<(), DomainError> {
        let mut proposals = self
            .proposals
            .write()
            .expect("InMemoryProposalRepository: proposals lock poisoned");
        let mut history = self
            .history
            .write()
            .expect("InMemoryProposalRepository: history lock poisoned");
        let slot = proposals
            .iter_mut()
            .find(|p| p.id() == proposal.id())
            .ok_or_else(|| Self::not_found(proposal.id()))?;
        *slot = proposal.clone();
        history.push(entry.clone());
        Ok(())
    }

    async fn history_for(&self, id: &ProposalId) -> Result<Vec<ProposalHistory>, DomainError> {
        let mut entries: Vec<ProposalHistory> = self
            .history
            .read()
            .expect("InMemoryProposalRepository: history lock poisoned")
            .iter()
            .filter(|h| h.proposal_id() == id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.created_at().cmp(b.created_at()));
        Ok(entries)
    }

    async fn delete(&self, id: &ProposalId) -> Result<(), DomainError> {
        let mut proposals = self
            .proposals
            .write()
            .expect("InMemoryProposalRepository: proposals lock poisoned");
        let before = proposals.len();
        proposals.retain(|p| p.id() != id);
        if proposals.len() == before {
            return Err(Self::not_found(id));
        }
        self.history
            .write()
            .expect("InMemoryProposalRepository: history lock poisoned")
            .retain(|h| h.proposal_id() != id);
        Ok(())
    }
}
