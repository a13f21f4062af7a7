//! Proposal repository port.
//!
//! Defines the contract for persisting proposals and their history.
//!
//! # Design
//!
//! - **Counter writes together**: a counter-offer's history row and the
//!   proposal update land in one call, so neither exists without the other.
//! - **Party-scoped listing**: proposals are listed for whoever is sender or
//!   receiver.
//! - **Cascade**: deleting a proposal deletes its history.

use crate::domain::foundation::{DomainError, ProposalId, UserId};
use crate::domain::proposal::{Proposal, ProposalHistory};
use async_trait::async_trait;

/// Repository port for Proposal aggregate persistence.
#[async_trait]
pub trait ProposalRepository: Send + Sync {
    /// Save a new proposal.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, proposal: &Proposal) -> Result<(), DomainError>;

    /// Update an existing proposal (status, duties, timestamps).
    ///
    /// # Errors
    ///
    /// - `ProposalNotFound` if the proposal doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, proposal: &Proposal) -> Result<(), DomainError>;

    /// Find a proposal by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &ProposalId) -> Result<Option<Proposal>, DomainError>;

    /// All proposals where the user is sender or receiver, newest first.
    async fn find_for_party(&self, user_id: &UserId) -> Result<Vec<Proposal>, DomainError>;

    /// Accepted proposals an administrator has not verified yet, oldest first.
    async fn find_awaiting_verification(&self) -> Result<Vec<Proposal>, DomainError>;

    /// Update a proposal and append the history snapshot of the terms it
    /// replaced, atomically. On error neither write is visible.
    ///
    /// # Errors
    ///
    /// - `ProposalNotFound` if the proposal doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update_with_history(
        &self,
        proposal: &Proposal,
        entry: &ProposalHistory,
    ) -> Result<(), DomainError>;

    /// History of a proposal ordered by creation time, oldest first.
    async fn history_for(&self, id: &ProposalId) -> Result<Vec<ProposalHistory>, DomainError>;

    /// Delete a proposal together with its history.
    ///
    /// # Errors
    ///
    /// - `ProposalNotFound` if the proposal doesn't exist
    async fn delete(&self, id: &ProposalId) -> Result<(), DomainError>;
}
