//! Agreement queue adapters.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, ProposalId};
use crate::domain::proposal::Proposal;
use crate::ports::AgreementQueue;

/// Writes each new agreement to the service log for the admin team.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingAgreementQueue;

impl LoggingAgreementQueue {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AgreementQueue for LoggingAgreementQueue {
    async fn new_agreement(&self, proposal: &Proposal) -> Result<(), DomainError> {
        tracing::info!(
            proposal_id = %proposal.id(),
            sender = %proposal.sender(),
            receiver = %proposal.receiver(),
            "[ADMIN-QUEUE] Proposal {} ready for manual verification",
            proposal.id()
        );
        Ok(())
    }
}

/// Records announced agreements in memory.
///
/// # Security Note
///
/// Test adapter: panics if its lock is poisoned.
#[derive(Debug, Default)]
pub struct InMemoryAgreementQueue {
    announced: Mutex<Vec<ProposalId>>,
}

impl InMemoryAgreementQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids announced so far, in order.
    pub fn announced(&self) -> Vec<ProposalId> {
        self.announced
            .lock()
            .expect("InMemoryAgreementQueue: lock poisoned")
            .clone()
    }

    pub fn count_for(&self, id: &ProposalId) -> usize {
        self.announced
            .lock()
            .expect("InMemoryAgreementQueue: lock poisoned")
            .iter()
            .filter(|announced| *announced == id)
            .count()
    }
}

#[async_trait]
impl AgreementQueue for InMemoryAgreementQueue {
    async fn new_agreement(&self, proposal: &Proposal) -> Result<(), DomainError> {
        self.announced
            .lock()
            .expect("InMemoryAgreementQueue: lock poisoned")
            .push(*proposal.id());
        Ok(())
    }
}
