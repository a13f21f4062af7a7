//! ListMyProposalsHandler - every proposal the caller sent or received.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::proposal::{Proposal, ProposalError};
use crate::ports::ProposalRepository;

#[derive(Debug, Clone)]
pub struct ListMyProposalsQuery {
    pub user_id: UserId,
}

pub struct ListMyProposalsHandler {
    repository: Arc<dyn ProposalRepository>,
}

impl ListMyProposalsHandler {
    pub fn new(repository: Arc<dyn ProposalRepository>) -> Self {
        Self { repository }
    }

    /// Newest first.
    pub async fn handle(&self, query: ListMyProposalsQuery) -> Result<Vec<Proposal>, ProposalError> {
        Ok(self.repository.find_for_party(&query.user_id).await?)
    }
}
