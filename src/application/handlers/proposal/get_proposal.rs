//! GetProposalHandler - query handler for a single proposal and its history.

use std::sync::Arc;

use crate::domain::foundation::{ProposalId, UserId};
use crate::domain::proposal::{Proposal, ProposalError, ProposalHistory};
use crate::ports::ProposalRepository;

#[derive(Debug, Clone)]
pub struct GetProposalQuery {
    pub proposal_id: ProposalId,
    pub user_id: UserId,
}

/// A proposal with its superseded terms, oldest first.
#[derive(Debug, Clone)]
pub struct ProposalDetail {
    pub proposal: Proposal,
    pub history: Vec<ProposalHistory>,
}

pub struct GetProposalHandler {
    repository: Arc<dyn ProposalRepository>,
}

impl GetProposalHandler {
    pub fn new(repository: Arc<dyn ProposalRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetProposalQuery) -> Result<ProposalDetail, ProposalError> {
        let proposal = self
            .repository
            .find_by_id(&query.proposal_id)
            .await?
            .ok_or(ProposalError::not_found(query.proposal_id))?;

        proposal.authorize_view(&query.user_id)?;

        let history = self.repository.history_for(proposal.id()).await?;
        Ok(ProposalDetail { proposal, history })
    }
}
