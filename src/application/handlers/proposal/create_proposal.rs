//! CreateProposalHandler - drafts a proposal and sends it straight away.

use std::sync::Arc;

use crate::domain::foundation::{ProposalId, UserId};
use crate::domain::proposal::{ActingContext, DutyTerms, Notice, Proposal, ProposalError};
use crate::ports::{PartyDirectory, ProposalRepository};

use super::ProposalTransitionService;

/// Command to create a proposal. The acting party becomes the sender.
#[derive(Debug, Clone)]
pub struct CreateProposalCommand {
    pub receiver: UserId,
    pub sender_duties: String,
    pub receiver_duties: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateProposalResult {
    pub proposal: Proposal,
}

pub struct CreateProposalHandler {
    repository: Arc<dyn ProposalRepository>,
    directory: Arc<dyn PartyDirectory>,
    transitions: Arc<ProposalTransitionService>,
}

impl CreateProposalHandler {
    pub fn new(
        repository: Arc<dyn ProposalRepository>,
        directory: Arc<dyn PartyDirectory>,
        transitions: Arc<ProposalTransitionService>,
    ) -> Self {
        Self {
            repository,
            directory,
            transitions,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateProposalCommand,
        ctx: &ActingContext,
    ) -> Result<CreateProposalResult, ProposalError> {
        // 1. Validate terms
        let terms = DutyTerms::opening(cmd.sender_duties, cmd.receiver_duties)?;

        // 2. Receiver must be a known account
        if self.directory.find(&cmd.receiver).await?.is_none() {
            return Err(ProposalError::validation(
                "receiver",
                "The selected receiver does not exist.",
            ));
        }

        // 3. Save as draft
        let mut proposal = Proposal::new(ProposalId::new(), ctx.actor.clone(), cmd.receiver, terms)?;
        self.repository.save(&proposal).await?;

        // 4. Send
        self.transitions.send(&mut proposal, ctx).await?;
        ctx.notify(Notice::success("Proposal sent - waiting for response."));

        Ok(CreateProposalResult { proposal })
    }
}
