//! RespondToProposalHandler - accept, reject, or counter a proposal.

use std::sync::Arc;

use tracing::error;

use crate::domain::foundation::{DomainError, ProposalId};
use crate::domain::proposal::{ActingContext, Notice, Proposal, ProposalError};
use crate::ports::{PartyDirectory, ProposalNotifier, ProposalRepository};

use super::ProposalTransitionService;

/// What the responding party wants to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseAction {
    Accept,
    Reject,
    Counter {
        sender_duties: String,
        receiver_duties: String,
    },
}

#[derive(Debug, Clone)]
pub struct RespondToProposalCommand {
    pub proposal_id: ProposalId,
    pub action: ResponseAction,
}

#[derive(Debug, Clone)]
pub struct RespondToProposalResult {
    pub proposal: Proposal,
}

pub struct RespondToProposalHandler {
    repository: Arc<dyn ProposalRepository>,
    directory: Arc<dyn PartyDirectory>,
    notifier: Arc<dyn ProposalNotifier>,
    transitions: Arc<ProposalTransitionService>,
}

impl RespondToProposalHandler {
    pub fn new(
        repository: Arc<dyn ProposalRepository>,
        directory: Arc<dyn PartyDirectory>,
        notifier: Arc<dyn ProposalNotifier>,
        transitions: Arc<ProposalTransitionService>,
    ) -> Self {
        Self {
            repository,
            directory,
            notifier,
            transitions,
        }
    }

    pub async fn handle(
        &self,
        cmd: RespondToProposalCommand,
        ctx: &ActingContext,
    ) -> Result<RespondToProposalResult, ProposalError> {
        // 1. Load
        let mut proposal = self
            .repository
            .find_by_id(&cmd.proposal_id)
            .await?
            .ok_or(ProposalError::not_found(cmd.proposal_id))?;

        // 2. Authorize - whose turn is it?
        proposal.authorize_response(&ctx.actor)?;

        // 3. Transition
        match cmd.action {
            ResponseAction::Accept => {
                self.transitions.accept(&mut proposal, ctx).await?;
                ctx.notify(Notice::success(
                    "Proposal accepted - waiting admin verification.",
                ));
            }
            ResponseAction::Reject => {
                self.transitions.reject(&mut proposal, ctx).await?;
                // Rejection is already stored.
                if let Err(err) = self.tell_counterpart_of_rejection(&proposal, ctx).await {
                    error!(
                        proposal_id = %proposal.id(),
                        correlation_id = ctx.correlation_id(),
                        error = %err,
                        "Failed to deliver rejection notice"
                    );
                }
                ctx.notify(Notice::success("Proposal rejected."));
            }
            ResponseAction::Counter {
                sender_duties,
                receiver_duties,
            } => {
                self.transitions
                    .counter(&mut proposal, sender_duties, receiver_duties, ctx)
                    .await?;
                ctx.notify(Notice::success("Counter-proposal sent."));
            }
        }

        Ok(RespondToProposalResult { proposal })
    }

    async fn tell_counterpart_of_rejection(
        &self,
        proposal: &Proposal,
        ctx: &ActingContext,
    ) -> Result<(), DomainError> {
        let Some(recipient) = proposal.counterpart_of(&ctx.actor) else {
            return Ok(());
        };

        let notice = match self.directory.find(&ctx.actor).await? {
            Some(profile) => Notice::rejection_sentence(&profile),
            None => Notice::rejected_by(ctx.actor.as_str()),
        };
        self.notifier.deliver(recipient, notice).await
    }
}
