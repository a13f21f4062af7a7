//! In-app notifier.
//!
//! Transition messages go into the acting party's `NoticeBuffer`, which the
//! HTTP layer returns in the response body. Messages addressed to another
//! party are held in a per-user inbox until that party drains it.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::proposal::{ActingContext, Notice, Proposal};
use crate::ports::{NotificationInbox, PartyDirectory, ProposalNotifier};

pub struct InAppNotifier {
    directory: Arc<dyn PartyDirectory>,
    inbox: RwLock<HashMap<UserId, Vec<Notice>>>,
}

impl InAppNotifier {
    pub fn new(directory: Arc<dyn PartyDirectory>) -> Self {
        Self {
            directory,
            inbox: RwLock::new(HashMap::new()),
        }
    }

    /// Name shown to the receiver, falling back to the raw user id when the
    /// sender has no profile.
    async fn sender_name(&self, proposal: &Proposal) -> Result<String, DomainError> {
        Ok(self
            .directory
            .find(proposal.sender())
            .await?
            .map(|profile| profile.display_name())
            .unwrap_or_else(|| proposal.sender().to_string()))
    }

    fn lock_error() -> DomainError {
        DomainError::new(ErrorCode::InternalError, "Notification inbox lock poisoned")
    }
}

#[async_trait]
impl ProposalNotifier for InAppNotifier {
    async fn new_proposal(
        &self,
        proposal: &Proposal,
        ctx: &ActingContext,
    ) -> Result<(), DomainError> {
        let name = self.sender_name(proposal).await?;
        ctx.notify(Notice::new_proposal(proposal.id(), &name));
        Ok(())
    }

    async fn rejected(&self, proposal: &Proposal, ctx: &ActingContext) -> Result<(), DomainError> {
        ctx.notify(Notice::rejected(proposal.id()));
        Ok(())
    }

    async fn accepted(&self, proposal: &Proposal, ctx: &ActingContext) -> Result<(), DomainError> {
        ctx.notify(Notice::accepted(proposal.id()));
        Ok(())
    }

    async fn countered(
        &self,
        proposal: &Proposal,
        ctx: &ActingContext,
    ) -> Result<(), DomainError> {
        ctx.notify(Notice::countered(proposal.id()));
        Ok(())
    }

    async fn deliver(&self, recipient: &UserId, notice: Notice) -> Result<(), DomainError> {
        let mut inbox = self.inbox.write().map_err(|_| Self::lock_error())?;
        inbox.entry(recipient.clone()).or_default().push(notice);
        Ok(())
    }
}

#[async_trait]
impl NotificationInbox for InAppNotifier {
    async fn drain(&self, user_id: &UserId) -> Result<Vec<Notice>, DomainError> {
        let mut inbox = self.inbox.write().map_err(|_| Self::lock_error())?;
        Ok(inbox.remove(user_id).unwrap_or_default())
    }
}
